use anyhow::Context;
use clap::Parser;
use poly_core::{EditorConfig, HostEvent};
use poly_editor::Editor;
use std::io::Write;
use std::path::PathBuf;

mod replay;

#[derive(Parser, Debug)]
#[command(name = "poly-replay")]
#[command(version, about = "Replay a recorded Poly Draft event trace")]
struct Cli {
    /// JSON array of host events captured from the page
    #[arg(value_name = "TRACE")]
    trace: PathBuf,

    /// Editor configuration (JSON object, every key optional)
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EditorConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EditorConfig::default(),
    };

    let text = std::fs::read_to_string(&cli.trace)
        .with_context(|| format!("reading trace {}", cli.trace.display()))?;
    let events: Vec<HostEvent> = serde_json::from_str(&text)
        .with_context(|| format!("parsing trace {}", cli.trace.display()))?;

    let mut editor = Editor::new(&config).context("building editor")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = replay::run(&mut editor, &events, &mut out)?;
    out.flush()?;

    log::info!(
        "replayed {} events: {} commands, {} rejected",
        summary.events,
        summary.commands,
        summary.rejected
    );
    Ok(())
}
