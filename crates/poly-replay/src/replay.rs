//! Trace replay: feed host events through an editor and write every
//! dispatched command as one JSON object per line.

use poly_core::{Command, HostEvent};
use poly_editor::{CommandSink, Editor};
use std::io::{self, Write};

/// Counts reported after a replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub events: usize,
    pub commands: usize,
    pub rejected: usize,
}

/// Writes commands as JSON lines, remembering the first I/O failure.
struct JsonLines<'a, W: Write> {
    out: &'a mut W,
    error: Option<io::Error>,
}

impl<W: Write> CommandSink for JsonLines<'_, W> {
    fn dispatch(&mut self, command: &Command) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", command.to_json()) {
            self.error = Some(e);
        }
    }
}

/// Replay `events` in order. Rejected events are logged and skipped; only
/// output failures abort the replay.
pub fn run<W: Write>(
    editor: &mut Editor,
    events: &[HostEvent],
    out: &mut W,
) -> io::Result<Summary> {
    let mut sink = JsonLines { out, error: None };
    let mut summary = Summary::default();
    for (index, event) in events.iter().enumerate() {
        summary.events += 1;
        match editor.handle_into(event, &mut sink) {
            Ok(count) => summary.commands += count,
            Err(e) => {
                log::warn!("event #{index} rejected: {e}");
                summary.rejected += 1;
            }
        }
        if let Some(e) = sink.error.take() {
            return Err(e);
        }
    }
    Ok(summary)
}
