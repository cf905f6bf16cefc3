//! Browser console plumbing: a `log` backend and a panic hook.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        write_console(record.level(), &line);
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    format!("[{level} {target}] {message}")
}

#[cfg(target_arch = "wasm32")]
fn write_console(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::info_1(&value),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Install the console logger and panic hook once per page.
pub(crate) fn init(level: LevelFilter) {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(|info| {
            let msg = format!("Poly WASM panic: {info}");
            web_sys::console::error_1(&msg.into());
        }));
    });
}

/// Change the log level after startup (from the page's debug toggle).
pub(crate) fn set_level(name: &str) -> bool {
    match name.parse::<LevelFilter>() {
        Ok(level) => {
            log::set_max_level(level);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_format_names_level_and_target() {
        assert_eq!(
            format_record(Level::Warn, "poly_editor::editor", "invalid mode `x`"),
            "[WARN poly_editor::editor] invalid mode `x`"
        );
    }

    #[test]
    fn set_level_accepts_level_names() {
        assert!(set_level("debug"));
        assert!(set_level("OFF"));
        assert!(!set_level("chatty"));
    }
}
