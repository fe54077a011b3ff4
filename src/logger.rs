use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

/// Sends `log` records to the devtools console at the matching severity.
struct ConsoleLogger;

static LOGGER:ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
  fn enabled(&self, metadata:&Metadata<'_>) -> bool {
    metadata.level() <= log::max_level()
  }

  fn log(&self, record:&Record<'_>) {
    if !self.enabled(record.metadata()) {return}
    let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
    match record.level() {
      Level::Error => console::error_1(&line),
      Level::Warn  => console::warn_1(&line),
      Level::Info  => console::info_1(&line),
      Level::Debug => console::log_1(&line),
      Level::Trace => console::debug_1(&line),
    }
  }

  fn flush(&self) {}
}

/// Installs the console logger. A second call keeps the first logger.
pub fn init(level:LevelFilter) {
  if log::set_logger(&LOGGER).is_ok() {
    log::set_max_level(level);
  }
}
