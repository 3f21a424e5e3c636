use std::sync::Mutex;

use crate::domain::logging::{LogEntry, LogLevel, Logger, TimeProvider};

/// Console logger implementation for WASM environment
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        let formatted: wasm_bindgen::JsValue = entry.format_line().into();
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&formatted),
            LogLevel::Info => web_sys::console::info_1(&formatted),
            LogLevel::Warn => web_sys::console::warn_1(&formatted),
            LogLevel::Error => web_sys::console::error_1(&formatted),
        }
    }
}

/// Wall-clock time from `Date.now()`
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowserTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        let date = js_sys::Date::new(&(timestamp as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}

/// Keeps the most recent entries in memory
pub struct BufferedLogger {
    min_level: LogLevel,
    capacity: usize,
    entries: Mutex<Vec<LogEntry>>,
}

impl BufferedLogger {
    pub fn new(min_level: LogLevel, capacity: usize) -> Self {
        Self {
            min_level,
            capacity: capacity.max(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|entries| entries.clone()).unwrap_or_default()
    }

    pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries().into_iter().filter(|entry| entry.level == level).collect()
    }
}

impl Logger for BufferedLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
            let overflow = entries.len().saturating_sub(self.capacity);
            if overflow > 0 {
                entries.drain(..overflow);
            }
        }
    }
}

impl<L: Logger> Logger for std::sync::Arc<L> {
    fn log(&self, entry: LogEntry) {
        self.as_ref().log(entry);
    }
}

/// Sends every entry to each inner logger
pub struct FanOutLogger {
    loggers: Vec<Box<dyn Logger + Send + Sync>>,
}

impl FanOutLogger {
    pub fn new(loggers: Vec<Box<dyn Logger + Send + Sync>>) -> Self {
        Self { loggers }
    }
}

impl Logger for FanOutLogger {
    fn log(&self, entry: LogEntry) {
        for logger in &self.loggers {
            logger.log(entry.clone());
        }
    }
}
