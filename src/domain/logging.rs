use std::fmt;
use std::sync::OnceLock;

use derive_more::Display;

/// Severity, ordered so `level >= min_level` filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace = 0,
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = " INFO")]
    Info = 2,
    #[display(fmt = " WARN")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Which layer of the dashboard produced a log line
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// Render pass and entity a log line is about, when known.
///
/// Rendered as `pass#3 code=CHN` after the message so a superseded pass can
/// be matched with the fetch warnings it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogContext {
    pub pass: Option<u64>,
    pub entity: Option<String>,
}

impl LogContext {
    pub fn pass(version: u64) -> Self {
        Self {
            pass: Some(version),
            entity: None,
        }
    }

    pub fn entity(code: impl fmt::Display) -> Self {
        Self {
            pass: None,
            entity: Some(code.to_string()),
        }
    }

    pub fn with_entity(mut self, code: impl fmt::Display) -> Self {
        self.entity = Some(code.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pass.is_none() && self.entity.is_none()
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.pass, &self.entity) {
            (Some(pass), Some(code)) => write!(f, "pass#{} code={}", pass, code),
            (Some(pass), None) => write!(f, "pass#{}", pass),
            (None, Some(code)) => write!(f, "code={}", code),
            (None, None) => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
    pub context: LogContext,
}

impl LogEntry {
    /// Stamped with the global time provider at creation
    pub fn new(level: LogLevel, component: LogComponent, message: &str) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.to_string(),
            context: LogContext::default(),
        }
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    /// `[time] LEVEL LAYER:Name | message | pass#N code=XXX`, shared by the
    /// browser console and the in-page log view
    pub fn format_line(&self) -> String {
        let timestamp = get_time_provider().format_timestamp(self.timestamp);
        let mut line = format!("[{}] {} {} | {}", timestamp, self.level, self.component, self.message);
        if !self.context.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.context.to_string());
        }
        line
    }
}

pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Sink for log entries. Only `log` is required.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn trace(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Trace, component, message));
    }

    fn debug(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Debug, component, message));
    }

    fn info(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Info, component, message));
    }

    fn warn(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Warn, component, message));
    }

    fn error(&self, component: LogComponent, message: &str) {
        self.log(LogEntry::new(LogLevel::Error, component, message));
    }

    fn log_with_context(&self, level: LogLevel, component: LogComponent, context: LogContext, message: &str) {
        self.log(LogEntry::new(level, component, message).with_context(context));
    }
}

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger + Sync + Send>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider + Sync + Send>> = OnceLock::new();

/// Installs the process-wide logger. Only the first call wins.
pub fn init_logger(logger: Box<dyn Logger + Sync + Send>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

pub fn init_time_provider(time_provider: Box<dyn TimeProvider + Sync + Send>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

/// Installed logger, or a sink that drops everything
pub fn get_logger() -> &'static dyn Logger {
    GLOBAL_LOGGER
        .get()
        .map(|logger| logger.as_ref())
        .unwrap_or(&NoOpLogger)
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER
        .get()
        .map(|provider| provider.as_ref())
        .unwrap_or(&SequenceTimeProvider)
}

struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _entry: LogEntry) {}
}

/// Counter-based fallback so host builds never touch browser clocks
struct SequenceTimeProvider;

impl TimeProvider for SequenceTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("{:06}", timestamp)
    }
}

/// Formats and sends one entry to the global logger, optionally tagged with a
/// [`LogContext`]: `log_at!(LogLevel::Warn, component, ctx = context; "...", args)`.
#[macro_export]
macro_rules! log_at {
    ($level:expr, $component:expr, ctx = $context:expr; $($arg:tt)*) => {
        $crate::domain::logging::get_logger().log_with_context($level, $component, $context, &format!($($arg)*))
    };
    ($level:expr, $component:expr, $($arg:tt)*) => {
        $crate::domain::logging::get_logger().log(
            $crate::domain::logging::LogEntry::new($level, $component, &format!($($arg)*)),
        )
    };
}

/// Compiled out of release builds
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::log_at!($crate::domain::logging::LogLevel::Trace, $($arg)*);
        }
    };
}

/// Compiled out of release builds
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::log_at!($crate::domain::logging::LogLevel::Debug, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Warn, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Error, $($arg)*)
    };
}
