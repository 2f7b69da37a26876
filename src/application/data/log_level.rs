use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    /// No log output at all
    Silent,
}

impl LogLevel {
    /// The most verbose level to emit, or `None` when logging is disabled.
    pub fn as_tracing_level(self) -> Option<tracing::Level> {
        let level = match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Silent => return None,
        };
        Some(level)
    }
}
