mod config;
mod error;
mod filter;
mod format;
mod init;
mod timer;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use filter::LogFilter;
pub use format::LogFormat;
pub use timer::UtcRfc3339;

/// Install the global tracing subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInitialized`] on a second call.
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LogFormat::Text => init::text(cfg),
        LogFormat::Json => init::json(cfg),
        LogFormat::Journald => init::journald(cfg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_refused() {
        let cfg = LoggerConfig {
            use_color: false,
            ..Default::default()
        };
        let first = init_logger(&cfg);
        let second = init_logger(&cfg);
        // Another test in this binary may have installed a subscriber first.
        assert!(first.is_ok() || matches!(first, Err(LoggerError::AlreadyInitialized)));
        assert!(matches!(second, Err(LoggerError::AlreadyInitialized)));
    }
}
