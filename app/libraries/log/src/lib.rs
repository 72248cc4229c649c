use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.as_level_filter().into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .try_init();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_level_from_config_text() {
        let level: LogLevel = serde_json::from_str(r#""Debug""#).unwrap();
        assert_eq!(level, LogLevel::Debug);
        assert_eq!(level.as_level_filter(), LevelFilter::DEBUG);
        assert_eq!(LogLevel::default().as_level_filter(), LevelFilter::INFO);
    }
}
