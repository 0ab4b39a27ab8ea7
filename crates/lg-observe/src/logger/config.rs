use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::{LogFilter, LogFormat};

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LogFormat,
    pub filter: LogFilter,
    /// Include module targets in text and JSON output.
    pub with_targets: bool,
    /// Allow ANSI colors in text output.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: LogFilter::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Colors are used only when enabled and stdout is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && self.format == LogFormat::Text && std::io::stdout().is_terminal()
    }
}
