use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Logger configuration used by the kurve tools.
///
/// `RUST_LOG` still takes precedence when it is set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggerConfig {
    pub level_filter: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::Warn,
        }
    }
}
