use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::logger_config::LoggerConfig;
use crate::error::ConfigError;
use crate::layout::MemoryLayout;
use crate::scanmem::ScanmemConfig;

/// Configuration shared by the scenario compiler and the dump decoder.
///
/// Every section is optional in the toml file:
///
/// ```toml
/// [layout]
/// base_address = 0x7fffd8010ff6
/// stride = 4
/// order = ["x", "y", "direction"]
///
/// [scanmem]
/// program = "/usr/bin/scanmem"
///
/// [logger]
/// level_filter = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub layout: MemoryLayout,
    pub scanmem: ScanmemConfig,
    #[serde(rename = "logger")]
    pub logger_config: LoggerConfig,
}

impl ToolConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` if given, the default configuration otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// `ToolConfigBuilder` is a convenience builder to create a `ToolConfig` from code.
#[derive(Default)]
pub struct ToolConfigBuilder {
    config: ToolConfig,
}

impl ToolConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: MemoryLayout) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn with_scanmem_config(mut self, scanmem: ScanmemConfig) -> Self {
        self.config.scanmem = scanmem;
        self
    }

    pub fn with_logger_config(mut self, logger_config: LoggerConfig) -> Self {
        self.config.logger_config = logger_config;
        self
    }

    /// Retrieves the configuration built
    pub fn get(self) -> ToolConfig {
        self.config
    }
}
