pub mod logger_config;
pub mod tool_config;

pub use logger_config::LoggerConfig;
pub use tool_config::{ToolConfig, ToolConfigBuilder};
