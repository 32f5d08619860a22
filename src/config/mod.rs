mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, DirectoryConfig, LoggingConfig, SourceConfig, UiConfig};
