mod api_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod session_config;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;

#[cfg(test)]
mod tests;

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "VS_CONFIG_DIR";
/// Directory created under the platform config dir when no override is set.
pub const APP_DIR_NAME: &str = "vidshare";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_SESSION_DIRECTORY: &str = "session";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
