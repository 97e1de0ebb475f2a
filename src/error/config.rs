use thiserror::Error;

/// Startup configuration errors. Fatal; reported before the server binds.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("Environment variable {0} has an invalid value: {1}")]
    InvalidVar(&'static str, String),
}
