use std::path::PathBuf;

use crate::error::config::ConfigError;

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub email_api_url: String,
    pub email_api_key: String,
    pub email_from_address: String,
    pub public_base_url: String,
    pub upload_dir: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            valkey_url: require("VALKEY_URL")?,
            email_api_url: require("EMAIL_API_URL")?,
            email_api_key: require("EMAIL_API_KEY")?,
            email_from_address: require("EMAIL_FROM_ADDRESS")?,
            public_base_url: public_base_url(),
            upload_dir: PathBuf::from(
                std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            ),
            port: port()?,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

/// Explicit override, then the platform-provided URL, then localhost.
fn public_base_url() -> String {
    std::env::var("PUBLIC_BASE_URL")
        .or_else(|_| std::env::var("DEPLOY_URL"))
        .unwrap_or_else(|_| "http://localhost:8080".to_string())
}

fn port() -> Result<u16, ConfigError> {
    match std::env::var("PORT") {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidVar("PORT", value)),
        Err(_) => Ok(8080),
    }
}
