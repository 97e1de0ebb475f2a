use std::path::PathBuf;

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: mailer::Client,
    pub base_url: String,
    pub upload_dir: PathBuf,
}

/// Conversion used by the test-utils crate to build an [`AppState`] without a
/// circular dependency; base URL and upload directory take test defaults.
impl From<(DatabaseConnection, mailer::Client)> for AppState {
    fn from((db, mailer): (DatabaseConnection, mailer::Client)) -> Self {
        Self {
            db,
            mailer,
            base_url: "http://localhost:8080".to_string(),
            upload_dir: PathBuf::from("uploads"),
        }
    }
}
