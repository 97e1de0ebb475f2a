use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload is missing a file part")]
    MissingFile,
    #[error("File extension {0:?} is not accepted for this material")]
    UnsupportedExtension(String),
    #[error("File exceeds the {0} byte ceiling for this material")]
    TooLarge(usize),
    #[error("Unknown material kind {0:?}")]
    UnknownKind(String),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
