//! Error types for the Symposium server.
//!
//! A single [`Error`] enum aggregates the domain-specific error types
//! (authentication, form/token integrity, registration, uploads) and external
//! library errors. All errors implement `IntoResponse`; the mapping follows
//! the API's taxonomy: 400 validation, 401 unauthenticated, 403 token or
//! ownership mismatch, 404 not found, 409 conflict, 500 upstream failure.
//! Internal errors are logged and returned as a generic message, never with
//! the underlying error text.

pub mod auth;
pub mod config;
pub mod form;
pub mod registration;
pub mod upload;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{
        auth::AuthError, form::FormError, registration::RegistrationError, upload::UploadError,
    },
    model::api::ErrorDto,
};

#[derive(Error, Debug)]
pub enum Error {
    /// Authentication error (session, credentials, role gating).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Invitation/signature form error (token format, match, expiry).
    #[error(transparent)]
    FormError(#[from] FormError),
    /// Registration error (duplicate profiles, bad school/advisor pairing).
    #[error(transparent)]
    RegistrationError(#[from] RegistrationError),
    /// Material upload error (extension, size ceiling).
    #[error(transparent)]
    UploadError(#[from] UploadError),
    /// Request validation error (missing or malformed input).
    #[error("Validation error: {0}")]
    Validation(String),
    /// Referenced record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Symposium's code.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    /// Email provider error (send rejected or transport failure).
    #[error(transparent)]
    MailerError(#[from] mailer::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Multipart decoding error while reading an upload.
    #[error(transparent)]
    MultipartError(#[from] axum::extract::multipart::MultipartError),
    /// Filesystem error while storing an uploaded artifact.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::AuthError(err) => err.into_response(),
            Self::FormError(err) => err.into_response(),
            Self::RegistrationError(err) => err.into_response(),
            Self::UploadError(err) => err.into_response(),
            Self::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto { error: message }),
            )
                .into_response(),
            Self::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: format!("{} not found", what),
                }),
            )
                .into_response(),
            Self::MultipartError(err) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: format!("Invalid upload: {}", err),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal
/// Server Error response.
///
/// Logs the full error for debugging but returns a generic message to the
/// client so internal details are never exposed.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
