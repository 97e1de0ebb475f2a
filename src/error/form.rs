use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum FormError {
    /// Token does not have the expected delimited shape. Rejected before any
    /// data-store lookup.
    #[error("Invitation token is malformed")]
    MalformedToken,
    /// Token purpose does not belong to the form endpoint it was presented to.
    #[error("Invitation token purpose does not match this form")]
    PurposeMismatch,
    /// The record the token's subject segment points at does not exist.
    #[error("Invitation subject not found")]
    SubjectNotFound,
    /// The subject exists but has no party row for the token's purpose.
    #[error("Invitation party not found")]
    PartyNotFound,
    /// Stored token differs from the presented one: superseded by a resend,
    /// cleared after completion, or never issued.
    #[error("Invitation is invalid or has expired")]
    InvitationMismatch,
    /// Token matched but its timestamp segment is past the TTL.
    #[error("Invitation has expired")]
    InvitationExpired,
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::MalformedToken | Self::PurposeMismatch => StatusCode::BAD_REQUEST,
            Self::SubjectNotFound | Self::PartyNotFound => StatusCode::NOT_FOUND,
            Self::InvitationMismatch | Self::InvitationExpired => StatusCode::FORBIDDEN,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
