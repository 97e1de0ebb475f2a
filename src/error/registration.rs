use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("An account already exists for this email address")]
    EmailTaken,
    #[error("A profile already exists for this account")]
    ProfileExists,
    #[error("Accounts with this role cannot be created through registration")]
    RoleNotRegistrable,
    #[error("Selected school does not exist")]
    UnknownSchool,
    #[error("Selected advisor does not exist")]
    UnknownAdvisor,
    #[error("Selected advisor is not registered at the selected school")]
    AdvisorSchoolMismatch,
    #[error("Advisor registration requires either a school id or a new school")]
    MissingSchool,
}

impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::EmailTaken | Self::ProfileExists => StatusCode::CONFLICT,
            Self::RoleNotRegistrable
            | Self::UnknownSchool
            | Self::UnknownAdvisor
            | Self::AdvisorSchoolMismatch
            | Self::MissingSchool => StatusCode::BAD_REQUEST,
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
