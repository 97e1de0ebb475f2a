//! HTTP controller endpoints for the Symposium web API.
//!
//! Controllers handle HTTP requests, gate access through the session, call
//! into services, and shape responses. Each endpoint carries a utoipa
//! annotation feeding the OpenAPI document served at `/api/docs`.

pub mod admin;
pub mod advisor;
pub mod auth;
pub mod form;
pub mod invitation;
pub mod judge;
pub mod school;
pub mod student;
pub mod util;
