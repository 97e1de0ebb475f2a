//! Token-gated form endpoints for third-party signers.
//!
//! These are the only write endpoints reachable without a session; access is
//! gated entirely by the invitation token carried in the query string.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    error::Error,
    model::{
        api::{ErrorDto, SuccessDto},
        app::AppState,
        form::{
            ChaperoneFormView, ChaperoneSignatureDto, PhotoReleaseFormView,
            PhotoReleaseSignatureDto, StatementFormView, StatementSignatureDto, TokenQuery,
        },
    },
    service::form::{
        chaperone::ChaperoneFormService, photo_release::PhotoReleaseFormService,
        statement::StatementFormService,
    },
};

pub static FORM_TAG: &str = "form";

/// Render data for the statement of outside assistance form
///
/// # Responses
/// - 200 (OK): Fields needed to render the form for this signer
/// - 400 (Bad Request): Malformed token or wrong form for its purpose
/// - 403 (Forbidden): Invalid, superseded, consumed, or expired invitation
/// - 404 (Not Found): Subject or signer slot does not exist
#[utoipa::path(
    get,
    path = "/api/form/statement",
    tag = FORM_TAG,
    params(TokenQuery),
    responses(
        (status = 200, description = "Form render data", body = StatementFormView),
        (status = 400, description = "Malformed token", body = ErrorDto),
        (status = 403, description = "Invalid or expired invitation", body = ErrorDto),
        (status = 404, description = "Subject not found", body = ErrorDto)
    ),
)]
pub async fn get_statement_form(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<impl IntoResponse, Error> {
    let view = StatementFormService::new(&state.db)
        .render(&query.token)
        .await?;

    Ok(Json(view))
}

/// Submit a third-party signature on the statement form
///
/// Marks the signer's part completed, consumes the token, and re-derives
/// the overall completion flag.
///
/// # Responses
/// - 200 (OK): Signature recorded
/// - 400 (Bad Request): Malformed token or wrong form for its purpose
/// - 403 (Forbidden): Invalid, superseded, consumed, or expired invitation
/// - 404 (Not Found): Subject or signer slot does not exist
#[utoipa::path(
    post,
    path = "/api/form/statement",
    tag = FORM_TAG,
    params(TokenQuery),
    request_body = StatementSignatureDto,
    responses(
        (status = 200, description = "Signature recorded", body = SuccessDto),
        (status = 400, description = "Malformed token", body = ErrorDto),
        (status = 403, description = "Invalid or expired invitation", body = ErrorDto),
        (status = 404, description = "Subject not found", body = ErrorDto)
    ),
)]
pub async fn post_statement_form(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    Json(submission): Json<StatementSignatureDto>,
) -> Result<impl IntoResponse, Error> {
    StatementFormService::new(&state.db)
        .sign(&query.token, submission)
        .await?;

    Ok(Json(SuccessDto::ok()))
}

/// Render data for the photo release form
///
/// # Responses
/// - 200 (OK): Fields needed to render the form for this signer
/// - 400 (Bad Request): Malformed token or wrong form for its purpose
/// - 403 (Forbidden): Invalid, superseded, consumed, or expired invitation
/// - 404 (Not Found): Subject or signer slot does not exist
#[utoipa::path(
    get,
    path = "/api/form/photo-release",
    tag = FORM_TAG,
    params(TokenQuery),
    responses(
        (status = 200, description = "Form render data", body = PhotoReleaseFormView),
        (status = 400, description = "Malformed token", body = ErrorDto),
        (status = 403, description = "Invalid or expired invitation", body = ErrorDto),
        (status = 404, description = "Subject not found", body = ErrorDto)
    ),
)]
pub async fn get_photo_release_form(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<impl IntoResponse, Error> {
    let view = PhotoReleaseFormService::new(&state.db)
        .render(&query.token)
        .await?;

    Ok(Json(view))
}

/// Submit a parent signature on the photo release form
///
/// # Responses
/// - 200 (OK): Signature recorded
/// - 400 (Bad Request): Malformed token or wrong form for its purpose
/// - 403 (Forbidden): Invalid, superseded, consumed, or expired invitation
/// - 404 (Not Found): Subject or signer slot does not exist
#[utoipa::path(
    post,
    path = "/api/form/photo-release",
    tag = FORM_TAG,
    params(TokenQuery),
    request_body = PhotoReleaseSignatureDto,
    responses(
        (status = 200, description = "Signature recorded", body = SuccessDto),
        (status = 400, description = "Malformed token", body = ErrorDto),
        (status = 403, description = "Invalid or expired invitation", body = ErrorDto),
        (status = 404, description = "Subject not found", body = ErrorDto)
    ),
)]
pub async fn post_photo_release_form(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    Json(submission): Json<PhotoReleaseSignatureDto>,
) -> Result<impl IntoResponse, Error> {
    PhotoReleaseFormService::new(&state.db)
        .sign(&query.token, submission)
        .await?;

    Ok(Json(SuccessDto::ok()))
}

/// Render data for the chaperone confirmation form
///
/// # Responses
/// - 200 (OK): Fields needed to render the form
/// - 400 (Bad Request): Malformed token or wrong form for its purpose
/// - 403 (Forbidden): Invalid, superseded, consumed, or expired invitation
/// - 404 (Not Found): Advisor or chaperone record does not exist
#[utoipa::path(
    get,
    path = "/api/form/chaperone",
    tag = FORM_TAG,
    params(TokenQuery),
    responses(
        (status = 200, description = "Form render data", body = ChaperoneFormView),
        (status = 400, description = "Malformed token", body = ErrorDto),
        (status = 403, description = "Invalid or expired invitation", body = ErrorDto),
        (status = 404, description = "Subject not found", body = ErrorDto)
    ),
)]
pub async fn get_chaperone_form(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<impl IntoResponse, Error> {
    let view = ChaperoneFormService::new(&state.db)
        .render(&query.token)
        .await?;

    Ok(Json(view))
}

/// Submit the chaperone's confirmation
///
/// # Responses
/// - 200 (OK): Confirmation recorded
/// - 400 (Bad Request): Malformed token or wrong form for its purpose
/// - 403 (Forbidden): Invalid, superseded, consumed, or expired invitation
/// - 404 (Not Found): Advisor or chaperone record does not exist
#[utoipa::path(
    post,
    path = "/api/form/chaperone",
    tag = FORM_TAG,
    params(TokenQuery),
    request_body = ChaperoneSignatureDto,
    responses(
        (status = 200, description = "Confirmation recorded", body = SuccessDto),
        (status = 400, description = "Malformed token", body = ErrorDto),
        (status = 403, description = "Invalid or expired invitation", body = ErrorDto),
        (status = 404, description = "Subject not found", body = ErrorDto)
    ),
)]
pub async fn post_chaperone_form(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    Json(submission): Json<ChaperoneSignatureDto>,
) -> Result<impl IntoResponse, Error> {
    ChaperoneFormService::new(&state.db)
        .sign(&query.token, submission)
        .await?;

    Ok(Json(SuccessDto::ok()))
}
