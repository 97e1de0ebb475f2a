use axum::{extract::State, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    controller::util::access::require_role,
    data::{advisor::AdvisorRepository, student::StudentRepository},
    error::Error,
    model::{
        api::{ErrorDto, SuccessDto},
        app::AppState,
        form::{ChaperoneInvitationDto, PhotoReleaseInvitationDto, StatementInvitationDto},
        role::Role,
    },
    service::invitation::InvitationService,
};

pub static INVITATION_TAG: &str = "invitation";

/// Invite a teacher, mentor, or parent to sign the statement form
///
/// Mails a token-gated link; the token is persisted only after the provider
/// accepts the message. Resending supersedes the previous link.
///
/// # Responses
/// - 200 (OK): Invitation sent
/// - 403 (Forbidden): Logged-in account is not a student
/// - 404 (Not Found): No student profile registered yet
/// - 500 (Internal Server Error): Email provider failure (previous link,
///   if any, stays valid)
#[utoipa::path(
    post,
    path = "/api/invitation/statement",
    tag = INVITATION_TAG,
    request_body = StatementInvitationDto,
    responses(
        (status = 200, description = "Invitation sent", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "No student profile", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_statement_invitation(
    State(state): State<AppState>,
    session: Session,
    Json(invitation): Json<StatementInvitationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Student).await?;

    let student = StudentRepository::new(&state.db)
        .get_by_user_id(user.id)
        .await?
        .ok_or(Error::NotFound("Student profile"))?;

    InvitationService::new(&state.db, &state.mailer, &state.base_url)
        .send_statement_invitation(
            &student,
            invitation.signer,
            &invitation.name,
            &invitation.email,
        )
        .await?;

    Ok(Json(SuccessDto::ok()))
}

/// Invite a parent to sign the photo release
///
/// Inviting a team member's parent puts their address on file, making that
/// signature required for overall completion.
///
/// # Responses
/// - 200 (OK): Invitation sent
/// - 403 (Forbidden): Logged-in account is not a student
/// - 404 (Not Found): No student profile registered yet
/// - 500 (Internal Server Error): Email provider failure
#[utoipa::path(
    post,
    path = "/api/invitation/photo-release",
    tag = INVITATION_TAG,
    request_body = PhotoReleaseInvitationDto,
    responses(
        (status = 200, description = "Invitation sent", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "No student profile", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_photo_release_invitation(
    State(state): State<AppState>,
    session: Session,
    Json(invitation): Json<PhotoReleaseInvitationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Student).await?;

    let student = StudentRepository::new(&state.db)
        .get_by_user_id(user.id)
        .await?
        .ok_or(Error::NotFound("Student profile"))?;

    InvitationService::new(&state.db, &state.mailer, &state.base_url)
        .send_photo_release_invitation(&student, invitation.signer, &invitation.email)
        .await?;

    Ok(Json(SuccessDto::ok()))
}

/// Invite the advisor's chaperone to confirm
///
/// Creates or replaces the chaperone contact on the advisor record, then
/// mails the confirmation link.
///
/// # Responses
/// - 200 (OK): Invitation sent
/// - 403 (Forbidden): Logged-in account is not an advisor
/// - 404 (Not Found): No advisor profile registered yet
/// - 500 (Internal Server Error): Email provider failure
#[utoipa::path(
    post,
    path = "/api/invitation/chaperone",
    tag = INVITATION_TAG,
    request_body = ChaperoneInvitationDto,
    responses(
        (status = 200, description = "Invitation sent", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "No advisor profile", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_chaperone_invitation(
    State(state): State<AppState>,
    session: Session,
    Json(invitation): Json<ChaperoneInvitationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Advisor).await?;

    let advisor = AdvisorRepository::new(&state.db)
        .get_by_user_id(user.id)
        .await?
        .ok_or(Error::NotFound("Advisor profile"))?;

    InvitationService::new(&state.db, &state.mailer, &state.base_url)
        .send_chaperone_invitation(
            &advisor,
            &invitation.name,
            &invitation.email,
            &invitation.phone,
        )
        .await?;

    Ok(Json(SuccessDto::ok()))
}
