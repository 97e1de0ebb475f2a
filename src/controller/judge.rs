use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    controller::util::access::require_role,
    error::Error,
    model::{
        api::{ErrorDto, SuccessDto},
        app::AppState,
        registry::{JudgeDashboardDto, JudgeRegistrationDto},
        role::Role,
    },
    service::{dashboard::DashboardService, registration::RegistrationService},
};

pub static JUDGE_TAG: &str = "judge";

/// Register the judge profile for the logged-in account
///
/// The profile starts pending admin approval.
///
/// # Responses
/// - 201 (Created): Profile created
/// - 403 (Forbidden): Logged-in account is not a judge
/// - 409 (Conflict): Profile already exists
#[utoipa::path(
    post,
    path = "/api/judge/register",
    tag = JUDGE_TAG,
    request_body = JudgeRegistrationDto,
    responses(
        (status = 201, description = "Profile created", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 409, description = "Profile already exists", body = ErrorDto)
    ),
)]
pub async fn register_judge(
    State(state): State<AppState>,
    session: Session,
    Json(registration): Json<JudgeRegistrationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Judge).await?;

    RegistrationService::new(&state.db)
        .register_judge(&user, registration)
        .await?;

    Ok((StatusCode::CREATED, Json(SuccessDto::ok())))
}

/// Judge dashboard: profile and approval state
///
/// # Responses
/// - 200 (OK): Dashboard payload
/// - 403 (Forbidden): Logged-in account is not a judge
/// - 404 (Not Found): No judge profile registered yet
#[utoipa::path(
    get,
    path = "/api/judge/dashboard",
    tag = JUDGE_TAG,
    responses(
        (status = 200, description = "Dashboard payload", body = JudgeDashboardDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "No judge profile", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Judge).await?;

    let dashboard = DashboardService::new(&state.db).judge_dashboard(&user).await?;

    Ok(Json(dashboard))
}
