use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    controller::util::access::require_role,
    data::advisor::AdvisorRepository,
    error::Error,
    model::{
        api::{ErrorDto, SuccessDto},
        app::AppState,
        registry::{AdvisorDashboardDto, AdvisorRegistrationDto, StatusUpdateDto},
        role::Role,
    },
    service::{
        approval::ApprovalService, dashboard::DashboardService,
        registration::RegistrationService,
    },
};

pub static ADVISOR_TAG: &str = "advisor";

/// Register the advisor profile for the logged-in account
///
/// Selects an existing school or creates a new one. The profile starts
/// pending admin approval.
///
/// # Responses
/// - 201 (Created): Profile created
/// - 400 (Bad Request): Missing or unknown school
/// - 403 (Forbidden): Logged-in account is not an advisor
/// - 409 (Conflict): Profile already exists
#[utoipa::path(
    post,
    path = "/api/advisor/register",
    tag = ADVISOR_TAG,
    request_body = AdvisorRegistrationDto,
    responses(
        (status = 201, description = "Profile created", body = SuccessDto),
        (status = 400, description = "Missing or unknown school", body = ErrorDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 409, description = "Profile already exists", body = ErrorDto)
    ),
)]
pub async fn register_advisor(
    State(state): State<AppState>,
    session: Session,
    Json(registration): Json<AdvisorRegistrationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Advisor).await?;

    RegistrationService::new(&state.db)
        .register_advisor(&user, registration)
        .await?;

    Ok((StatusCode::CREATED, Json(SuccessDto::ok())))
}

/// Advisor dashboard: profile, school, chaperone, and students
///
/// # Responses
/// - 200 (OK): Dashboard payload
/// - 403 (Forbidden): Logged-in account is not an advisor
/// - 404 (Not Found): No advisor profile registered yet
#[utoipa::path(
    get,
    path = "/api/advisor/dashboard",
    tag = ADVISOR_TAG,
    responses(
        (status = 200, description = "Dashboard payload", body = AdvisorDashboardDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "No advisor profile", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Advisor).await?;

    let dashboard = DashboardService::new(&state.db)
        .advisor_dashboard(&user)
        .await?;

    Ok(Json(dashboard))
}

/// Decide a student's registration
///
/// Only the student's own advisor may decide. Writes the status, then sends
/// one notification email to the student.
///
/// # Responses
/// - 200 (OK): Status written and notification attempted
/// - 403 (Forbidden): Student belongs to another advisor
/// - 404 (Not Found): Student does not exist
/// - 500 (Internal Server Error): Notification failed after the write
#[utoipa::path(
    post,
    path = "/api/advisor/students/{id}/status",
    tag = ADVISOR_TAG,
    params(("id" = i32, Path, description = "Student ID")),
    request_body = StatusUpdateDto,
    responses(
        (status = 200, description = "Status updated", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "Student not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_student_status(
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<i32>,
    Json(update): Json<StatusUpdateDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Advisor).await?;

    let advisor = AdvisorRepository::new(&state.db)
        .get_by_user_id(user.id)
        .await?
        .ok_or(Error::NotFound("Advisor profile"))?;

    ApprovalService::new(&state.db, &state.mailer)
        .set_student_status(&advisor, student_id, update.status)
        .await?;

    Ok(Json(SuccessDto::ok()))
}
