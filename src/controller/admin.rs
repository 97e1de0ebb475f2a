use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    controller::util::access::require_admin,
    error::Error,
    model::{
        api::{ErrorDto, SuccessDto},
        app::AppState,
        registry::{AdminDashboardDto, PaymentUpdateDto, SrcReviewDto, StatusUpdateDto},
    },
    service::{approval::ApprovalService, dashboard::DashboardService},
};

pub static ADMIN_TAG: &str = "admin";

/// Admin dashboard: advisor and judge listings with pending counts
///
/// # Responses
/// - 200 (OK): Dashboard payload
/// - 403 (Forbidden): Caller is not a director or manager
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Dashboard payload", body = AdminDashboardDto),
        (status = 403, description = "Forbidden", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    require_admin(&session, &state.db).await?;

    let dashboard = DashboardService::new(&state.db).admin_dashboard().await?;

    Ok(Json(dashboard))
}

/// Decide an advisor's registration
///
/// Writes the status, then sends one notification email to the advisor.
///
/// # Responses
/// - 200 (OK): Status written and notification attempted
/// - 403 (Forbidden): Caller is not a director or manager
/// - 404 (Not Found): Advisor does not exist
/// - 500 (Internal Server Error): Notification failed after the write
#[utoipa::path(
    post,
    path = "/api/admin/advisors/{id}/status",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Advisor ID")),
    request_body = StatusUpdateDto,
    responses(
        (status = 200, description = "Status updated", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "Advisor not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_advisor_status(
    State(state): State<AppState>,
    session: Session,
    Path(advisor_id): Path<i32>,
    Json(update): Json<StatusUpdateDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&session, &state.db).await?;

    ApprovalService::new(&state.db, &state.mailer)
        .set_advisor_status(advisor_id, update.status)
        .await?;

    Ok(Json(SuccessDto::ok()))
}

/// Decide a judge's registration
///
/// Writes the status, then sends one notification email to the judge.
///
/// # Responses
/// - 200 (OK): Status written and notification attempted
/// - 403 (Forbidden): Caller is not a director or manager
/// - 404 (Not Found): Judge does not exist
/// - 500 (Internal Server Error): Notification failed after the write
#[utoipa::path(
    post,
    path = "/api/admin/judges/{id}/status",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Judge ID")),
    request_body = StatusUpdateDto,
    responses(
        (status = 200, description = "Status updated", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "Judge not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_judge_status(
    State(state): State<AppState>,
    session: Session,
    Path(judge_id): Path<i32>,
    Json(update): Json<StatusUpdateDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&session, &state.db).await?;

    ApprovalService::new(&state.db, &state.mailer)
        .set_judge_status(judge_id, update.status)
        .await?;

    Ok(Json(SuccessDto::ok()))
}

/// Record the special review committee's decision for a student
///
/// Independent of the student's main status; no notification is sent.
///
/// # Responses
/// - 200 (OK): Decision recorded
/// - 403 (Forbidden): Caller is not a director or manager
/// - 404 (Not Found): Student does not exist
#[utoipa::path(
    post,
    path = "/api/admin/students/{id}/src-review",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Student ID")),
    request_body = SrcReviewDto,
    responses(
        (status = 200, description = "Decision recorded", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "Student not found", body = ErrorDto)
    ),
)]
pub async fn set_src_review(
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<i32>,
    Json(review): Json<SrcReviewDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&session, &state.db).await?;

    ApprovalService::new(&state.db, &state.mailer)
        .set_src_review(student_id, review.decision)
        .await?;

    Ok(Json(SuccessDto::ok()))
}

/// Record a student's payment state
///
/// # Responses
/// - 200 (OK): Payment state recorded
/// - 403 (Forbidden): Caller is not a director or manager
/// - 404 (Not Found): Student does not exist
#[utoipa::path(
    post,
    path = "/api/admin/students/{id}/payment",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Student ID")),
    request_body = PaymentUpdateDto,
    responses(
        (status = 200, description = "Payment state recorded", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "Student not found", body = ErrorDto)
    ),
)]
pub async fn set_payment_status(
    State(state): State<AppState>,
    session: Session,
    Path(student_id): Path<i32>,
    Json(update): Json<PaymentUpdateDto>,
) -> Result<impl IntoResponse, Error> {
    require_admin(&session, &state.db).await?;

    ApprovalService::new(&state.db, &state.mailer)
        .set_payment_status(student_id, update.payment_status)
        .await?;

    Ok(Json(SuccessDto::ok()))
}
