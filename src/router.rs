//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their utoipa specifications,
//! which are collected into a unified OpenAPI document. Swagger UI serves
//! interactive documentation at `/api/docs`.

use axum::{extract::DefaultBodyLimit, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller, model::app::AppState};

/// Request body ceiling; slide uploads are the largest accepted payload.
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Builds the application's HTTP router with all API endpoints and Swagger
/// UI documentation.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Symposium", description = "Symposium registration API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Account and session routes"),
        (name = controller::school::SCHOOL_TAG, description = "School reference list"),
        (name = controller::advisor::ADVISOR_TAG, description = "Advisor registration and dashboard"),
        (name = controller::student::STUDENT_TAG, description = "Student registration, materials, and dashboard"),
        (name = controller::judge::JUDGE_TAG, description = "Judge registration and dashboard"),
        (name = controller::admin::ADMIN_TAG, description = "Administrator decisions and dashboard"),
        (name = controller::invitation::INVITATION_TAG, description = "Signature invitation routes"),
        (name = controller::form::FORM_TAG, description = "Token-gated signature forms"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::auth::verify_email))
        .routes(routes!(controller::auth::resend_verification))
        .routes(routes!(controller::auth::change_email))
        .routes(routes!(controller::school::list_schools))
        .routes(routes!(controller::advisor::register_advisor))
        .routes(routes!(controller::advisor::dashboard))
        .routes(routes!(controller::advisor::set_student_status))
        .routes(routes!(controller::student::register_student))
        .routes(routes!(controller::student::dashboard))
        .routes(routes!(controller::student::upload_material))
        .routes(routes!(controller::student::sign_statement))
        .routes(routes!(controller::judge::register_judge))
        .routes(routes!(controller::judge::dashboard))
        .routes(routes!(controller::admin::dashboard))
        .routes(routes!(controller::admin::set_advisor_status))
        .routes(routes!(controller::admin::set_judge_status))
        .routes(routes!(controller::admin::set_src_review))
        .routes(routes!(controller::admin::set_payment_status))
        .routes(routes!(controller::invitation::send_statement_invitation))
        .routes(routes!(controller::invitation::send_photo_release_invitation))
        .routes(routes!(controller::invitation::send_chaperone_invitation))
        .routes(routes!(
            controller::form::get_statement_form,
            controller::form::post_statement_form
        ))
        .routes(routes!(
            controller::form::get_photo_release_form,
            controller::form::post_photo_release_form
        ))
        .routes(routes!(
            controller::form::get_chaperone_form,
            controller::form::post_chaperone_form
        ))
        .split_for_parts();

    let routes = routes
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    routes
}
