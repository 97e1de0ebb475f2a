use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    controller::util::access::require_role,
    data::student::StudentRepository,
    error::{upload::UploadError, Error},
    model::{
        api::{ErrorDto, SuccessDto},
        app::AppState,
        form::StudentStatementSignatureDto,
        material::MaterialKind,
        registry::{StudentDashboardDto, StudentRegistrationDto, UploadResponseDto},
        role::Role,
    },
    service::{
        dashboard::DashboardService, form::statement::StatementFormService,
        registration::RegistrationService, submission::SubmissionService,
    },
};

pub static STUDENT_TAG: &str = "student";

async fn require_student_profile(
    state: &AppState,
    session: &Session,
) -> Result<entity::student::Model, Error> {
    let user = require_role(session, &state.db, Role::Student).await?;

    StudentRepository::new(&state.db)
        .get_by_user_id(user.id)
        .await?
        .ok_or(Error::NotFound("Student profile"))
}

/// Register the student profile for the logged-in account
///
/// The selected advisor must exist and be registered at the selected school.
/// The profile starts pending the advisor's approval.
///
/// # Responses
/// - 201 (Created): Profile created
/// - 400 (Bad Request): Unknown school/advisor or mismatched pairing
/// - 403 (Forbidden): Logged-in account is not a student
/// - 409 (Conflict): Profile already exists
#[utoipa::path(
    post,
    path = "/api/student/register",
    tag = STUDENT_TAG,
    request_body = StudentRegistrationDto,
    responses(
        (status = 201, description = "Profile created", body = SuccessDto),
        (status = 400, description = "Invalid school/advisor selection", body = ErrorDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 409, description = "Profile already exists", body = ErrorDto)
    ),
)]
pub async fn register_student(
    State(state): State<AppState>,
    session: Session,
    Json(registration): Json<StudentRegistrationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Student).await?;

    RegistrationService::new(&state.db)
        .register_student(&user, registration)
        .await?;

    Ok((StatusCode::CREATED, Json(SuccessDto::ok())))
}

/// Student dashboard: registration, materials, and form state
///
/// # Responses
/// - 200 (OK): Dashboard payload
/// - 403 (Forbidden): Logged-in account is not a student
/// - 404 (Not Found): No student profile registered yet
#[utoipa::path(
    get,
    path = "/api/student/dashboard",
    tag = STUDENT_TAG,
    responses(
        (status = 200, description = "Dashboard payload", body = StudentDashboardDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "No student profile", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_role(&session, &state.db, Role::Student).await?;

    let dashboard = DashboardService::new(&state.db)
        .student_dashboard(&user)
        .await?;

    Ok(Json(dashboard))
}

/// Upload a submission material
///
/// Kind is one of research-plan, abstract, slideshow, presentation,
/// research-report. Validated by extension and size ceiling, stored under
/// the student's directory. Re-uploading the research plan after signatures
/// were collected clears every statement-form signature.
///
/// # Responses
/// - 200 (OK): Stored; body carries the recorded location
/// - 400 (Bad Request): Unknown kind, missing file, bad extension, too large
/// - 403 (Forbidden): Logged-in account is not a student
/// - 404 (Not Found): No student profile registered yet
#[utoipa::path(
    post,
    path = "/api/student/materials/{kind}",
    tag = STUDENT_TAG,
    params(("kind" = String, Path, description = "Material kind")),
    responses(
        (status = 200, description = "Material stored", body = UploadResponseDto),
        (status = 400, description = "Invalid upload", body = ErrorDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "No student profile", body = ErrorDto)
    ),
)]
pub async fn upload_material(
    State(state): State<AppState>,
    session: Session,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let student = require_student_profile(&state, &session).await?;

    let kind = MaterialKind::parse(&kind).ok_or(UploadError::UnknownKind(kind))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .ok_or(UploadError::MissingFile)?
            .to_string();
        let bytes = field.bytes().await?;

        let url = SubmissionService::new(&state.db, &state.upload_dir)
            .store_material(&student, kind, &file_name, &bytes)
            .await?;

        return Ok(Json(UploadResponseDto { url }));
    }

    Err(UploadError::MissingFile.into())
}

/// Sign the student's own part of the statement form
///
/// # Responses
/// - 200 (OK): Signature recorded; completion re-derived
/// - 403 (Forbidden): Logged-in account is not a student
/// - 404 (Not Found): No student profile registered yet
#[utoipa::path(
    post,
    path = "/api/student/statement/sign",
    tag = STUDENT_TAG,
    request_body = StudentStatementSignatureDto,
    responses(
        (status = 200, description = "Signature recorded", body = SuccessDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "No student profile", body = ErrorDto)
    ),
)]
pub async fn sign_statement(
    State(state): State<AppState>,
    session: Session,
    Json(submission): Json<StudentStatementSignatureDto>,
) -> Result<impl IntoResponse, Error> {
    let student = require_student_profile(&state, &session).await?;

    StatementFormService::new(&state.db)
        .sign_as_student(&student, &submission.signature)
        .await?;

    Ok(Json(SuccessDto::ok()))
}
