use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    controller::util::access::require_user,
    error::Error,
    model::{
        api::{ErrorDto, SuccessDto},
        app::AppState,
        registry::{ChangeEmailDto, LoginDto, RegisterAccountDto, UserDto, VerifyEmailDto},
        session::user::SessionUserId,
    },
    service::account::AccountService,
};

pub static AUTH_TAG: &str = "auth";

fn user_dto(user: &entity::user::Model) -> Result<UserDto, Error> {
    UserDto::from_model(user)
        .ok_or_else(|| Error::ParseError(format!("Unknown role tag {:?}", user.role)))
}

/// Create an account and start a session for it
///
/// Accepts advisor, student, and judge roles; admin accounts are provisioned
/// outside the API. A verification code is mailed as part of registration.
///
/// # Responses
/// - 201 (Created): Account created; session established
/// - 400 (Bad Request): Role cannot self-register
/// - 409 (Conflict): An account already exists for the email
/// - 500 (Internal Server Error): Database or email provider failure
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterAccountDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Role cannot self-register", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(registration): Json<RegisterAccountDto>,
) -> Result<impl IntoResponse, Error> {
    let account_service = AccountService::new(&state.db, &state.mailer);

    let user = account_service
        .register(&registration.email, &registration.password, registration.role)
        .await?;

    SessionUserId::insert(&session, user.id).await?;

    Ok((StatusCode::CREATED, Json(user_dto(&user)?)))
}

/// Log in with email and password
///
/// # Responses
/// - 200 (OK): Session established; body carries the role's dashboard path
/// - 401 (Unauthorized): Credentials did not match an account
/// - 500 (Internal Server Error): Database or session store failure
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(credentials): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let account_service = AccountService::new(&state.db, &state.mailer);

    let user = account_service
        .login(&credentials.email, &credentials.password)
        .await?;

    SessionUserId::insert(&session, user.id).await?;

    Ok(Json(user_dto(&user)?))
}

/// Log out by clearing the session
///
/// # Responses
/// - 200 (OK): Session cleared (also for anonymous callers)
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = SuccessDto),
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    let maybe_user_id = SessionUserId::get(&session).await?;

    // Only clear when a user is actually in session; clearing a session that
    // was never stored errors in the session layer.
    if maybe_user_id.is_some() {
        session.clear().await;
    }

    Ok(Json(SuccessDto::ok()))
}

/// Get the logged-in account
///
/// # Responses
/// - 200 (OK): The account backing the current session
/// - 401 (Unauthorized): No session user
/// - 404 (Not Found): Session user no longer exists
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current account", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    Ok(Json(user_dto(&user)?))
}

/// Confirm the emailed verification code
///
/// # Responses
/// - 200 (OK): Email verified
/// - 400 (Bad Request): Code mismatch or expired
/// - 401 (Unauthorized): No session user
#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    tag = AUTH_TAG,
    request_body = VerifyEmailDto,
    responses(
        (status = 200, description = "Email verified", body = UserDto),
        (status = 400, description = "Code mismatch or expired", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn verify_email(
    State(state): State<AppState>,
    session: Session,
    Json(verification): Json<VerifyEmailDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let account_service = AccountService::new(&state.db, &state.mailer);
    let user = account_service.verify_email(&user, &verification.code).await?;

    Ok(Json(user_dto(&user)?))
}

/// Mail a fresh verification code
///
/// Invalidates the previously issued code.
///
/// # Responses
/// - 200 (OK): Code sent
/// - 401 (Unauthorized): No session user
/// - 500 (Internal Server Error): Email provider failure
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Code sent", body = SuccessDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resend_verification(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let account_service = AccountService::new(&state.db, &state.mailer);
    account_service.resend_verification(&user).await?;

    Ok(Json(SuccessDto::ok()))
}

/// Change an account's email address
///
/// Only the account owner or an admin may change an address. Verification
/// restarts for the new address.
///
/// # Responses
/// - 200 (OK): Email changed; verification code sent
/// - 401 (Unauthorized): No session user
/// - 403 (Forbidden): Caller is neither the owner nor an admin
/// - 404 (Not Found): Target user does not exist
/// - 409 (Conflict): Address already in use by another account
#[utoipa::path(
    post,
    path = "/api/auth/change-email",
    tag = AUTH_TAG,
    request_body = ChangeEmailDto,
    responses(
        (status = 200, description = "Email changed", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Forbidden", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto)
    ),
)]
pub async fn change_email(
    State(state): State<AppState>,
    session: Session,
    Json(change): Json<ChangeEmailDto>,
) -> Result<impl IntoResponse, Error> {
    let actor = require_user(&session, &state.db).await?;

    let account_service = AccountService::new(&state.db, &state.mailer);
    let user = account_service
        .change_email(&actor, change.user_id, &change.new_email)
        .await?;

    Ok(Json(user_dto(&user)?))
}
