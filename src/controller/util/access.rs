//! Session-based access gating shared by the role-scoped controllers.

use sea_orm::ConnectionTrait;
use tower_sessions::Session;

use crate::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{role::Role, session::user::SessionUserId},
};

/// Resolves the logged-in account or fails with 401/404.
pub async fn require_user<C: ConnectionTrait>(
    session: &Session,
    db: &C,
) -> Result<entity::user::Model, Error> {
    let user_id = SessionUserId::get(session)
        .await?
        .ok_or(AuthError::UserNotInSession)?;

    let user = UserRepository::new(db)
        .get(user_id)
        .await?
        .ok_or(AuthError::UserNotInDatabase(user_id))?;

    Ok(user)
}

/// Resolves the logged-in account and requires an exact role.
pub async fn require_role<C: ConnectionTrait>(
    session: &Session,
    db: &C,
    role: Role,
) -> Result<entity::user::Model, Error> {
    let user = require_user(session, db).await?;

    if Role::parse(&user.role) != Some(role) {
        return Err(AuthError::RoleForbidden.into());
    }

    Ok(user)
}

/// Resolves the logged-in account and requires a director or manager.
pub async fn require_admin<C: ConnectionTrait>(
    session: &Session,
    db: &C,
) -> Result<entity::user::Model, Error> {
    let user = require_user(session, db).await?;

    let is_admin = Role::parse(&user.role)
        .map(|role| role.is_admin())
        .unwrap_or(false);

    if !is_admin {
        return Err(AuthError::RoleForbidden.into());
    }

    Ok(user)
}
