use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::model::role::Role;

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new account. Email verification starts unconfirmed.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<entity::user::Model, DbErr> {
        let user = entity::user::ActiveModel {
            email: ActiveValue::Set(email.to_string()),
            password_hash: ActiveValue::Set(password_hash.to_string()),
            role: ActiveValue::Set(role.as_str().to_string()),
            email_verified: ActiveValue::Set(false),
            verification_code: ActiveValue::Set(None),
            verification_code_expiry: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Stores a fresh verification code and its expiry.
    pub async fn set_verification_code(
        &self,
        user_id: i32,
        code: &str,
        expiry: NaiveDateTime,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let user = match entity::prelude::User::find_by_id(user_id).one(self.db).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        user_am.verification_code = ActiveValue::Set(Some(code.to_string()));
        user_am.verification_code_expiry = ActiveValue::Set(Some(expiry));

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    /// Marks the email verified and clears the code.
    pub async fn mark_verified(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let user = match entity::prelude::User::find_by_id(user_id).one(self.db).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        user_am.email_verified = ActiveValue::Set(true);
        user_am.verification_code = ActiveValue::Set(None);
        user_am.verification_code_expiry = ActiveValue::Set(None);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }

    /// Replaces the account email; verification state resets until the new
    /// address is confirmed.
    pub async fn update_email(
        &self,
        user_id: i32,
        new_email: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let user = match entity::prelude::User::find_by_id(user_id).one(self.db).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        user_am.email = ActiveValue::Set(new_email.to_string());
        user_am.email_verified = ActiveValue::Set(false);
        user_am.verification_code = ActiveValue::Set(None);
        user_am.verification_code_expiry = ActiveValue::Set(None);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }
}
