use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::ConnectionTrait;

use crate::{
    data::user::UserRepository,
    error::{auth::AuthError, registration::RegistrationError, Error},
    model::role::Role,
    service::notification::NotificationService,
    util::password::{hash_password, verify_password},
};

/// Minutes an email verification code stays valid.
pub const VERIFICATION_CODE_TTL_MINUTES: i64 = 15;

/// Account lifecycle: registration, login, email verification, email change.
pub struct AccountService<'a, C: ConnectionTrait> {
    db: &'a C,
    mailer: &'a mailer::Client,
}

impl<'a, C: ConnectionTrait> AccountService<'a, C> {
    /// Creates a new instance of [`AccountService`]
    pub fn new(db: &'a C, mailer: &'a mailer::Client) -> Self {
        Self { db, mailer }
    }

    /// Creates an account and mails its first verification code.
    ///
    /// The account row is written first; the code is only persisted after the
    /// provider accepts the email, so a failed send leaves an account that
    /// can request a resend rather than a code that was never delivered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<entity::user::Model, Error> {
        if !role.self_registrable() {
            return Err(RegistrationError::RoleNotRegistrable.into());
        }

        let user_repository = UserRepository::new(self.db);

        if user_repository.get_by_email(email).await?.is_some() {
            return Err(RegistrationError::EmailTaken.into());
        }

        let password_hash = hash_password(password)?;
        let user = user_repository.create(email, &password_hash, role).await?;

        self.issue_verification_code(&user).await?;

        Ok(user)
    }

    /// Verifies credentials and returns the account.
    pub async fn login(&self, email: &str, password: &str) -> Result<entity::user::Model, Error> {
        let user_repository = UserRepository::new(self.db);

        let user = user_repository
            .get_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Confirms the emailed code; the code must match and be unexpired.
    pub async fn verify_email(
        &self,
        user: &entity::user::Model,
        code: &str,
    ) -> Result<entity::user::Model, Error> {
        let stored = user
            .verification_code
            .as_deref()
            .ok_or(AuthError::VerificationFailed)?;
        let expiry = user
            .verification_code_expiry
            .ok_or(AuthError::VerificationFailed)?;

        if stored != code || Utc::now().naive_utc() > expiry {
            return Err(AuthError::VerificationFailed.into());
        }

        let user_repository = UserRepository::new(self.db);
        let user = user_repository
            .mark_verified(user.id)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user.id))?;

        Ok(user)
    }

    /// Mails a fresh verification code, invalidating the previous one.
    pub async fn resend_verification(&self, user: &entity::user::Model) -> Result<(), Error> {
        self.issue_verification_code(user).await
    }

    /// Changes the account email and restarts verification for it.
    ///
    /// Only the account owner or an admin may change an address.
    pub async fn change_email(
        &self,
        actor: &entity::user::Model,
        user_id: i32,
        new_email: &str,
    ) -> Result<entity::user::Model, Error> {
        let actor_role = parse_role(&actor.role)?;
        if actor.id != user_id && !actor_role.is_admin() {
            return Err(AuthError::NotOwner.into());
        }

        let user_repository = UserRepository::new(self.db);

        if let Some(existing) = user_repository.get_by_email(new_email).await? {
            if existing.id != user_id {
                return Err(RegistrationError::EmailTaken.into());
            }
        }

        let user = user_repository
            .update_email(user_id, new_email)
            .await?
            .ok_or(Error::NotFound("User"))?;

        self.issue_verification_code(&user).await?;

        Ok(user)
    }

    /// Generates a code, mails it, then persists it. The stored code is only
    /// replaced once the provider has accepted the message.
    async fn issue_verification_code(&self, user: &entity::user::Model) -> Result<(), Error> {
        let code = format!("{:06}", rand::rng().random_range(0..1_000_000));
        let expiry =
            Utc::now().naive_utc() + Duration::minutes(VERIFICATION_CODE_TTL_MINUTES);

        NotificationService::new(self.mailer)
            .send_verification_code(&user.email, &code)
            .await?;

        UserRepository::new(self.db)
            .set_verification_code(user.id, &code, expiry)
            .await?
            .ok_or(AuthError::UserNotInDatabase(user.id))?;

        Ok(())
    }
}

pub(crate) fn parse_role(value: &str) -> Result<Role, Error> {
    Role::parse(value).ok_or_else(|| Error::ParseError(format!("Unknown role tag {:?}", value)))
}

#[cfg(test)]
mod tests {
    mod register {
        use symposium_test_utils::prelude::*;

        use crate::{
            error::{registration::RegistrationError, Error},
            model::role::Role,
            service::account::AccountService,
        };

        /// Expect success with a verification email sent and code persisted
        #[tokio::test]
        async fn creates_account_and_mails_code() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::User)?;
            let mock = mock_send_message_endpoint(&mut test.server, 1);

            let account_service = AccountService::new(&test.state.db, &test.state.mailer);

            let result = account_service
                .register("student@example.org", "hunter2hunter2", Role::Student)
                .await;

            assert!(result.is_ok());
            mock.assert();

            let user_repo = crate::data::user::UserRepository::new(&test.state.db);
            let user = user_repo
                .get_by_email("student@example.org")
                .await?
                .unwrap();

            assert!(user.verification_code.is_some());
            assert!(user.verification_code_expiry.is_some());

            Ok(())
        }

        /// Expect rejection of admin roles through public registration
        #[tokio::test]
        async fn rejects_admin_roles() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::User)?;
            let account_service = AccountService::new(&test.state.db, &test.state.mailer);

            let result = account_service
                .register("boss@example.org", "hunter2hunter2", Role::Director)
                .await;

            assert!(matches!(
                result,
                Err(Error::RegistrationError(
                    RegistrationError::RoleNotRegistrable
                ))
            ));

            Ok(())
        }

        /// Expect conflict for a duplicate email
        #[tokio::test]
        async fn rejects_duplicate_email() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::User)?;
            let _mock = mock_send_message_endpoint(&mut test.server, 1);

            let account_service = AccountService::new(&test.state.db, &test.state.mailer);

            account_service
                .register("student@example.org", "hunter2hunter2", Role::Student)
                .await
                .unwrap();
            let result = account_service
                .register("student@example.org", "different-pass", Role::Judge)
                .await;

            assert!(matches!(
                result,
                Err(Error::RegistrationError(RegistrationError::EmailTaken))
            ));

            Ok(())
        }

        /// Expect no code persisted when the provider rejects the send
        #[tokio::test]
        async fn failed_send_leaves_no_code() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::User)?;
            let _mock =
                symposium_test_utils::mock::mock_send_message_failure_endpoint(&mut test.server, 1);

            let account_service = AccountService::new(&test.state.db, &test.state.mailer);

            let result = account_service
                .register("student@example.org", "hunter2hunter2", Role::Student)
                .await;

            assert!(result.is_err());

            let user_repo = crate::data::user::UserRepository::new(&test.state.db);
            let user = user_repo
                .get_by_email("student@example.org")
                .await?
                .unwrap();

            assert!(user.verification_code.is_none());

            Ok(())
        }
    }

    mod login {
        use symposium_test_utils::prelude::*;

        use crate::{
            error::{auth::AuthError, Error},
            model::role::Role,
            service::account::AccountService,
        };

        /// Expect success with correct credentials
        #[tokio::test]
        async fn accepts_correct_password() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::User)?;
            let _mock = mock_send_message_endpoint(&mut test.server, 1);

            let account_service = AccountService::new(&test.state.db, &test.state.mailer);
            account_service
                .register("judge@example.org", "hunter2hunter2", Role::Judge)
                .await
                .unwrap();

            let result = account_service
                .login("judge@example.org", "hunter2hunter2")
                .await;

            assert!(result.is_ok());

            Ok(())
        }

        /// Expect invalid-credentials error for a wrong password
        #[tokio::test]
        async fn rejects_wrong_password() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::User)?;
            let _mock = mock_send_message_endpoint(&mut test.server, 1);

            let account_service = AccountService::new(&test.state.db, &test.state.mailer);
            account_service
                .register("judge@example.org", "hunter2hunter2", Role::Judge)
                .await
                .unwrap();

            let result = account_service.login("judge@example.org", "wrong").await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::InvalidCredentials))
            ));

            Ok(())
        }
    }

    mod verify_email {
        use symposium_test_utils::prelude::*;

        use crate::{model::role::Role, service::account::AccountService};

        /// Expect verification to succeed with the persisted code
        #[tokio::test]
        async fn accepts_stored_code() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::User)?;
            let _mock = mock_send_message_endpoint(&mut test.server, 1);

            let account_service = AccountService::new(&test.state.db, &test.state.mailer);
            let user = account_service
                .register("student@example.org", "hunter2hunter2", Role::Student)
                .await
                .unwrap();

            let user_repo = crate::data::user::UserRepository::new(&test.state.db);
            let stored = user_repo.get(user.id).await?.unwrap();
            let code = stored.verification_code.clone().unwrap();

            let verified = account_service.verify_email(&stored, &code).await.unwrap();

            assert!(verified.email_verified);
            assert!(verified.verification_code.is_none());

            Ok(())
        }

        /// Expect failure for a wrong code
        #[tokio::test]
        async fn rejects_wrong_code() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::User)?;
            let _mock = mock_send_message_endpoint(&mut test.server, 1);

            let account_service = AccountService::new(&test.state.db, &test.state.mailer);
            let user = account_service
                .register("student@example.org", "hunter2hunter2", Role::Student)
                .await
                .unwrap();

            let user_repo = crate::data::user::UserRepository::new(&test.state.db);
            let stored = user_repo.get(user.id).await?.unwrap();

            let result = account_service.verify_email(&stored, "000000").await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod change_email {
        use symposium_test_utils::prelude::*;

        use crate::{
            error::{auth::AuthError, Error},
            service::account::AccountService,
        };

        /// Expect a non-owner, non-admin caller to be refused
        #[tokio::test]
        async fn rejects_other_users() -> Result<(), TestError> {
            let test = test_setup_with_tables!(entity::prelude::User)?;

            let actor = fixtures::insert_user(&test.state.db, "a@example.org", "student").await?;
            let target = fixtures::insert_user(&test.state.db, "b@example.org", "student").await?;

            let account_service = AccountService::new(&test.state.db, &test.state.mailer);

            let result = account_service
                .change_email(&actor, target.id, "c@example.org")
                .await;

            assert!(matches!(result, Err(Error::AuthError(AuthError::NotOwner))));

            Ok(())
        }

        /// Expect an admin to change any account's email
        #[tokio::test]
        async fn allows_admin() -> Result<(), TestError> {
            let mut test = test_setup_with_tables!(entity::prelude::User)?;
            let mock = mock_send_message_endpoint(&mut test.server, 1);

            let admin = fixtures::insert_user(&test.state.db, "d@example.org", "director").await?;
            let target = fixtures::insert_user(&test.state.db, "b@example.org", "student").await?;

            let account_service = AccountService::new(&test.state.db, &test.state.mailer);

            let updated = account_service
                .change_email(&admin, target.id, "renamed@example.org")
                .await
                .unwrap();

            assert_eq!(updated.email, "renamed@example.org");
            assert!(!updated.email_verified);
            mock.assert();

            Ok(())
        }
    }
}
