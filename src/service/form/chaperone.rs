use chrono::Utc;
use sea_orm::ConnectionTrait;

use crate::{
    data::{advisor::AdvisorRepository, chaperone::ChaperoneRepository},
    error::{form::FormError, Error},
    model::{
        form::{ChaperoneFormView, ChaperoneSignatureDto},
        token::{InvitePurpose, InviteToken},
    },
    service::form::verify_invitation,
};

/// Chaperone confirmation: a single signer attached to an advisor record.
pub struct ChaperoneFormService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChaperoneFormService<'a, C> {
    /// Creates a new instance of [`ChaperoneFormService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Token-gated read.
    pub async fn render(&self, raw_token: &str) -> Result<ChaperoneFormView, Error> {
        let (advisor, school_name, chaperone) = self.redeem(raw_token).await?;

        Ok(ChaperoneFormView {
            advisor_name: advisor.name,
            school_name,
            chaperone_name: chaperone.name,
            chaperone_email: chaperone.email,
        })
    }

    /// Token-gated write: the single party's confirmation is the form state.
    pub async fn sign(
        &self,
        raw_token: &str,
        submission: ChaperoneSignatureDto,
    ) -> Result<entity::chaperone::Model, Error> {
        let (_, _, chaperone) = self.redeem(raw_token).await?;

        ChaperoneRepository::new(self.db)
            .complete(chaperone.id, &submission.signature, Utc::now().naive_utc())
            .await?
            .ok_or(FormError::PartyNotFound.into())
    }

    async fn redeem(
        &self,
        raw_token: &str,
    ) -> Result<(entity::advisor::Model, String, entity::chaperone::Model), Error> {
        let token = InviteToken::parse(raw_token)?;

        if token.purpose != InvitePurpose::Chaperone {
            return Err(FormError::PurposeMismatch.into());
        }

        let (advisor, school) = AdvisorRepository::new(self.db)
            .get_with_school(token.subject_id)
            .await?
            .ok_or(FormError::SubjectNotFound)?;

        let chaperone = ChaperoneRepository::new(self.db)
            .get_by_advisor_id(advisor.id)
            .await?
            .ok_or(FormError::PartyNotFound)?;

        verify_invitation(
            chaperone.invite_token.as_deref(),
            raw_token,
            &token,
            Utc::now(),
        )?;

        let school_name = school.map(|school| school.name).unwrap_or_default();

        Ok((advisor, school_name, chaperone))
    }
}

#[cfg(test)]
mod tests {
    mod sign {
        use symposium_test_utils::prelude::*;

        use crate::{
            error::{form::FormError, Error},
            model::form::ChaperoneSignatureDto,
            service::{
                form::chaperone::ChaperoneFormService, invitation::InvitationService,
            },
        };

        async fn setup_with_invitation(
            test: &mut TestSetup,
        ) -> Result<(entity::advisor::Model, String), TestError> {
            let school = fixtures::insert_school(&test.state.db).await?;
            let user = fixtures::insert_user(&test.state.db, "a@example.org", "advisor").await?;
            let advisor =
                fixtures::insert_advisor(&test.state.db, user.id, school.id, "approved").await?;
            let _mock = mock_send_message_endpoint(&mut test.server, 1);

            let invitation_service = InvitationService::new(
                &test.state.db,
                &test.state.mailer,
                "http://localhost:8080",
            );
            let chaperone = invitation_service
                .send_chaperone_invitation(&advisor, "Pat Rivera", "pat@example.org", "555-0100")
                .await
                .unwrap();

            Ok((advisor, chaperone.invite_token.unwrap()))
        }

        /// Expect confirmation to be recorded with the signature date
        #[tokio::test]
        async fn records_confirmation() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, token) = setup_with_invitation(&mut test).await?;

            let chaperone_service = ChaperoneFormService::new(&test.state.db);

            let chaperone = chaperone_service
                .sign(
                    &token,
                    ChaperoneSignatureDto {
                        signature: "Pat Rivera".to_string(),
                    },
                )
                .await
                .unwrap();

            assert!(chaperone.confirmed);
            assert!(chaperone.signature_date.is_some());
            assert!(chaperone.invite_token.is_none());

            Ok(())
        }

        /// Expect a replay after confirmation to be refused
        #[tokio::test]
        async fn replay_after_confirmation_is_refused() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, token) = setup_with_invitation(&mut test).await?;

            let chaperone_service = ChaperoneFormService::new(&test.state.db);

            chaperone_service
                .sign(
                    &token,
                    ChaperoneSignatureDto {
                        signature: "Pat Rivera".to_string(),
                    },
                )
                .await
                .unwrap();

            let replay = chaperone_service.render(&token).await;

            assert!(matches!(
                replay,
                Err(Error::FormError(FormError::InvitationMismatch))
            ));

            Ok(())
        }
    }
}
