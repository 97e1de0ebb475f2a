use chrono::Utc;
use sea_orm::ConnectionTrait;

use crate::{
    data::{statement::StatementFormRepository, student::StudentRepository},
    error::{form::FormError, Error},
    model::{
        form::{
            StatementFormDto, StatementFormView, StatementPartyStateDto, StatementSignatureDto,
        },
        token::InviteToken,
    },
    service::form::verify_invitation,
};

/// Statement of outside assistance: signed by the student while logged in
/// and by at least one invited teacher, mentor, or parent.
pub struct StatementFormService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StatementFormService<'a, C> {
    /// Creates a new instance of [`StatementFormService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Token-gated read: returns only the fields a signer needs to render
    /// the form.
    pub async fn render(&self, raw_token: &str) -> Result<StatementFormView, Error> {
        let (student, _, party) = self.redeem(raw_token).await?;

        Ok(StatementFormView {
            student_name: student.name,
            project_title: student.project_title,
            party: party.party,
            party_name: party.name,
            party_email: party.email,
            comments: party.comments,
        })
    }

    /// Token-gated write: merges the signer's submission, marks their party
    /// completed, and re-derives the overall completion flag.
    pub async fn sign(
        &self,
        raw_token: &str,
        submission: StatementSignatureDto,
    ) -> Result<entity::statement_form::Model, Error> {
        let (_, form, party) = self.redeem(raw_token).await?;

        StatementFormRepository::new(self.db)
            .complete_party(
                party.id,
                &submission.signature,
                submission.comments.as_deref(),
                Utc::now().naive_utc(),
            )
            .await?
            .ok_or(FormError::PartyNotFound)?;

        self.recompute_completion(form.id).await
    }

    /// The student's own signature, collected while logged in.
    pub async fn sign_as_student(
        &self,
        student: &entity::student::Model,
        signature: &str,
    ) -> Result<entity::statement_form::Model, Error> {
        let statement_repository = StatementFormRepository::new(self.db);

        let form = statement_repository.get_or_create(student.id).await?;
        statement_repository
            .set_student_signature(form.id, signature, Utc::now().naive_utc())
            .await?
            .ok_or(Error::NotFound("Statement form"))?;

        self.recompute_completion(form.id).await
    }

    /// Overall completion: the student has signed AND at least one of
    /// teacher, mentor, or parent has signed.
    pub async fn recompute_completion(
        &self,
        form_id: i32,
    ) -> Result<entity::statement_form::Model, Error> {
        let statement_repository = StatementFormRepository::new(self.db);

        let form = statement_repository
            .get(form_id)
            .await?
            .ok_or(Error::NotFound("Statement form"))?;
        let parties = statement_repository.parties(form_id).await?;

        let third_party_signed = parties.iter().any(|party| party.completed);
        let completed = form.student_completed && third_party_signed;

        if completed == form.completed {
            return Ok(form);
        }

        statement_repository
            .set_completed(form_id, completed)
            .await?
            .ok_or(Error::NotFound("Statement form"))
    }

    /// Invalidation handler for the replaced-plan event: clears every
    /// signature and completion flag previously collected for the old plan.
    pub async fn invalidate_signatures(&self, student_id: i32) -> Result<(), Error> {
        let statement_repository = StatementFormRepository::new(self.db);

        if let Some(form) = statement_repository.get_by_student_id(student_id).await? {
            statement_repository.reset_signatures(form.id).await?;
        }

        Ok(())
    }

    /// Form state for the student and advisor dashboards.
    pub async fn dto_for_student(
        &self,
        student_id: i32,
    ) -> Result<Option<StatementFormDto>, Error> {
        let statement_repository = StatementFormRepository::new(self.db);

        let form = match statement_repository.get_by_student_id(student_id).await? {
            Some(form) => form,
            None => return Ok(None),
        };
        let parties = statement_repository.parties(form.id).await?;

        Ok(Some(StatementFormDto {
            student_completed: form.student_completed,
            completed: form.completed,
            parties: parties
                .into_iter()
                .map(|party| StatementPartyStateDto {
                    party: party.party,
                    name: party.name,
                    email: party.email,
                    invite_sent: party.invite_sent,
                    completed: party.completed,
                    signature_date: party.signature_date,
                })
                .collect(),
        }))
    }

    /// Common redemption procedure for GET and POST: parse, look up, match.
    async fn redeem(
        &self,
        raw_token: &str,
    ) -> Result<
        (
            entity::student::Model,
            entity::statement_form::Model,
            entity::statement_party::Model,
        ),
        Error,
    > {
        let token = InviteToken::parse(raw_token)?;

        if !token.purpose.is_statement_party() {
            return Err(FormError::PurposeMismatch.into());
        }

        let student = StudentRepository::new(self.db)
            .get(token.subject_id)
            .await?
            .ok_or(FormError::SubjectNotFound)?;

        let statement_repository = StatementFormRepository::new(self.db);
        let form = statement_repository
            .get_by_student_id(student.id)
            .await?
            .ok_or(FormError::PartyNotFound)?;
        let party = statement_repository
            .get_party(form.id, token.purpose)
            .await?
            .ok_or(FormError::PartyNotFound)?;

        verify_invitation(party.invite_token.as_deref(), raw_token, &token, Utc::now())?;

        Ok((student, form, party))
    }
}

#[cfg(test)]
mod tests {
    use symposium_test_utils::prelude::*;

    use crate::{
        model::form::StatementSigner,
        service::invitation::InvitationService,
    };

    /// Inserts a student with a mailed teacher invitation and returns the
    /// student and the raw token.
    async fn setup_with_invited_teacher(
        test: &mut TestSetup,
    ) -> Result<(entity::student::Model, String), TestError> {
        let (_, _, student) =
            fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
        let _mock = mock_send_message_endpoint(&mut test.server, 1);

        let invitation_service =
            InvitationService::new(&test.state.db, &test.state.mailer, "http://localhost:8080");
        let party = invitation_service
            .send_statement_invitation(
                &student,
                StatementSigner::Teacher,
                "T. Teach",
                "teacher@example.org",
            )
            .await
            .unwrap();

        Ok((student, party.invite_token.unwrap()))
    }

    mod render {
        use symposium_test_utils::prelude::*;

        use super::setup_with_invited_teacher;
        use crate::{
            error::{form::FormError, Error},
            service::form::statement::StatementFormService,
        };

        /// Expect only render-relevant fields for a valid token
        #[tokio::test]
        async fn returns_form_view_for_valid_token() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (student, token) = setup_with_invited_teacher(&mut test).await?;

            let statement_service = StatementFormService::new(&test.state.db);

            let view = statement_service.render(&token).await.unwrap();

            assert_eq!(view.student_name, student.name);
            assert_eq!(view.party, "teacher");
            assert_eq!(view.party_email, "teacher@example.org");

            Ok(())
        }

        /// Expect malformed tokens to fail before any lookup
        #[tokio::test]
        async fn rejects_malformed_token_without_lookup() -> Result<(), TestError> {
            // No tables created: a data-store lookup would error, so reaching
            // MalformedToken proves the request was rejected first.
            let test = test_setup_with_tables!()?;

            let statement_service = StatementFormService::new(&test.state.db);

            let result = statement_service.render("42_teacher").await;

            assert!(matches!(
                result,
                Err(Error::FormError(FormError::MalformedToken))
            ));

            Ok(())
        }

        /// Expect a chaperone token to be refused by the statement endpoint
        #[tokio::test]
        async fn rejects_foreign_purpose() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let statement_service = StatementFormService::new(&test.state.db);

            let result = statement_service
                .render("1_chaperone_1700000000_abcdefghijkl")
                .await;

            assert!(matches!(
                result,
                Err(Error::FormError(FormError::PurposeMismatch))
            ));

            Ok(())
        }

        /// Expect an unknown subject id to 404
        #[tokio::test]
        async fn rejects_unknown_subject() -> Result<(), TestError> {
            let test = test_setup_with_app_tables!()?;

            let statement_service = StatementFormService::new(&test.state.db);

            let result = statement_service
                .render("999_teacher_1700000000_abcdefghijkl")
                .await;

            assert!(matches!(
                result,
                Err(Error::FormError(FormError::SubjectNotFound))
            ));

            Ok(())
        }

        /// Expect a superseded token to be refused after a resend
        #[tokio::test]
        async fn resend_invalidates_previous_link() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (student, first_token) = setup_with_invited_teacher(&mut test).await?;
            let _mock = mock_send_message_endpoint(&mut test.server, 1);

            let invitation_service = crate::service::invitation::InvitationService::new(
                &test.state.db,
                &test.state.mailer,
                "http://localhost:8080",
            );
            invitation_service
                .send_statement_invitation(
                    &student,
                    crate::model::form::StatementSigner::Teacher,
                    "T. Teach",
                    "teacher@example.org",
                )
                .await
                .unwrap();

            let statement_service = StatementFormService::new(&test.state.db);

            let result = statement_service.render(&first_token).await;

            assert!(matches!(
                result,
                Err(Error::FormError(FormError::InvitationMismatch))
            ));

            Ok(())
        }
    }

    mod sign {
        use symposium_test_utils::prelude::*;

        use super::setup_with_invited_teacher;
        use crate::{
            error::{form::FormError, Error},
            model::form::{StatementSignatureDto, StatementSigner},
            service::{
                form::statement::StatementFormService, invitation::InvitationService,
            },
        };

        fn submission() -> StatementSignatureDto {
            StatementSignatureDto {
                signature: "T. Teach".to_string(),
                comments: Some("Supervised lab work only.".to_string()),
            }
        }

        /// Expect a lone third-party signature to leave the form incomplete
        #[tokio::test]
        async fn subset_of_signers_leaves_form_incomplete() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, token) = setup_with_invited_teacher(&mut test).await?;

            let statement_service = StatementFormService::new(&test.state.db);

            let form = statement_service.sign(&token, submission()).await.unwrap();

            assert!(!form.completed);

            Ok(())
        }

        /// Expect student + teacher signatures to complete the form
        #[tokio::test]
        async fn all_required_signers_complete_form() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (student, token) = setup_with_invited_teacher(&mut test).await?;

            let statement_service = StatementFormService::new(&test.state.db);

            statement_service
                .sign_as_student(&student, "A. Lee")
                .await
                .unwrap();
            let form = statement_service.sign(&token, submission()).await.unwrap();

            assert!(form.student_completed);
            assert!(form.completed);

            Ok(())
        }

        /// Expect the student signature alone to leave the form incomplete
        #[tokio::test]
        async fn student_alone_is_not_enough() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (student, _token) = setup_with_invited_teacher(&mut test).await?;

            let statement_service = StatementFormService::new(&test.state.db);

            let form = statement_service
                .sign_as_student(&student, "A. Lee")
                .await
                .unwrap();

            assert!(form.student_completed);
            assert!(!form.completed);

            Ok(())
        }

        /// Expect a completed submission to consume the token
        #[tokio::test]
        async fn completed_submission_is_single_use() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, token) = setup_with_invited_teacher(&mut test).await?;

            let statement_service = StatementFormService::new(&test.state.db);

            statement_service.sign(&token, submission()).await.unwrap();
            let replay = statement_service.sign(&token, submission()).await;

            assert!(matches!(
                replay,
                Err(Error::FormError(FormError::InvitationMismatch))
            ));

            Ok(())
        }

        /// Expect any of mentor or parent to satisfy the third-party side
        #[tokio::test]
        async fn mentor_signature_also_completes() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, _, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
            let _mock = mock_send_message_endpoint(&mut test.server, 1);

            let invitation_service = InvitationService::new(
                &test.state.db,
                &test.state.mailer,
                "http://localhost:8080",
            );
            let party = invitation_service
                .send_statement_invitation(
                    &student,
                    StatementSigner::Mentor,
                    "Dr. M",
                    "mentor@example.org",
                )
                .await
                .unwrap();

            let statement_service = StatementFormService::new(&test.state.db);
            statement_service
                .sign_as_student(&student, "A. Lee")
                .await
                .unwrap();

            let form = statement_service
                .sign(
                    &party.invite_token.unwrap(),
                    StatementSignatureDto {
                        signature: "Dr. M".to_string(),
                        comments: None,
                    },
                )
                .await
                .unwrap();

            assert!(form.completed);

            Ok(())
        }
    }

    mod invalidate_signatures {
        use symposium_test_utils::prelude::*;

        use super::setup_with_invited_teacher;
        use crate::{
            model::form::StatementSignatureDto,
            service::form::statement::StatementFormService,
        };

        /// Expect a replaced plan to clear all collected signatures
        #[tokio::test]
        async fn clears_signatures_on_plan_replacement() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (student, token) = setup_with_invited_teacher(&mut test).await?;

            let statement_service = StatementFormService::new(&test.state.db);
            statement_service
                .sign_as_student(&student, "A. Lee")
                .await
                .unwrap();
            statement_service
                .sign(
                    &token,
                    StatementSignatureDto {
                        signature: "T. Teach".to_string(),
                        comments: None,
                    },
                )
                .await
                .unwrap();

            statement_service
                .invalidate_signatures(student.id)
                .await
                .unwrap();

            let dto = statement_service
                .dto_for_student(student.id)
                .await
                .unwrap()
                .unwrap();

            assert!(!dto.completed);
            assert!(!dto.student_completed);
            assert!(dto.parties.iter().all(|party| !party.completed));

            Ok(())
        }
    }
}
