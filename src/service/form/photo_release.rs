use chrono::Utc;
use sea_orm::ConnectionTrait;

use crate::{
    data::{photo_release::PhotoReleaseRepository, student::StudentRepository},
    error::{form::FormError, Error},
    model::{
        form::{
            PhotoReleaseFormDto, PhotoReleaseFormView, PhotoReleasePartyStateDto,
            PhotoReleaseSignatureDto,
        },
        token::{InvitePurpose, InviteToken},
    },
    service::form::verify_invitation,
};

/// Photo release: signed by the student's parent and, when a team member's
/// parent email is on file, by that parent as well.
pub struct PhotoReleaseFormService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PhotoReleaseFormService<'a, C> {
    /// Creates a new instance of [`PhotoReleaseFormService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Token-gated read.
    pub async fn render(&self, raw_token: &str) -> Result<PhotoReleaseFormView, Error> {
        let (student, _, party) = self.redeem(raw_token).await?;

        Ok(PhotoReleaseFormView {
            student_name: student.name,
            project_title: student.project_title,
            party: party.party,
            party_email: party.email,
        })
    }

    /// Token-gated write: records the signature and re-derives completion.
    pub async fn sign(
        &self,
        raw_token: &str,
        submission: PhotoReleaseSignatureDto,
    ) -> Result<entity::photo_release_form::Model, Error> {
        let (_, form, party) = self.redeem(raw_token).await?;

        PhotoReleaseRepository::new(self.db)
            .complete_party(party.id, &submission.signature, Utc::now().naive_utc())
            .await?
            .ok_or(FormError::PartyNotFound)?;

        self.recompute_completion(form.id).await
    }

    /// Overall completion: the primary parent has signed AND, if a
    /// team-member parent email was set, that party has signed too.
    pub async fn recompute_completion(
        &self,
        form_id: i32,
    ) -> Result<entity::photo_release_form::Model, Error> {
        let photo_release_repository = PhotoReleaseRepository::new(self.db);

        let form = photo_release_repository
            .get(form_id)
            .await?
            .ok_or(Error::NotFound("Photo release form"))?;
        let parties = photo_release_repository.parties(form_id).await?;

        let party_completed = |purpose: InvitePurpose| {
            parties
                .iter()
                .any(|party| party.party == purpose.as_str() && party.completed)
        };

        let primary_signed = party_completed(InvitePurpose::PhotoRelease);
        let team_member_satisfied = form.team_member_parent_email.is_none()
            || party_completed(InvitePurpose::TeamMember);

        let completed = primary_signed && team_member_satisfied;

        if completed == form.completed {
            return Ok(form);
        }

        photo_release_repository
            .set_completed(form_id, completed)
            .await?
            .ok_or(Error::NotFound("Photo release form"))
    }

    /// Form state for the student and advisor dashboards.
    pub async fn dto_for_student(
        &self,
        student_id: i32,
    ) -> Result<Option<PhotoReleaseFormDto>, Error> {
        let photo_release_repository = PhotoReleaseRepository::new(self.db);

        let form = match photo_release_repository
            .get_by_student_id(student_id)
            .await?
        {
            Some(form) => form,
            None => return Ok(None),
        };
        let parties = photo_release_repository.parties(form.id).await?;

        Ok(Some(PhotoReleaseFormDto {
            completed: form.completed,
            team_member_parent_email: form.team_member_parent_email,
            parties: parties
                .into_iter()
                .map(|party| PhotoReleasePartyStateDto {
                    party: party.party,
                    email: party.email,
                    invite_sent: party.invite_sent,
                    completed: party.completed,
                    signature_date: party.signature_date,
                })
                .collect(),
        }))
    }

    async fn redeem(
        &self,
        raw_token: &str,
    ) -> Result<
        (
            entity::student::Model,
            entity::photo_release_form::Model,
            entity::photo_release_party::Model,
        ),
        Error,
    > {
        let token = InviteToken::parse(raw_token)?;

        if !token.purpose.is_photo_release_party() {
            return Err(FormError::PurposeMismatch.into());
        }

        let student = StudentRepository::new(self.db)
            .get(token.subject_id)
            .await?
            .ok_or(FormError::SubjectNotFound)?;

        let photo_release_repository = PhotoReleaseRepository::new(self.db);
        let form = photo_release_repository
            .get_by_student_id(student.id)
            .await?
            .ok_or(FormError::PartyNotFound)?;
        let party = photo_release_repository
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
        model::form::PhotoReleaseSigner,
        service::invitation::InvitationService,
    };

    async fn invite(
        test: &mut TestSetup,
        student: &entity::student::Model,
        signer: PhotoReleaseSigner,
        email: &str,
    ) -> Result<String, TestError> {
        let _mock = mock_send_message_endpoint(&mut test.server, 1);

        let invitation_service =
            InvitationService::new(&test.state.db, &test.state.mailer, "http://localhost:8080");
        let party = invitation_service
            .send_photo_release_invitation(student, signer, email)
            .await
            .unwrap();

        Ok(party.invite_token.unwrap())
    }

    mod sign {
        use symposium_test_utils::prelude::*;

        use super::invite;
        use crate::{
            model::form::{PhotoReleaseSignatureDto, PhotoReleaseSigner},
            service::form::photo_release::PhotoReleaseFormService,
        };

        /// Expect the primary parent alone to complete a solo project's form
        #[tokio::test]
        async fn primary_parent_completes_solo_form() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, _, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
            let token = invite(
                &mut test,
                &student,
                PhotoReleaseSigner::Primary,
                "parent@example.org",
            )
            .await?;

            let photo_release_service = PhotoReleaseFormService::new(&test.state.db);

            let form = photo_release_service
                .sign(
                    &token,
                    PhotoReleaseSignatureDto {
                        signature: "P. Lee".to_string(),
                    },
                )
                .await
                .unwrap();

            assert!(form.completed);

            Ok(())
        }

        /// Expect a team-member parent on file to block completion until
        /// they sign too
        #[tokio::test]
        async fn team_member_parent_is_required_when_on_file() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, _, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;

            let primary_token = invite(
                &mut test,
                &student,
                PhotoReleaseSigner::Primary,
                "parent@example.org",
            )
            .await?;
            let team_token = invite(
                &mut test,
                &student,
                PhotoReleaseSigner::TeamMember,
                "team-parent@example.org",
            )
            .await?;

            let photo_release_service = PhotoReleaseFormService::new(&test.state.db);

            let after_primary = photo_release_service
                .sign(
                    &primary_token,
                    PhotoReleaseSignatureDto {
                        signature: "P. Lee".to_string(),
                    },
                )
                .await
                .unwrap();

            assert!(!after_primary.completed);

            let after_team = photo_release_service
                .sign(
                    &team_token,
                    PhotoReleaseSignatureDto {
                        signature: "Q. Chen".to_string(),
                    },
                )
                .await
                .unwrap();

            assert!(after_team.completed);

            Ok(())
        }

        /// Expect a statement token to be refused by this form
        #[tokio::test]
        async fn rejects_foreign_purpose() -> Result<(), TestError> {
            let test = test_setup_with_tables!()?;

            let photo_release_service = PhotoReleaseFormService::new(&test.state.db);

            let result = photo_release_service
                .sign(
                    "1_teacher_1700000000_abcdefghijkl",
                    PhotoReleaseSignatureDto {
                        signature: "x".to_string(),
                    },
                )
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }
}
