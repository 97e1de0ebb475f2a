use chrono::Utc;
use sea_orm::ConnectionTrait;

use crate::{
    data::{
        chaperone::ChaperoneRepository, photo_release::PhotoReleaseRepository,
        statement::StatementFormRepository,
    },
    error::Error,
    model::{
        form::{PhotoReleaseSigner, StatementSigner},
        token::{InvitePurpose, InviteToken},
    },
    service::notification::NotificationService,
};

/// Issues invitation tokens and mails the links that let third parties sign
/// without an account.
///
/// Ordering matters: the email is sent before the token is persisted, so a
/// provider failure leaves any previously issued link valid. A successful
/// resend overwrites the stored token and invalidates the earlier link.
pub struct InvitationService<'a, C: ConnectionTrait> {
    db: &'a C,
    mailer: &'a mailer::Client,
    base_url: &'a str,
}

impl<'a, C: ConnectionTrait> InvitationService<'a, C> {
    /// Creates a new instance of [`InvitationService`]
    pub fn new(db: &'a C, mailer: &'a mailer::Client, base_url: &'a str) -> Self {
        Self {
            db,
            mailer,
            base_url,
        }
    }

    /// Invites a teacher, mentor, or parent to sign a student's statement of
    /// outside assistance.
    pub async fn send_statement_invitation(
        &self,
        student: &entity::student::Model,
        signer: StatementSigner,
        name: &str,
        email: &str,
    ) -> Result<entity::statement_party::Model, Error> {
        let statement_repository = StatementFormRepository::new(self.db);

        let form = statement_repository.get_or_create(student.id).await?;
        let party = statement_repository
            .upsert_party(form.id, signer.purpose(), name, email)
            .await?;

        let token = InviteToken::issue(student.id, signer.purpose(), Utc::now());
        let link = format!(
            "{}/forms/statement?token={}",
            self.base_url,
            token.encode()
        );

        NotificationService::new(self.mailer)
            .send_invitation(
                email,
                "Statement of Outside Assistance",
                &student.name,
                &link,
            )
            .await?;

        let party = statement_repository
            .set_party_invite(party.id, &token.encode())
            .await?
            .ok_or(Error::NotFound("Signer"))?;

        Ok(party)
    }

    /// Invites a parent (or a team member's parent) to sign a student's
    /// photo release.
    pub async fn send_photo_release_invitation(
        &self,
        student: &entity::student::Model,
        signer: PhotoReleaseSigner,
        email: &str,
    ) -> Result<entity::photo_release_party::Model, Error> {
        let photo_release_repository = PhotoReleaseRepository::new(self.db);

        let form = photo_release_repository.get_or_create(student.id).await?;

        // A team-member parent on file makes that signature required for
        // overall completion.
        if signer == PhotoReleaseSigner::TeamMember {
            photo_release_repository
                .set_team_member_email(form.id, Some(email))
                .await?;
        }

        let party = photo_release_repository
            .upsert_party(form.id, signer.purpose(), email)
            .await?;

        let token = InviteToken::issue(student.id, signer.purpose(), Utc::now());
        let link = format!(
            "{}/forms/photo-release?token={}",
            self.base_url,
            token.encode()
        );

        NotificationService::new(self.mailer)
            .send_invitation(email, "Photo Release", &student.name, &link)
            .await?;

        let party = photo_release_repository
            .set_party_invite(party.id, &token.encode())
            .await?
            .ok_or(Error::NotFound("Signer"))?;

        Ok(party)
    }

    /// Invites an advisor's chaperone to confirm for the fair.
    pub async fn send_chaperone_invitation(
        &self,
        advisor: &entity::advisor::Model,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<entity::chaperone::Model, Error> {
        let chaperone_repository = ChaperoneRepository::new(self.db);

        let chaperone = chaperone_repository
            .upsert(advisor.id, name, email, phone)
            .await?;

        let token = InviteToken::issue(advisor.id, InvitePurpose::Chaperone, Utc::now());
        let link = format!(
            "{}/forms/chaperone?token={}",
            self.base_url,
            token.encode()
        );

        NotificationService::new(self.mailer)
            .send_invitation(email, "Chaperone Confirmation", &advisor.name, &link)
            .await?;

        let chaperone = chaperone_repository
            .set_invite(chaperone.id, &token.encode())
            .await?
            .ok_or(Error::NotFound("Chaperone"))?;

        Ok(chaperone)
    }
}
