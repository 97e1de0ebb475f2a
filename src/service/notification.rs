use mailer::Message;

use crate::{error::Error, model::status::ApprovalStatus};

/// Composes and dispatches every outbound email.
///
/// Sends go straight to the provider within the calling request; a failed
/// send surfaces as an error on that request and is never retried.
pub struct NotificationService<'a> {
    mailer: &'a mailer::Client,
}

impl<'a> NotificationService<'a> {
    /// Creates a new instance of [`NotificationService`]
    pub fn new(mailer: &'a mailer::Client) -> Self {
        Self { mailer }
    }

    pub async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), Error> {
        let message = Message {
            to: email.to_string(),
            subject: "Your Symposium verification code".to_string(),
            text: format!(
                "Your verification code is {}. It expires in 15 minutes.",
                code
            ),
        };

        self.mailer.send(&message).await?;

        Ok(())
    }

    /// Status notice sent after a student, advisor, or judge decision.
    pub async fn send_status_notice(
        &self,
        email: &str,
        name: &str,
        registration: &str,
        status: ApprovalStatus,
    ) -> Result<(), Error> {
        let outcome = match status {
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "not approved",
            ApprovalStatus::Pending => "returned to pending review",
        };

        let message = Message {
            to: email.to_string(),
            subject: format!("Symposium {} registration update", registration),
            text: format!(
                "Hello {},\n\nYour {} registration has been {}.\n\n\
                 Log in to your dashboard for details.",
                name, registration, outcome
            ),
        };

        self.mailer.send(&message).await?;

        Ok(())
    }

    /// Invitation link for a third-party signer.
    pub async fn send_invitation(
        &self,
        email: &str,
        form_name: &str,
        on_behalf_of: &str,
        link: &str,
    ) -> Result<(), Error> {
        let message = Message {
            to: email.to_string(),
            subject: format!("Signature requested: {} for {}", form_name, on_behalf_of),
            text: format!(
                "You have been asked to complete the {} for {}.\n\n\
                 Open the link below to review and sign. No account is needed.\n\n{}",
                form_name, on_behalf_of, link
            ),
        };

        self.mailer.send(&message).await?;

        Ok(())
    }
}
