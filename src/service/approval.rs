use sea_orm::ConnectionTrait;

use crate::{
    data::{advisor::AdvisorRepository, judge::JudgeRepository, student::StudentRepository},
    error::{auth::AuthError, Error},
    model::status::{ApprovalStatus, PaymentStatus, SrcReview},
    service::notification::NotificationService,
};

/// Approval state machine for students, advisors, and judges.
///
/// Every decision is an unconditional overwrite followed by exactly one
/// notification email to the affected party. The write is not transactional
/// with the notification: a failed send surfaces as an error on the request,
/// but the new status stands.
pub struct ApprovalService<'a, C: ConnectionTrait> {
    db: &'a C,
    mailer: &'a mailer::Client,
}

impl<'a, C: ConnectionTrait> ApprovalService<'a, C> {
    /// Creates a new instance of [`ApprovalService`]
    pub fn new(db: &'a C, mailer: &'a mailer::Client) -> Self {
        Self { db, mailer }
    }

    /// Advisor decision on one of their own students.
    pub async fn set_student_status(
        &self,
        advisor: &entity::advisor::Model,
        student_id: i32,
        status: ApprovalStatus,
    ) -> Result<entity::student::Model, Error> {
        let student_repository = StudentRepository::new(self.db);

        let student = student_repository
            .get(student_id)
            .await?
            .ok_or(Error::NotFound("Student"))?;

        if student.advisor_id != advisor.id {
            return Err(AuthError::NotOwner.into());
        }

        let student = student_repository
            .update_status(student_id, status)
            .await?
            .ok_or(Error::NotFound("Student"))?;

        NotificationService::new(self.mailer)
            .send_status_notice(&student.email, &student.name, "student", status)
            .await?;

        Ok(student)
    }

    /// Admin decision on an advisor.
    pub async fn set_advisor_status(
        &self,
        advisor_id: i32,
        status: ApprovalStatus,
    ) -> Result<entity::advisor::Model, Error> {
        let advisor = AdvisorRepository::new(self.db)
            .update_status(advisor_id, status)
            .await?
            .ok_or(Error::NotFound("Advisor"))?;

        NotificationService::new(self.mailer)
            .send_status_notice(&advisor.email, &advisor.name, "advisor", status)
            .await?;

        Ok(advisor)
    }

    /// Admin decision on a judge.
    pub async fn set_judge_status(
        &self,
        judge_id: i32,
        status: ApprovalStatus,
    ) -> Result<entity::judge::Model, Error> {
        let judge = JudgeRepository::new(self.db)
            .update_status(judge_id, status)
            .await?
            .ok_or(Error::NotFound("Judge"))?;

        NotificationService::new(self.mailer)
            .send_status_notice(&judge.email, &judge.name, "judge", status)
            .await?;

        Ok(judge)
    }

    /// Special review committee decision. Independent of the main status and
    /// not accompanied by a notification.
    pub async fn set_src_review(
        &self,
        student_id: i32,
        decision: SrcReview,
    ) -> Result<entity::student::Model, Error> {
        StudentRepository::new(self.db)
            .set_src_review(student_id, decision)
            .await?
            .ok_or(Error::NotFound("Student"))
    }

    /// Records a payment as received. No notification.
    pub async fn set_payment_status(
        &self,
        student_id: i32,
        payment_status: PaymentStatus,
    ) -> Result<entity::student::Model, Error> {
        StudentRepository::new(self.db)
            .set_payment_status(student_id, payment_status)
            .await?
            .ok_or(Error::NotFound("Student"))
    }
}

#[cfg(test)]
mod tests {
    mod set_student_status {
        use symposium_test_utils::prelude::*;

        use crate::{
            error::{auth::AuthError, Error},
            model::status::ApprovalStatus,
            service::approval::ApprovalService,
        };

        /// Expect approval to persist and send exactly one email
        #[tokio::test]
        async fn approves_and_notifies_once() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, advisor, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
            let mock = mock_send_message_endpoint(&mut test.server, 1);

            let approval_service = ApprovalService::new(&test.state.db, &test.state.mailer);

            let updated = approval_service
                .set_student_status(&advisor, student.id, ApprovalStatus::Approved)
                .await
                .unwrap();

            assert_eq!(updated.status, "approved");
            mock.assert();

            Ok(())
        }

        /// Expect repeated approval to stay approved, each call mailing once
        #[tokio::test]
        async fn repeated_approval_is_idempotent() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, advisor, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
            let mock = mock_send_message_endpoint(&mut test.server, 2);

            let approval_service = ApprovalService::new(&test.state.db, &test.state.mailer);

            approval_service
                .set_student_status(&advisor, student.id, ApprovalStatus::Approved)
                .await
                .unwrap();
            let second = approval_service
                .set_student_status(&advisor, student.id, ApprovalStatus::Approved)
                .await
                .unwrap();

            assert_eq!(second.status, "approved");
            mock.assert();

            Ok(())
        }

        /// Expect another advisor to be refused
        #[tokio::test]
        async fn rejects_foreign_advisor() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (school, _, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
            let mock = mock_send_message_endpoint(&mut test.server, 0);

            let other_user =
                fixtures::insert_user(&test.state.db, "other@example.org", "advisor").await?;
            let other_advisor =
                fixtures::insert_advisor(&test.state.db, other_user.id, school.id, "approved")
                    .await?;

            let approval_service = ApprovalService::new(&test.state.db, &test.state.mailer);

            let result = approval_service
                .set_student_status(&other_advisor, student.id, ApprovalStatus::Approved)
                .await;

            assert!(matches!(result, Err(Error::AuthError(AuthError::NotOwner))));
            mock.assert();

            Ok(())
        }

        /// Expect the status write to stand when the notification fails
        #[tokio::test]
        async fn failed_email_does_not_roll_back() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, advisor, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
            let _mock =
                symposium_test_utils::mock::mock_send_message_failure_endpoint(&mut test.server, 1);

            let approval_service = ApprovalService::new(&test.state.db, &test.state.mailer);

            let result = approval_service
                .set_student_status(&advisor, student.id, ApprovalStatus::Approved)
                .await;

            assert!(result.is_err());

            let student_repo = crate::data::student::StudentRepository::new(&test.state.db);
            let stored = student_repo.get(student.id).await?.unwrap();

            assert_eq!(stored.status, "approved");

            Ok(())
        }
    }

    mod set_advisor_status {
        use symposium_test_utils::prelude::*;

        use crate::{model::status::ApprovalStatus, service::approval::ApprovalService};

        /// Expect approval notice mailed to the advisor
        #[tokio::test]
        async fn approves_and_notifies() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let school = fixtures::insert_school(&test.state.db).await?;
            let user = fixtures::insert_user(&test.state.db, "a@example.org", "advisor").await?;
            let advisor =
                fixtures::insert_advisor(&test.state.db, user.id, school.id, "pending").await?;
            let mock = mock_send_message_endpoint(&mut test.server, 1);

            let approval_service = ApprovalService::new(&test.state.db, &test.state.mailer);

            let updated = approval_service
                .set_advisor_status(advisor.id, ApprovalStatus::Approved)
                .await
                .unwrap();

            assert_eq!(updated.status, "approved");
            mock.assert();

            Ok(())
        }
    }

    mod set_src_review {
        use symposium_test_utils::prelude::*;

        use crate::{
            model::status::SrcReview,
            service::approval::ApprovalService,
        };

        /// Expect the committee decision to leave the main status untouched
        #[tokio::test]
        async fn is_independent_of_main_status() -> Result<(), TestError> {
            let mut test = test_setup_with_app_tables!()?;
            let (_, _, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
            let mock = mock_send_message_endpoint(&mut test.server, 0);

            let approval_service = ApprovalService::new(&test.state.db, &test.state.mailer);

            let updated = approval_service
                .set_src_review(student.id, SrcReview::Rejected)
                .await
                .unwrap();

            assert_eq!(updated.src_review, "rejected");
            assert_eq!(updated.status, "pending");
            mock.assert();

            Ok(())
        }
    }
}
