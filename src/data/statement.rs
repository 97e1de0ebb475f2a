use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, QueryFilter,
};

use crate::model::token::InvitePurpose;

/// Repository for the statement of outside assistance form and its parties.
pub struct StatementFormRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StatementFormRepository<'a, C> {
    /// Creates a new instance of [`StatementFormRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(&self, form_id: i32) -> Result<Option<entity::statement_form::Model>, DbErr> {
        entity::prelude::StatementForm::find_by_id(form_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_student_id(
        &self,
        student_id: i32,
    ) -> Result<Option<entity::statement_form::Model>, DbErr> {
        entity::prelude::StatementForm::find()
            .filter(entity::statement_form::Column::StudentId.eq(student_id))
            .one(self.db)
            .await
    }

    /// The form row is created lazily the first time a student touches it.
    pub async fn get_or_create(
        &self,
        student_id: i32,
    ) -> Result<entity::statement_form::Model, DbErr> {
        if let Some(form) = self.get_by_student_id(student_id).await? {
            return Ok(form);
        }

        let form = entity::statement_form::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            student_signature: ActiveValue::Set(None),
            student_signature_date: ActiveValue::Set(None),
            student_completed: ActiveValue::Set(false),
            completed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        form.insert(self.db).await
    }

    pub async fn parties(
        &self,
        form_id: i32,
    ) -> Result<Vec<entity::statement_party::Model>, DbErr> {
        entity::prelude::StatementParty::find()
            .filter(entity::statement_party::Column::FormId.eq(form_id))
            .all(self.db)
            .await
    }

    pub async fn get_party(
        &self,
        form_id: i32,
        purpose: InvitePurpose,
    ) -> Result<Option<entity::statement_party::Model>, DbErr> {
        entity::prelude::StatementParty::find()
            .filter(entity::statement_party::Column::FormId.eq(form_id))
            .filter(entity::statement_party::Column::Party.eq(purpose.as_str()))
            .one(self.db)
            .await
    }

    /// Creates or updates the party row for a signer slot. Re-inviting a
    /// different person replaces the contact details.
    pub async fn upsert_party(
        &self,
        form_id: i32,
        purpose: InvitePurpose,
        name: &str,
        email: &str,
    ) -> Result<entity::statement_party::Model, DbErr> {
        if let Some(existing) = self.get_party(form_id, purpose).await? {
            let mut party_am = existing.into_active_model();
            party_am.name = ActiveValue::Set(name.to_string());
            party_am.email = ActiveValue::Set(email.to_string());

            return party_am.update(self.db).await;
        }

        let party = entity::statement_party::ActiveModel {
            form_id: ActiveValue::Set(form_id),
            party: ActiveValue::Set(purpose.as_str().to_string()),
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            invite_token: ActiveValue::Set(None),
            invite_sent: ActiveValue::Set(false),
            comments: ActiveValue::Set(None),
            signature: ActiveValue::Set(None),
            signature_date: ActiveValue::Set(None),
            completed: ActiveValue::Set(false),
            ..Default::default()
        };

        party.insert(self.db).await
    }

    /// Stores a newly issued invite token, superseding any previous link.
    pub async fn set_party_invite(
        &self,
        party_id: i32,
        token: &str,
    ) -> Result<Option<entity::statement_party::Model>, DbErr> {
        let party = match entity::prelude::StatementParty::find_by_id(party_id)
            .one(self.db)
            .await?
        {
            Some(party) => party,
            None => return Ok(None),
        };

        let mut party_am = party.into_active_model();
        party_am.invite_token = ActiveValue::Set(Some(token.to_string()));
        party_am.invite_sent = ActiveValue::Set(true);

        let party = party_am.update(self.db).await?;

        Ok(Some(party))
    }

    /// Merges a signer's submission into their party row and clears the
    /// single-use token.
    pub async fn complete_party(
        &self,
        party_id: i32,
        signature: &str,
        comments: Option<&str>,
        signed_at: NaiveDateTime,
    ) -> Result<Option<entity::statement_party::Model>, DbErr> {
        let party = match entity::prelude::StatementParty::find_by_id(party_id)
            .one(self.db)
            .await?
        {
            Some(party) => party,
            None => return Ok(None),
        };

        let mut party_am = party.into_active_model();
        party_am.signature = ActiveValue::Set(Some(signature.to_string()));
        party_am.comments = ActiveValue::Set(comments.map(str::to_string));
        party_am.signature_date = ActiveValue::Set(Some(signed_at));
        party_am.completed = ActiveValue::Set(true);
        party_am.invite_token = ActiveValue::Set(None);

        let party = party_am.update(self.db).await?;

        Ok(Some(party))
    }

    /// Records the student's own signature on the form.
    pub async fn set_student_signature(
        &self,
        form_id: i32,
        signature: &str,
        signed_at: NaiveDateTime,
    ) -> Result<Option<entity::statement_form::Model>, DbErr> {
        let form = match self.get(form_id).await? {
            Some(form) => form,
            None => return Ok(None),
        };

        let mut form_am = form.into_active_model();
        form_am.student_signature = ActiveValue::Set(Some(signature.to_string()));
        form_am.student_signature_date = ActiveValue::Set(Some(signed_at));
        form_am.student_completed = ActiveValue::Set(true);

        let form = form_am.update(self.db).await?;

        Ok(Some(form))
    }

    pub async fn set_completed(
        &self,
        form_id: i32,
        completed: bool,
    ) -> Result<Option<entity::statement_form::Model>, DbErr> {
        let form = match self.get(form_id).await? {
            Some(form) => form,
            None => return Ok(None),
        };

        let mut form_am = form.into_active_model();
        form_am.completed = ActiveValue::Set(completed);

        let form = form_am.update(self.db).await?;

        Ok(Some(form))
    }

    /// Clears every signature, signature date, and completion flag on the
    /// form and all of its parties. Invite tokens are cleared too; each
    /// signer must be re-invited against the replacement plan.
    pub async fn reset_signatures(&self, form_id: i32) -> Result<(), DbErr> {
        entity::prelude::StatementParty::update_many()
            .col_expr(
                entity::statement_party::Column::Signature,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::statement_party::Column::SignatureDate,
                Expr::value(Option::<NaiveDateTime>::None),
            )
            .col_expr(
                entity::statement_party::Column::Comments,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::statement_party::Column::InviteToken,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::statement_party::Column::InviteSent,
                Expr::value(false),
            )
            .col_expr(
                entity::statement_party::Column::Completed,
                Expr::value(false),
            )
            .filter(entity::statement_party::Column::FormId.eq(form_id))
            .exec(self.db)
            .await?;

        entity::prelude::StatementForm::update_many()
            .col_expr(
                entity::statement_form::Column::StudentSignature,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::statement_form::Column::StudentSignatureDate,
                Expr::value(Option::<NaiveDateTime>::None),
            )
            .col_expr(
                entity::statement_form::Column::StudentCompleted,
                Expr::value(false),
            )
            .col_expr(entity::statement_form::Column::Completed, Expr::value(false))
            .filter(entity::statement_form::Column::Id.eq(form_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    mod reset_signatures {
        use chrono::Utc;
        use symposium_test_utils::prelude::*;

        use crate::{data::statement::StatementFormRepository, model::token::InvitePurpose};

        /// Expect every signature and completion flag cleared
        #[tokio::test]
        async fn clears_all_party_and_form_state() -> Result<(), TestError> {
            let test = test_setup_with_app_tables!()?;
            let (_, _, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
            let form = fixtures::insert_statement_form(&test.state.db, student.id).await?;
            let party = fixtures::insert_statement_party(
                &test.state.db,
                form.id,
                "teacher",
                "teacher@example.org",
                Some("tok"),
            )
            .await?;

            let repo = StatementFormRepository::new(&test.state.db);
            repo.set_student_signature(form.id, "A. Lee", Utc::now().naive_utc())
                .await?;
            repo.complete_party(party.id, "T. Teach", None, Utc::now().naive_utc())
                .await?;
            repo.set_completed(form.id, true).await?;

            repo.reset_signatures(form.id).await?;

            let form = repo.get(form.id).await?.unwrap();
            let party = repo
                .get_party(form.id, InvitePurpose::Teacher)
                .await?
                .unwrap();

            assert!(!form.completed);
            assert!(!form.student_completed);
            assert!(form.student_signature.is_none());
            assert!(!party.completed);
            assert!(party.signature.is_none());
            assert!(party.signature_date.is_none());

            Ok(())
        }
    }

    mod upsert_party {
        use symposium_test_utils::prelude::*;

        use crate::{data::statement::StatementFormRepository, model::token::InvitePurpose};

        /// Expect a second upsert for the same slot to update in place
        #[tokio::test]
        async fn replaces_contact_details() -> Result<(), TestError> {
            let test = test_setup_with_app_tables!()?;
            let (_, _, student) =
                fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
            let form = fixtures::insert_statement_form(&test.state.db, student.id).await?;

            let repo = StatementFormRepository::new(&test.state.db);
            let first = repo
                .upsert_party(form.id, InvitePurpose::Mentor, "Dr. One", "one@example.org")
                .await?;
            let second = repo
                .upsert_party(form.id, InvitePurpose::Mentor, "Dr. Two", "two@example.org")
                .await?;

            assert_eq!(first.id, second.id);
            assert_eq!(second.name, "Dr. Two");
            assert_eq!(repo.parties(form.id).await?.len(), 1);

            Ok(())
        }
    }
}
