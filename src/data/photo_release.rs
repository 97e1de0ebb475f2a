use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::model::token::InvitePurpose;

/// Repository for the photo release form and its parties.
pub struct PhotoReleaseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PhotoReleaseRepository<'a, C> {
    /// Creates a new instance of [`PhotoReleaseRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get(
        &self,
        form_id: i32,
    ) -> Result<Option<entity::photo_release_form::Model>, DbErr> {
        entity::prelude::PhotoReleaseForm::find_by_id(form_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_student_id(
        &self,
        student_id: i32,
    ) -> Result<Option<entity::photo_release_form::Model>, DbErr> {
        entity::prelude::PhotoReleaseForm::find()
            .filter(entity::photo_release_form::Column::StudentId.eq(student_id))
            .one(self.db)
            .await
    }

    pub async fn get_or_create(
        &self,
        student_id: i32,
    ) -> Result<entity::photo_release_form::Model, DbErr> {
        if let Some(form) = self.get_by_student_id(student_id).await? {
            return Ok(form);
        }

        let form = entity::photo_release_form::ActiveModel {
            student_id: ActiveValue::Set(student_id),
            team_member_parent_email: ActiveValue::Set(None),
            completed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        form.insert(self.db).await
    }

    /// Records the team-member parent's address; its presence makes that
    /// party's signature required for overall completion.
    pub async fn set_team_member_email(
        &self,
        form_id: i32,
        email: Option<&str>,
    ) -> Result<Option<entity::photo_release_form::Model>, DbErr> {
        let form = match self.get(form_id).await? {
            Some(form) => form,
            None => return Ok(None),
        };

        let mut form_am = form.into_active_model();
        form_am.team_member_parent_email = ActiveValue::Set(email.map(str::to_string));

        let form = form_am.update(self.db).await?;

        Ok(Some(form))
    }

    pub async fn parties(
        &self,
        form_id: i32,
    ) -> Result<Vec<entity::photo_release_party::Model>, DbErr> {
        entity::prelude::PhotoReleaseParty::find()
            .filter(entity::photo_release_party::Column::FormId.eq(form_id))
            .all(self.db)
            .await
    }

    pub async fn get_party(
        &self,
        form_id: i32,
        purpose: InvitePurpose,
    ) -> Result<Option<entity::photo_release_party::Model>, DbErr> {
        entity::prelude::PhotoReleaseParty::find()
            .filter(entity::photo_release_party::Column::FormId.eq(form_id))
            .filter(entity::photo_release_party::Column::Party.eq(purpose.as_str()))
            .one(self.db)
            .await
    }

    pub async fn upsert_party(
        &self,
        form_id: i32,
        purpose: InvitePurpose,
        email: &str,
    ) -> Result<entity::photo_release_party::Model, DbErr> {
        if let Some(existing) = self.get_party(form_id, purpose).await? {
            let mut party_am = existing.into_active_model();
            party_am.email = ActiveValue::Set(email.to_string());

            return party_am.update(self.db).await;
        }

        let party = entity::photo_release_party::ActiveModel {
            form_id: ActiveValue::Set(form_id),
            party: ActiveValue::Set(purpose.as_str().to_string()),
            email: ActiveValue::Set(email.to_string()),
            invite_token: ActiveValue::Set(None),
            invite_sent: ActiveValue::Set(false),
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
    ) -> Result<Option<entity::photo_release_party::Model>, DbErr> {
        let party = match entity::prelude::PhotoReleaseParty::find_by_id(party_id)
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
        signed_at: NaiveDateTime,
    ) -> Result<Option<entity::photo_release_party::Model>, DbErr> {
        let party = match entity::prelude::PhotoReleaseParty::find_by_id(party_id)
            .one(self.db)
            .await?
        {
            Some(party) => party,
            None => return Ok(None),
        };

        let mut party_am = party.into_active_model();
        party_am.signature = ActiveValue::Set(Some(signature.to_string()));
        party_am.signature_date = ActiveValue::Set(Some(signed_at));
        party_am.completed = ActiveValue::Set(true);
        party_am.invite_token = ActiveValue::Set(None);

        let party = party_am.update(self.db).await?;

        Ok(Some(party))
    }

    pub async fn set_completed(
        &self,
        form_id: i32,
        completed: bool,
    ) -> Result<Option<entity::photo_release_form::Model>, DbErr> {
        let form = match self.get(form_id).await? {
            Some(form) => form,
            None => return Ok(None),
        };

        let mut form_am = form.into_active_model();
        form_am.completed = ActiveValue::Set(completed);

        let form = form_am.update(self.db).await?;

        Ok(Some(form))
    }
}
