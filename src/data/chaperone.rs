use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

pub struct ChaperoneRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChaperoneRepository<'a, C> {
    /// Creates a new instance of [`ChaperoneRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_advisor_id(
        &self,
        advisor_id: i32,
    ) -> Result<Option<entity::chaperone::Model>, DbErr> {
        entity::prelude::Chaperone::find()
            .filter(entity::chaperone::Column::AdvisorId.eq(advisor_id))
            .one(self.db)
            .await
    }

    /// Creates or replaces the advisor's chaperone record. Replacing resets
    /// invitation and confirmation state for the new contact.
    pub async fn upsert(
        &self,
        advisor_id: i32,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<entity::chaperone::Model, DbErr> {
        if let Some(existing) = self.get_by_advisor_id(advisor_id).await? {
            let mut chaperone_am = existing.into_active_model();
            chaperone_am.name = ActiveValue::Set(name.to_string());
            chaperone_am.email = ActiveValue::Set(email.to_string());
            chaperone_am.phone = ActiveValue::Set(phone.to_string());
            chaperone_am.invite_token = ActiveValue::Set(None);
            chaperone_am.invite_sent = ActiveValue::Set(false);
            chaperone_am.confirmed = ActiveValue::Set(false);
            chaperone_am.signature = ActiveValue::Set(None);
            chaperone_am.signature_date = ActiveValue::Set(None);

            return chaperone_am.update(self.db).await;
        }

        let chaperone = entity::chaperone::ActiveModel {
            advisor_id: ActiveValue::Set(advisor_id),
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            phone: ActiveValue::Set(phone.to_string()),
            invite_token: ActiveValue::Set(None),
            invite_sent: ActiveValue::Set(false),
            confirmed: ActiveValue::Set(false),
            signature: ActiveValue::Set(None),
            signature_date: ActiveValue::Set(None),
            ..Default::default()
        };

        chaperone.insert(self.db).await
    }

    /// Stores a newly issued invite token, superseding any previous link.
    pub async fn set_invite(
        &self,
        chaperone_id: i32,
        token: &str,
    ) -> Result<Option<entity::chaperone::Model>, DbErr> {
        let chaperone = match entity::prelude::Chaperone::find_by_id(chaperone_id)
            .one(self.db)
            .await?
        {
            Some(chaperone) => chaperone,
            None => return Ok(None),
        };

        let mut chaperone_am = chaperone.into_active_model();
        chaperone_am.invite_token = ActiveValue::Set(Some(token.to_string()));
        chaperone_am.invite_sent = ActiveValue::Set(true);

        let chaperone = chaperone_am.update(self.db).await?;

        Ok(Some(chaperone))
    }

    /// Records the chaperone's confirmation and clears the single-use token.
    pub async fn complete(
        &self,
        chaperone_id: i32,
        signature: &str,
        signed_at: NaiveDateTime,
    ) -> Result<Option<entity::chaperone::Model>, DbErr> {
        let chaperone = match entity::prelude::Chaperone::find_by_id(chaperone_id)
            .one(self.db)
            .await?
        {
            Some(chaperone) => chaperone,
            None => return Ok(None),
        };

        let mut chaperone_am = chaperone.into_active_model();
        chaperone_am.confirmed = ActiveValue::Set(true);
        chaperone_am.signature = ActiveValue::Set(Some(signature.to_string()));
        chaperone_am.signature_date = ActiveValue::Set(Some(signed_at));
        chaperone_am.invite_token = ActiveValue::Set(None);

        let chaperone = chaperone_am.update(self.db).await?;

        Ok(Some(chaperone))
    }
}
