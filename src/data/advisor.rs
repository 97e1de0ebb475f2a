use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::model::status::ApprovalStatus;

pub struct AdvisorRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AdvisorRepository<'a, C> {
    /// Creates a new instance of [`AdvisorRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an advisor profile in pending state.
    pub async fn create(
        &self,
        user_id: i32,
        name: &str,
        email: &str,
        school_id: i32,
    ) -> Result<entity::advisor::Model, DbErr> {
        let advisor = entity::advisor::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            school_id: ActiveValue::Set(school_id),
            status: ActiveValue::Set(ApprovalStatus::Pending.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        advisor.insert(self.db).await
    }

    pub async fn get(&self, advisor_id: i32) -> Result<Option<entity::advisor::Model>, DbErr> {
        entity::prelude::Advisor::find_by_id(advisor_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::advisor::Model>, DbErr> {
        entity::prelude::Advisor::find()
            .filter(entity::advisor::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    /// Advisor with their school joined, for dashboards.
    pub async fn get_with_school(
        &self,
        advisor_id: i32,
    ) -> Result<Option<(entity::advisor::Model, Option<entity::school::Model>)>, DbErr> {
        entity::prelude::Advisor::find_by_id(advisor_id)
            .find_also_related(entity::school::Entity)
            .one(self.db)
            .await
    }

    pub async fn list_with_schools(
        &self,
    ) -> Result<Vec<(entity::advisor::Model, Option<entity::school::Model>)>, DbErr> {
        entity::prelude::Advisor::find()
            .find_also_related(entity::school::Entity)
            .all(self.db)
            .await
    }

    /// Unconditional status overwrite; repeated admin actions may flip a
    /// decided record again.
    pub async fn update_status(
        &self,
        advisor_id: i32,
        status: ApprovalStatus,
    ) -> Result<Option<entity::advisor::Model>, DbErr> {
        let advisor = match entity::prelude::Advisor::find_by_id(advisor_id)
            .one(self.db)
            .await?
        {
            Some(advisor) => advisor,
            None => return Ok(None),
        };

        let mut advisor_am = advisor.into_active_model();
        advisor_am.status = ActiveValue::Set(status.as_str().to_string());

        let advisor = advisor_am.update(self.db).await?;

        Ok(Some(advisor))
    }
}
