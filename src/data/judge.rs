use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

use crate::model::status::ApprovalStatus;

pub struct JudgeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> JudgeRepository<'a, C> {
    /// Creates a new instance of [`JudgeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a judge profile in pending state.
    pub async fn create(
        &self,
        user_id: i32,
        name: &str,
        email: &str,
        occupation: &str,
        employer: &str,
        highest_degree: &str,
        research_areas: &str,
    ) -> Result<entity::judge::Model, DbErr> {
        let judge = entity::judge::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            occupation: ActiveValue::Set(occupation.to_string()),
            employer: ActiveValue::Set(employer.to_string()),
            highest_degree: ActiveValue::Set(highest_degree.to_string()),
            research_areas: ActiveValue::Set(research_areas.to_string()),
            status: ActiveValue::Set(ApprovalStatus::Pending.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        judge.insert(self.db).await
    }

    pub async fn get(&self, judge_id: i32) -> Result<Option<entity::judge::Model>, DbErr> {
        entity::prelude::Judge::find_by_id(judge_id).one(self.db).await
    }

    pub async fn get_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::judge::Model>, DbErr> {
        entity::prelude::Judge::find()
            .filter(entity::judge::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn list(&self) -> Result<Vec<entity::judge::Model>, DbErr> {
        entity::prelude::Judge::find().all(self.db).await
    }

    /// Unconditional status overwrite.
    pub async fn update_status(
        &self,
        judge_id: i32,
        status: ApprovalStatus,
    ) -> Result<Option<entity::judge::Model>, DbErr> {
        let judge = match self.get(judge_id).await? {
            Some(judge) => judge,
            None => return Ok(None),
        };

        let mut judge_am = judge.into_active_model();
        judge_am.status = ActiveValue::Set(status.as_str().to_string());

        let judge = judge_am.update(self.db).await?;

        Ok(Some(judge))
    }
}
