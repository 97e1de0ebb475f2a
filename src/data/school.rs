use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, QueryOrder,
};

pub struct SchoolRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SchoolRepository<'a, C> {
    /// Creates a new instance of [`SchoolRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str, address: &str) -> Result<entity::school::Model, DbErr> {
        let school = entity::school::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            address: ActiveValue::Set(address.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        school.insert(self.db).await
    }

    pub async fn get(&self, school_id: i32) -> Result<Option<entity::school::Model>, DbErr> {
        entity::prelude::School::find_by_id(school_id)
            .one(self.db)
            .await
    }

    /// Reference list shown on registration forms, ordered by name.
    pub async fn list(&self) -> Result<Vec<entity::school::Model>, DbErr> {
        entity::prelude::School::find()
            .order_by_asc(entity::school::Column::Name)
            .all(self.db)
            .await
    }
}
