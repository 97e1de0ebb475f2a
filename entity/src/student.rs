use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub school_id: i32,
    pub advisor_id: i32,
    pub grade: i32,
    pub project_title: String,
    pub status: String,
    pub payment_status: String,
    pub src_review: String,
    pub research_plan_url: Option<String>,
    pub abstract_url: Option<String>,
    pub slideshow_url: Option<String>,
    pub presentation_url: Option<String>,
    pub research_report_url: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::school::Entity",
        from = "Column::SchoolId",
        to = "super::school::Column::Id"
    )]
    School,
    #[sea_orm(
        belongs_to = "super::advisor::Entity",
        from = "Column::AdvisorId",
        to = "super::advisor::Column::Id"
    )]
    Advisor,
    #[sea_orm(has_one = "super::statement_form::Entity")]
    StatementForm,
    #[sea_orm(has_one = "super::photo_release_form::Entity")]
    PhotoReleaseForm,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::school::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::advisor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Advisor.def()
    }
}

impl Related<super::statement_form::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatementForm.def()
    }
}

impl Related<super::photo_release_form::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhotoReleaseForm.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
