use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "statement_party")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub form_id: i32,
    pub party: String,
    pub name: String,
    pub email: String,
    pub invite_token: Option<String>,
    pub invite_sent: bool,
    pub comments: Option<String>,
    pub signature: Option<String>,
    pub signature_date: Option<DateTime>,
    pub completed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::statement_form::Entity",
        from = "Column::FormId",
        to = "super::statement_form::Column::Id"
    )]
    Form,
}

impl Related<super::statement_form::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Form.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
