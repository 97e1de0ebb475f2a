use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260210_000002_user::User;

static FK_JUDGE_USER_ID: &str = "fk_judge_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Judge::Table)
                    .if_not_exists()
                    .col(pk_auto(Judge::Id))
                    .col(integer_uniq(Judge::UserId))
                    .col(string(Judge::Name))
                    .col(string(Judge::Email))
                    .col(string(Judge::Occupation))
                    .col(string(Judge::Employer))
                    .col(string(Judge::HighestDegree))
                    .col(string(Judge::ResearchAreas))
                    .col(string(Judge::Status))
                    .col(timestamp(Judge::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_JUDGE_USER_ID)
                    .from_tbl(Judge::Table)
                    .from_col(Judge::UserId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_JUDGE_USER_ID)
                    .table(Judge::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Judge::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Judge {
    Table,
    Id,
    UserId,
    Name,
    Email,
    Occupation,
    Employer,
    HighestDegree,
    ResearchAreas,
    Status,
    CreatedAt,
}
