use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260210_000001_school::School, m20260210_000002_user::User};

static FK_ADVISOR_USER_ID: &str = "fk_advisor_user_id";
static FK_ADVISOR_SCHOOL_ID: &str = "fk_advisor_school_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advisor::Table)
                    .if_not_exists()
                    .col(pk_auto(Advisor::Id))
                    .col(integer_uniq(Advisor::UserId))
                    .col(string(Advisor::Name))
                    .col(string(Advisor::Email))
                    .col(integer(Advisor::SchoolId))
                    .col(string(Advisor::Status))
                    .col(timestamp(Advisor::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ADVISOR_USER_ID)
                    .from_tbl(Advisor::Table)
                    .from_col(Advisor::UserId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ADVISOR_SCHOOL_ID)
                    .from_tbl(Advisor::Table)
                    .from_col(Advisor::SchoolId)
                    .to_tbl(School::Table)
                    .to_col(School::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ADVISOR_SCHOOL_ID)
                    .table(Advisor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ADVISOR_USER_ID)
                    .table(Advisor::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Advisor::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Advisor {
    Table,
    Id,
    UserId,
    Name,
    Email,
    SchoolId,
    Status,
    CreatedAt,
}
