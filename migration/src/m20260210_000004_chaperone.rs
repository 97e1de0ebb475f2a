use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260210_000003_advisor::Advisor;

static FK_CHAPERONE_ADVISOR_ID: &str = "fk_chaperone_advisor_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Chaperone::Table)
                    .if_not_exists()
                    .col(pk_auto(Chaperone::Id))
                    .col(integer_uniq(Chaperone::AdvisorId))
                    .col(string(Chaperone::Name))
                    .col(string(Chaperone::Email))
                    .col(string(Chaperone::Phone))
                    .col(string_null(Chaperone::InviteToken))
                    .col(boolean(Chaperone::InviteSent))
                    .col(boolean(Chaperone::Confirmed))
                    .col(string_null(Chaperone::Signature))
                    .col(timestamp_null(Chaperone::SignatureDate))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CHAPERONE_ADVISOR_ID)
                    .from_tbl(Chaperone::Table)
                    .from_col(Chaperone::AdvisorId)
                    .to_tbl(Advisor::Table)
                    .to_col(Advisor::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CHAPERONE_ADVISOR_ID)
                    .table(Chaperone::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Chaperone::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Chaperone {
    Table,
    Id,
    AdvisorId,
    Name,
    Email,
    Phone,
    InviteToken,
    InviteSent,
    Confirmed,
    Signature,
    SignatureDate,
}
