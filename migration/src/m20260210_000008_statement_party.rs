use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260210_000007_statement_form::StatementForm;

static FK_STATEMENT_PARTY_FORM_ID: &str = "fk_statement_party_form_id";
static IDX_STATEMENT_PARTY_FORM_PARTY: &str = "idx_statement_party_form_id_party";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StatementParty::Table)
                    .if_not_exists()
                    .col(pk_auto(StatementParty::Id))
                    .col(integer(StatementParty::FormId))
                    .col(string(StatementParty::Party))
                    .col(string(StatementParty::Name))
                    .col(string(StatementParty::Email))
                    .col(string_null(StatementParty::InviteToken))
                    .col(boolean(StatementParty::InviteSent))
                    .col(string_null(StatementParty::Comments))
                    .col(string_null(StatementParty::Signature))
                    .col(timestamp_null(StatementParty::SignatureDate))
                    .col(boolean(StatementParty::Completed))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STATEMENT_PARTY_FORM_ID)
                    .from_tbl(StatementParty::Table)
                    .from_col(StatementParty::FormId)
                    .to_tbl(StatementForm::Table)
                    .to_col(StatementForm::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_STATEMENT_PARTY_FORM_PARTY)
                    .table(StatementParty::Table)
                    .col(StatementParty::FormId)
                    .col(StatementParty::Party)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_STATEMENT_PARTY_FORM_PARTY)
                    .table(StatementParty::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_STATEMENT_PARTY_FORM_ID)
                    .table(StatementParty::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StatementParty::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum StatementParty {
    Table,
    Id,
    FormId,
    Party,
    Name,
    Email,
    InviteToken,
    InviteSent,
    Comments,
    Signature,
    SignatureDate,
    Completed,
}
