use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260210_000009_photo_release_form::PhotoReleaseForm;

static FK_PHOTO_RELEASE_PARTY_FORM_ID: &str = "fk_photo_release_party_form_id";
static IDX_PHOTO_RELEASE_PARTY_FORM_PARTY: &str = "idx_photo_release_party_form_id_party";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhotoReleaseParty::Table)
                    .if_not_exists()
                    .col(pk_auto(PhotoReleaseParty::Id))
                    .col(integer(PhotoReleaseParty::FormId))
                    .col(string(PhotoReleaseParty::Party))
                    .col(string(PhotoReleaseParty::Email))
                    .col(string_null(PhotoReleaseParty::InviteToken))
                    .col(boolean(PhotoReleaseParty::InviteSent))
                    .col(string_null(PhotoReleaseParty::Signature))
                    .col(timestamp_null(PhotoReleaseParty::SignatureDate))
                    .col(boolean(PhotoReleaseParty::Completed))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PHOTO_RELEASE_PARTY_FORM_ID)
                    .from_tbl(PhotoReleaseParty::Table)
                    .from_col(PhotoReleaseParty::FormId)
                    .to_tbl(PhotoReleaseForm::Table)
                    .to_col(PhotoReleaseForm::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PHOTO_RELEASE_PARTY_FORM_PARTY)
                    .table(PhotoReleaseParty::Table)
                    .col(PhotoReleaseParty::FormId)
                    .col(PhotoReleaseParty::Party)
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
                    .name(IDX_PHOTO_RELEASE_PARTY_FORM_PARTY)
                    .table(PhotoReleaseParty::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PHOTO_RELEASE_PARTY_FORM_ID)
                    .table(PhotoReleaseParty::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PhotoReleaseParty::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PhotoReleaseParty {
    Table,
    Id,
    FormId,
    Party,
    Email,
    InviteToken,
    InviteSent,
    Signature,
    SignatureDate,
    Completed,
}
