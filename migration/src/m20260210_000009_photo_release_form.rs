use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260210_000005_student::Student;

static FK_PHOTO_RELEASE_FORM_STUDENT_ID: &str = "fk_photo_release_form_student_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PhotoReleaseForm::Table)
                    .if_not_exists()
                    .col(pk_auto(PhotoReleaseForm::Id))
                    .col(integer_uniq(PhotoReleaseForm::StudentId))
                    .col(string_null(PhotoReleaseForm::TeamMemberParentEmail))
                    .col(boolean(PhotoReleaseForm::Completed))
                    .col(timestamp(PhotoReleaseForm::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PHOTO_RELEASE_FORM_STUDENT_ID)
                    .from_tbl(PhotoReleaseForm::Table)
                    .from_col(PhotoReleaseForm::StudentId)
                    .to_tbl(Student::Table)
                    .to_col(Student::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PHOTO_RELEASE_FORM_STUDENT_ID)
                    .table(PhotoReleaseForm::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PhotoReleaseForm::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PhotoReleaseForm {
    Table,
    Id,
    StudentId,
    TeamMemberParentEmail,
    Completed,
    CreatedAt,
}
