use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260210_000005_student::Student;

static FK_STATEMENT_FORM_STUDENT_ID: &str = "fk_statement_form_student_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StatementForm::Table)
                    .if_not_exists()
                    .col(pk_auto(StatementForm::Id))
                    .col(integer_uniq(StatementForm::StudentId))
                    .col(string_null(StatementForm::StudentSignature))
                    .col(timestamp_null(StatementForm::StudentSignatureDate))
                    .col(boolean(StatementForm::StudentCompleted))
                    .col(boolean(StatementForm::Completed))
                    .col(timestamp(StatementForm::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STATEMENT_FORM_STUDENT_ID)
                    .from_tbl(StatementForm::Table)
                    .from_col(StatementForm::StudentId)
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
                    .name(FK_STATEMENT_FORM_STUDENT_ID)
                    .table(StatementForm::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StatementForm::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum StatementForm {
    Table,
    Id,
    StudentId,
    StudentSignature,
    StudentSignatureDate,
    StudentCompleted,
    Completed,
    CreatedAt,
}
