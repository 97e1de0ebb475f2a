use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260210_000001_school::School, m20260210_000002_user::User,
    m20260210_000003_advisor::Advisor,
};

static FK_STUDENT_USER_ID: &str = "fk_student_user_id";
static FK_STUDENT_SCHOOL_ID: &str = "fk_student_school_id";
static FK_STUDENT_ADVISOR_ID: &str = "fk_student_advisor_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(pk_auto(Student::Id))
                    .col(integer_uniq(Student::UserId))
                    .col(string(Student::Name))
                    .col(string(Student::Email))
                    .col(integer(Student::SchoolId))
                    .col(integer(Student::AdvisorId))
                    .col(integer(Student::Grade))
                    .col(string(Student::ProjectTitle))
                    .col(string(Student::Status))
                    .col(string(Student::PaymentStatus))
                    .col(string(Student::SrcReview))
                    .col(string_null(Student::ResearchPlanUrl))
                    .col(string_null(Student::AbstractUrl))
                    .col(string_null(Student::SlideshowUrl))
                    .col(string_null(Student::PresentationUrl))
                    .col(string_null(Student::ResearchReportUrl))
                    .col(timestamp(Student::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STUDENT_USER_ID)
                    .from_tbl(Student::Table)
                    .from_col(Student::UserId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STUDENT_SCHOOL_ID)
                    .from_tbl(Student::Table)
                    .from_col(Student::SchoolId)
                    .to_tbl(School::Table)
                    .to_col(School::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_STUDENT_ADVISOR_ID)
                    .from_tbl(Student::Table)
                    .from_col(Student::AdvisorId)
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
                    .name(FK_STUDENT_ADVISOR_ID)
                    .table(Student::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_STUDENT_SCHOOL_ID)
                    .table(Student::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_STUDENT_USER_ID)
                    .table(Student::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Student {
    Table,
    Id,
    UserId,
    Name,
    Email,
    SchoolId,
    AdvisorId,
    Grade,
    ProjectTitle,
    Status,
    PaymentStatus,
    SrcReview,
    ResearchPlanUrl,
    AbstractUrl,
    SlideshowUrl,
    PresentationUrl,
    ResearchReportUrl,
    CreatedAt,
}
