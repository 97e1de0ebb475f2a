pub use sea_orm_migration::prelude::*;

mod m20260210_000001_school;
mod m20260210_000002_user;
mod m20260210_000003_advisor;
mod m20260210_000004_chaperone;
mod m20260210_000005_student;
mod m20260210_000006_judge;
mod m20260210_000007_statement_form;
mod m20260210_000008_statement_party;
mod m20260210_000009_photo_release_form;
mod m20260210_000010_photo_release_party;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260210_000001_school::Migration),
            Box::new(m20260210_000002_user::Migration),
            Box::new(m20260210_000003_advisor::Migration),
            Box::new(m20260210_000004_chaperone::Migration),
            Box::new(m20260210_000005_student::Migration),
            Box::new(m20260210_000006_judge::Migration),
            Box::new(m20260210_000007_statement_form::Migration),
            Box::new(m20260210_000008_statement_party::Migration),
            Box::new(m20260210_000009_photo_release_form::Migration),
            Box::new(m20260210_000010_photo_release_party::Migration),
        ]
    }
}
