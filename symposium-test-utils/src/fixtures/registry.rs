//! Fixtures for accounts, schools, and role profiles.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

/// Placeholder PBKDF2 hash; tests that exercise password verification hash
/// their own plaintext instead of using this value.
pub static TEST_PASSWORD_HASH: &str = "$pbkdf2-sha256$i=600000,l=32$c2FsdHNhbHQ$placeholder";

pub async fn insert_school<C: ConnectionTrait>(db: &C) -> Result<entity::school::Model, DbErr> {
    let school = entity::school::ActiveModel {
        name: ActiveValue::Set("Lincoln High".to_string()),
        address: ActiveValue::Set("1 Lincoln Way".to_string()),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    school.insert(db).await
}

pub async fn insert_user<C: ConnectionTrait>(
    db: &C,
    email: &str,
    role: &str,
) -> Result<entity::user::Model, DbErr> {
    let user = entity::user::ActiveModel {
        email: ActiveValue::Set(email.to_string()),
        password_hash: ActiveValue::Set(TEST_PASSWORD_HASH.to_string()),
        role: ActiveValue::Set(role.to_string()),
        email_verified: ActiveValue::Set(true),
        verification_code: ActiveValue::Set(None),
        verification_code_expiry: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    user.insert(db).await
}

pub async fn insert_advisor<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    school_id: i32,
    status: &str,
) -> Result<entity::advisor::Model, DbErr> {
    let advisor = entity::advisor::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        name: ActiveValue::Set("Jane Doe".to_string()),
        email: ActiveValue::Set(format!("advisor{}@example.org", user_id)),
        school_id: ActiveValue::Set(school_id),
        status: ActiveValue::Set(status.to_string()),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    advisor.insert(db).await
}

pub async fn insert_student<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    school_id: i32,
    advisor_id: i32,
    status: &str,
) -> Result<entity::student::Model, DbErr> {
    let student = entity::student::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        name: ActiveValue::Set("A. Lee".to_string()),
        email: ActiveValue::Set(format!("student{}@example.org", user_id)),
        school_id: ActiveValue::Set(school_id),
        advisor_id: ActiveValue::Set(advisor_id),
        grade: ActiveValue::Set(11),
        project_title: ActiveValue::Set("Bioluminescent Algae".to_string()),
        status: ActiveValue::Set(status.to_string()),
        payment_status: ActiveValue::Set("unpaid".to_string()),
        src_review: ActiveValue::Set("undecided".to_string()),
        research_plan_url: ActiveValue::Set(None),
        abstract_url: ActiveValue::Set(None),
        slideshow_url: ActiveValue::Set(None),
        presentation_url: ActiveValue::Set(None),
        research_report_url: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    student.insert(db).await
}

pub async fn insert_judge<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    status: &str,
) -> Result<entity::judge::Model, DbErr> {
    let judge = entity::judge::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        name: ActiveValue::Set("Dr. R. Osei".to_string()),
        email: ActiveValue::Set(format!("judge{}@example.org", user_id)),
        occupation: ActiveValue::Set("Research Scientist".to_string()),
        employer: ActiveValue::Set("Regional University".to_string()),
        highest_degree: ActiveValue::Set("PhD".to_string()),
        research_areas: ActiveValue::Set("Microbiology".to_string()),
        status: ActiveValue::Set(status.to_string()),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    judge.insert(db).await
}

/// Inserts a school, an advisor account + profile, and a student account +
/// profile under that advisor. Returns (school, advisor, student).
pub async fn insert_school_with_advisor_and_student<C: ConnectionTrait>(
    db: &C,
) -> Result<
    (
        entity::school::Model,
        entity::advisor::Model,
        entity::student::Model,
    ),
    DbErr,
> {
    let school = insert_school(db).await?;

    let advisor_user = insert_user(db, "advisor@example.org", "advisor").await?;
    let advisor = insert_advisor(db, advisor_user.id, school.id, "approved").await?;

    let student_user = insert_user(db, "student@example.org", "student").await?;
    let student = insert_student(db, student_user.id, school.id, advisor.id, "pending").await?;

    Ok((school, advisor, student))
}
