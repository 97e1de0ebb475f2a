//! Fixtures for signature forms and their parties.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};

pub async fn insert_statement_form<C: ConnectionTrait>(
    db: &C,
    student_id: i32,
) -> Result<entity::statement_form::Model, DbErr> {
    let form = entity::statement_form::ActiveModel {
        student_id: ActiveValue::Set(student_id),
        student_signature: ActiveValue::Set(None),
        student_signature_date: ActiveValue::Set(None),
        student_completed: ActiveValue::Set(false),
        completed: ActiveValue::Set(false),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    form.insert(db).await
}

pub async fn insert_statement_party<C: ConnectionTrait>(
    db: &C,
    form_id: i32,
    party: &str,
    email: &str,
    invite_token: Option<&str>,
) -> Result<entity::statement_party::Model, DbErr> {
    let row = entity::statement_party::ActiveModel {
        form_id: ActiveValue::Set(form_id),
        party: ActiveValue::Set(party.to_string()),
        name: ActiveValue::Set(format!("{} signer", party)),
        email: ActiveValue::Set(email.to_string()),
        invite_token: ActiveValue::Set(invite_token.map(str::to_string)),
        invite_sent: ActiveValue::Set(invite_token.is_some()),
        comments: ActiveValue::Set(None),
        signature: ActiveValue::Set(None),
        signature_date: ActiveValue::Set(None),
        completed: ActiveValue::Set(false),
        ..Default::default()
    };

    row.insert(db).await
}

pub async fn insert_photo_release_form<C: ConnectionTrait>(
    db: &C,
    student_id: i32,
    team_member_parent_email: Option<&str>,
) -> Result<entity::photo_release_form::Model, DbErr> {
    let form = entity::photo_release_form::ActiveModel {
        student_id: ActiveValue::Set(student_id),
        team_member_parent_email: ActiveValue::Set(team_member_parent_email.map(str::to_string)),
        completed: ActiveValue::Set(false),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    form.insert(db).await
}

pub async fn insert_photo_release_party<C: ConnectionTrait>(
    db: &C,
    form_id: i32,
    party: &str,
    email: &str,
    invite_token: Option<&str>,
) -> Result<entity::photo_release_party::Model, DbErr> {
    let row = entity::photo_release_party::ActiveModel {
        form_id: ActiveValue::Set(form_id),
        party: ActiveValue::Set(party.to_string()),
        email: ActiveValue::Set(email.to_string()),
        invite_token: ActiveValue::Set(invite_token.map(str::to_string)),
        invite_sent: ActiveValue::Set(invite_token.is_some()),
        signature: ActiveValue::Set(None),
        signature_date: ActiveValue::Set(None),
        completed: ActiveValue::Set(false),
        ..Default::default()
    };

    row.insert(db).await
}

pub async fn insert_chaperone<C: ConnectionTrait>(
    db: &C,
    advisor_id: i32,
    invite_token: Option<&str>,
) -> Result<entity::chaperone::Model, DbErr> {
    let chaperone = entity::chaperone::ActiveModel {
        advisor_id: ActiveValue::Set(advisor_id),
        name: ActiveValue::Set("Pat Rivera".to_string()),
        email: ActiveValue::Set("chaperone@example.org".to_string()),
        phone: ActiveValue::Set("555-0100".to_string()),
        invite_token: ActiveValue::Set(invite_token.map(str::to_string)),
        invite_sent: ActiveValue::Set(invite_token.is_some()),
        confirmed: ActiveValue::Set(false),
        signature: ActiveValue::Set(None),
        signature_date: ActiveValue::Set(None),
        ..Default::default()
    };

    chaperone.insert(db).await
}
