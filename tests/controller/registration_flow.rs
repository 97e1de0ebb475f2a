//! End-to-end registration and signature flow over the real router.
//!
//! Advisor registers with a new school; a student registers under them; the
//! advisor approves the student; the student uploads a research plan, signs
//! their statement, and invites a teacher; the teacher signs through the
//! token link; the form derives completed.

use serde_json::json;
use symposium_test_utils::prelude::*;

use symposium::{
    data::statement::StatementFormRepository, model::token::InvitePurpose,
};

use crate::util::{app, send, send_upload};

#[tokio::test]
async fn full_registration_and_signature_flow() -> Result<(), TestError> {
    let mut test = test_setup_with_app_tables!()?;
    // Verification codes for two registrations, one approval notice, one
    // invitation link.
    let mock = mock_send_message_endpoint(&mut test.server, 4);

    let app = app(&test);

    // Advisor account + profile with a new school.
    let (status, advisor_cookie, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "jane.doe@lincoln.example.org",
            "password": "correct horse battery",
            "role": "advisor"
        })),
    )
    .await;
    assert_eq!(status, 201);
    let advisor_cookie = advisor_cookie.unwrap();

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/advisor/register",
        Some(&advisor_cookie),
        Some(json!({
            "name": "Jane Doe",
            "new_school": { "name": "Lincoln High", "address": "1 Lincoln Way" }
        })),
    )
    .await;
    assert_eq!(status, 201);

    // The school now appears on the public reference list.
    let (status, _, schools) = send(&app, "GET", "/api/schools", None, None).await;
    assert_eq!(status, 200);
    let school_id = schools[0]["id"].as_i64().unwrap();
    assert_eq!(schools[0]["name"], "Lincoln High");

    let (_, _, advisor_dashboard) = send(
        &app,
        "GET",
        "/api/advisor/dashboard",
        Some(&advisor_cookie),
        None,
    )
    .await;
    let advisor_id = advisor_dashboard["advisor"]["id"].as_i64().unwrap();

    // Student account + profile under that advisor.
    let (status, student_cookie, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "a.lee@example.org",
            "password": "correct horse battery",
            "role": "student"
        })),
    )
    .await;
    assert_eq!(status, 201);
    let student_cookie = student_cookie.unwrap();

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/student/register",
        Some(&student_cookie),
        Some(json!({
            "name": "A. Lee",
            "school_id": school_id,
            "advisor_id": advisor_id,
            "grade": 11,
            "project_title": "Bioluminescent Algae"
        })),
    )
    .await;
    assert_eq!(status, 201);

    // Advisor approves the student; the approval notice is mailed.
    let (_, _, advisor_dashboard) = send(
        &app,
        "GET",
        "/api/advisor/dashboard",
        Some(&advisor_cookie),
        None,
    )
    .await;
    let student_id = advisor_dashboard["students"][0]["id"].as_i64().unwrap();

    let (status, _, _) = send(
        &app,
        "POST",
        &format!("/api/advisor/students/{}/status", student_id),
        Some(&advisor_cookie),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, 200);

    // Research plan upload lands on the student record.
    let (status, _, upload) = send_upload(
        &app,
        "/api/student/materials/research-plan",
        &student_cookie,
        "plan.pdf",
        b"%PDF-1.7 research plan",
    )
    .await;
    assert_eq!(status, 200);
    assert!(upload["url"].as_str().unwrap().ends_with("research-plan.pdf"));

    // Student signs their part, then invites a teacher.
    let (status, _, _) = send(
        &app,
        "POST",
        "/api/student/statement/sign",
        Some(&student_cookie),
        Some(json!({ "signature": "A. Lee" })),
    )
    .await;
    assert_eq!(status, 200);

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/invitation/statement",
        Some(&student_cookie),
        Some(json!({
            "signer": "teacher",
            "name": "T. Teach",
            "email": "teach@lincoln.example.org"
        })),
    )
    .await;
    assert_eq!(status, 200);

    // The mailed token is whatever landed on the party row.
    let statement_repo = StatementFormRepository::new(&test.state.db);
    let form = statement_repo
        .get_by_student_id(student_id as i32)
        .await?
        .unwrap();
    let party = statement_repo
        .get_party(form.id, InvitePurpose::Teacher)
        .await?
        .unwrap();
    let token = party.invite_token.unwrap();

    // Teacher opens the link, then signs.
    let (status, _, view) = send(
        &app,
        "GET",
        &format!("/api/form/statement?token={}", token),
        None,
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(view["student_name"], "A. Lee");
    assert_eq!(view["project_title"], "Bioluminescent Algae");

    let (status, _, _) = send(
        &app,
        "POST",
        &format!("/api/form/statement?token={}", token),
        None,
        Some(json!({
            "signature": "T. Teach",
            "comments": "Supervised lab work only."
        })),
    )
    .await;
    assert_eq!(status, 200);

    // Student and teacher have both signed: the form is complete.
    let (status, _, dashboard) = send(
        &app,
        "GET",
        "/api/student/dashboard",
        Some(&student_cookie),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(dashboard["student"]["status"], "approved");
    assert_eq!(dashboard["statement"]["completed"], true);
    assert_eq!(dashboard["statement"]["student_completed"], true);

    mock.assert();

    tokio::fs::remove_dir_all("uploads").await.ok();

    Ok(())
}

#[tokio::test]
async fn login_rejects_unknown_account() -> Result<(), TestError> {
    let test = test_setup_with_app_tables!()?;

    let app = app(&test);

    let (status, cookie, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({
            "email": "nobody@example.org",
            "password": "irrelevant"
        })),
    )
    .await;

    assert_eq!(status, 401);
    assert!(cookie.is_none());
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn role_gated_dashboards_refuse_anonymous_callers() -> Result<(), TestError> {
    let test = test_setup_with_app_tables!()?;

    let app = app(&test);

    for uri in [
        "/api/advisor/dashboard",
        "/api/student/dashboard",
        "/api/judge/dashboard",
        "/api/admin/dashboard",
    ] {
        let (status, _, _) = send(&app, "GET", uri, None, None).await;

        assert_eq!(status, 401, "{} should require a session", uri);
    }

    Ok(())
}
