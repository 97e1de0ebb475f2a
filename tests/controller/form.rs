//! Status-code contract of the token-gated form endpoints.

use serde_json::json;
use symposium_test_utils::prelude::*;

use symposium::{
    model::form::StatementSigner, service::invitation::InvitationService,
};

use crate::util::{app, send};

/// Inserts a student and mails a teacher invitation, returning the token.
async fn invited_teacher_token(test: &mut TestSetup) -> Result<String, TestError> {
    let (_, _, student) = fixtures::insert_school_with_advisor_and_student(&test.state.db).await?;
    let _mock = mock_send_message_endpoint(&mut test.server, 1);

    let invitation_service =
        InvitationService::new(&test.state.db, &test.state.mailer, "http://localhost:8080");
    let party = invitation_service
        .send_statement_invitation(
            &student,
            StatementSigner::Teacher,
            "T. Teach",
            "teach@example.org",
        )
        .await
        .unwrap();

    Ok(party.invite_token.unwrap())
}

#[tokio::test]
async fn malformed_token_returns_400() -> Result<(), TestError> {
    let test = test_setup_with_app_tables!()?;

    let app = app(&test);

    for uri in [
        "/api/form/statement?token=42_teacher",
        "/api/form/photo-release?token=not-a-token",
        "/api/form/chaperone?token=1_chaperone_1700000000_abc_extra",
    ] {
        let (status, _, _) = send(&app, "GET", uri, None, None).await;

        assert_eq!(status, 400, "{} should reject a malformed token", uri);
    }

    Ok(())
}

#[tokio::test]
async fn unknown_subject_returns_404() -> Result<(), TestError> {
    let test = test_setup_with_app_tables!()?;

    let app = app(&test);

    let (status, _, _) = send(
        &app,
        "GET",
        "/api/form/statement?token=999_teacher_1700000000_abcdefghijkl",
        None,
        None,
    )
    .await;

    assert_eq!(status, 404);

    Ok(())
}

#[tokio::test]
async fn token_mismatch_returns_403() -> Result<(), TestError> {
    let mut test = test_setup_with_app_tables!()?;
    let token = invited_teacher_token(&mut test).await?;

    let app = app(&test);

    // Same subject and purpose, different suffix: not the stored token.
    let forged = format!(
        "{}_forgedsuffix",
        token.rsplit_once('_').unwrap().0
    );

    let (status, _, _) = send(
        &app,
        "GET",
        &format!("/api/form/statement?token={}", forged),
        None,
        None,
    )
    .await;

    assert_eq!(status, 403);

    Ok(())
}

#[tokio::test]
async fn purpose_for_wrong_form_returns_400() -> Result<(), TestError> {
    let mut test = test_setup_with_app_tables!()?;
    let token = invited_teacher_token(&mut test).await?;

    let app = app(&test);

    let (status, _, _) = send(
        &app,
        "GET",
        &format!("/api/form/photo-release?token={}", token),
        None,
        None,
    )
    .await;

    assert_eq!(status, 400);

    Ok(())
}

#[tokio::test]
async fn completed_submission_consumes_the_token() -> Result<(), TestError> {
    let mut test = test_setup_with_app_tables!()?;
    let token = invited_teacher_token(&mut test).await?;

    let app = app(&test);

    let uri = format!("/api/form/statement?token={}", token);

    let (status, _, _) = send(
        &app,
        "POST",
        &uri,
        None,
        Some(json!({ "signature": "T. Teach" })),
    )
    .await;
    assert_eq!(status, 200);

    // Both re-reading and re-posting fail once the token is consumed.
    let (status, _, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, 403);

    let (status, _, _) = send(
        &app,
        "POST",
        &uri,
        None,
        Some(json!({ "signature": "T. Teach" })),
    )
    .await;
    assert_eq!(status, 403);

    Ok(())
}
