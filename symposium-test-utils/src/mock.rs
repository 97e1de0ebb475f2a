//! Mockito helpers for the email provider's API.

use mockito::{Mock, ServerGuard};

/// Mocks the provider's `POST /messages` endpoint.
///
/// # Arguments
/// - `server` - The mockito server the test mail client points at
/// - `expect` - Exact number of sends the test is expected to perform
pub fn mock_send_message_endpoint(server: &mut ServerGuard, expect: usize) -> Mock {
    server
        .mock("POST", "/messages")
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"msg_test"}"#)
        .expect(expect)
        .create()
}

/// Mocks the provider's `POST /messages` endpoint returning a failure status.
pub fn mock_send_message_failure_endpoint(server: &mut ServerGuard, expect: usize) -> Mock {
    server
        .mock("POST", "/messages")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"provider unavailable"}"#)
        .expect(expect)
        .create()
}
