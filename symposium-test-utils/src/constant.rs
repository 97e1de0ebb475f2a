//! Shared constant values for test setup.

/// Placeholder provider API key used when creating test mail clients.
pub static TEST_EMAIL_API_KEY: &str = "email_api_key";

/// Sender address configured on test mail clients.
pub static TEST_FROM_ADDRESS: &str = "registration@symposium.example.org";
