//! Thin client for the transactional email provider's HTTP API.
//!
//! Every outbound message (verification codes, approval notices, invitation
//! links) goes through [`Client::send`]. Sends are synchronous with the
//! calling request; there is no queueing or retry here.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Client was built without a required field.
    #[error("Mailer configuration error: missing {0}")]
    MissingConfig(&'static str),
    /// The provider rejected the message.
    #[error("Email provider returned status {0}")]
    Provider(u16),
    /// The request to the provider failed before a response was received.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// A single outbound message.
#[derive(Debug, Clone)]
pub struct Message {
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Client for the provider's `POST /messages` endpoint.
///
/// Cheap to clone; the underlying HTTP connection pool is shared.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Submits a message to the provider.
    ///
    /// Returns `Ok(())` only when the provider accepted the message; any
    /// non-success status is surfaced as [`Error::Provider`].
    pub async fn send(&self, message: &Message) -> Result<(), Error> {
        let body = SendRequest {
            from: &self.from_address,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
        };

        let response = self
            .http
            .post(format!("{}/messages", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Provider(response.status().as_u16()));
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct ClientBuilder {
    api_url: Option<String>,
    api_key: Option<String>,
    from_address: Option<String>,
}

impl ClientBuilder {
    pub fn api_url(mut self, api_url: &str) -> Self {
        self.api_url = Some(api_url.trim_end_matches('/').to_string());
        self
    }

    pub fn api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn from_address(mut self, from_address: &str) -> Self {
        self.from_address = Some(from_address.to_string());
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        Ok(Client {
            http: reqwest::Client::new(),
            api_url: self.api_url.ok_or(Error::MissingConfig("api_url"))?,
            api_key: self.api_key.ok_or(Error::MissingConfig("api_key"))?,
            from_address: self
                .from_address
                .ok_or(Error::MissingConfig("from_address"))?,
        })
    }
}
