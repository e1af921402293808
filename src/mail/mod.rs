//! Outbound email
//!
//! The [`Mailer`] trait is what the account service talks to. [`HttpMailer`]
//! delivers through a JSON mail API (Resend-compatible): `POST` with a bearer
//! key and a `{from, to, subject, text}` body.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::config::MailConfig;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Failed to build mail client: {0}")]
    Client(String),

    #[error("Mail transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail API returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A plain-text message ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl Email {
    /// Password reset message pointing at `reset_link`
    pub fn password_reset(to: &str, reset_link: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Password Reset".to_string(),
            text: format!(
                "Click the following link to reset your password: {}",
                reset_link
            ),
        }
    }
}

/// Build the link sent in a reset email
pub fn reset_link(base: &str, token: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}token={token}")
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

/// Mail API client
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let client = Client::builder()
            .user_agent(concat!("propdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MailError::Client(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let body = SendEmailBody {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            text: &email.text,
        };

        let started = Instant::now();
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(
            status = %status.as_u16(),
            duration_ms = %started.elapsed().as_millis(),
            subject = %email.subject,
            "Mail API responded"
        );

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MailError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
