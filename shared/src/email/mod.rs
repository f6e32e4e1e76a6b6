use log::{error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SenderProfile;
use crate::models::{is_valid_email, InviteRequest};

pub mod templates;

const EMAIL_API_URL: &str = "https://api.resend.com";

#[derive(Error, Debug)]
pub enum EmailError {
    /// Required field missing or malformed. No outbound call is made.
    #[error("{0}")]
    Validation(String),
    /// The provider answered with a non-2xx status.
    #[error("Email provider error: {0}")]
    Upstream(String),
    /// Transport failure or unreadable provider response.
    #[error("{0}")]
    Unexpected(String),
}

#[derive(Serialize, Debug)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize, Debug, Default)]
struct ProviderErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Transactional email client. One client instance per service, configured
/// with a bearer credential and a sender profile; sending is a single
/// attempt with no retry, so calling it twice sends two emails.
#[derive(Clone)]
pub struct EmailClient {
    http: Client,
    base_url: String,
    api_key: String,
    sender: SenderProfile,
}

impl EmailClient {
    pub fn new(api_key: String, sender: SenderProfile) -> Self {
        Self::with_base_url(EMAIL_API_URL.to_string(), api_key, sender)
    }

    /// Constructor with an explicit provider URL, used by tests to point at
    /// a mock server.
    pub fn with_base_url(base_url: String, api_key: String, sender: SenderProfile) -> Self {
        Self {
            http: Client::new(),
            base_url,
            api_key,
            sender,
        }
    }

    /// Renders and dispatches one invitation email. Validation failures
    /// return before any network call. Returns the provider message id.
    pub async fn send_invite(&self, invite: &InviteRequest) -> Result<String, EmailError> {
        validate_invite(invite)?;

        let subject = templates::invite_subject(invite.inviter_name.as_deref());
        let html = templates::render_invite_html(invite);
        let text = templates::render_invite_text(invite);

        info!(
            "Dispatching invitation email to {} for family '{}'",
            invite.invite_email, invite.family_name
        );

        self.send(&invite.invite_email, &subject, &html, &text).await
    }

    async fn send(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        text: &str,
    ) -> Result<String, EmailError> {
        let payload = SendEmailRequest {
            from: &self.sender.from,
            to: vec![to],
            subject,
            html,
            text,
            reply_to: self.sender.reply_to.as_deref(),
        };

        let response = self
            .http
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach email provider: {}", e);
                EmailError::Unexpected(format!("Failed to reach email provider: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: ProviderErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .message
                .unwrap_or_else(|| format!("provider returned status {}", status));
            error!("Email provider rejected send: {}", message);
            return Err(EmailError::Upstream(message));
        }

        let sent: SendEmailResponse = response.json().await.map_err(|e| {
            error!("Failed to parse email provider response: {}", e);
            EmailError::Unexpected(format!("Failed to parse provider response: {}", e))
        })?;

        info!("Email provider accepted send, id={}", sent.id);
        Ok(sent.id)
    }
}

fn validate_invite(invite: &InviteRequest) -> Result<(), EmailError> {
    if invite.invite_email.trim().is_empty() {
        return Err(EmailError::Validation("inviteEmail is required".into()));
    }
    if !is_valid_email(&invite.invite_email) {
        return Err(EmailError::Validation(format!(
            "inviteEmail is not a valid address: {}",
            invite.invite_email
        )));
    }
    if invite.family_name.trim().is_empty() {
        return Err(EmailError::Validation("familyName is required".into()));
    }
    if invite.invite_link.trim().is_empty() {
        return Err(EmailError::Validation("inviteLink is required".into()));
    }
    Ok(())
}
