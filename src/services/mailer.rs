use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::config::{ApplicationError, MailerSettings};
use crate::types::db::registrant;

/// Outcome of a single confirmation email attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    Failed,
}

/// Record of one delivery attempt, folded into the submission result
///
/// Ephemeral: lives only for the duration of one submission and is never
/// persisted. `Sent` means the delivery channel accepted the send request,
/// not that delivery was confirmed.
#[derive(Debug, Clone)]
pub struct NotificationAttempt {
    pub email: String,
    pub outcome: NotificationOutcome,
    pub detail: Option<String>,
}

impl NotificationAttempt {
    fn sent(email: &str) -> Self {
        Self {
            email: email.to_string(),
            outcome: NotificationOutcome::Sent,
            detail: None,
        }
    }

    fn failed(email: &str, detail: impl Into<String>) -> Self {
        Self {
            email: email.to_string(),
            outcome: NotificationOutcome::Failed,
            detail: Some(detail.into()),
        }
    }

    pub fn was_sent(&self) -> bool {
        self.outcome == NotificationOutcome::Sent
    }
}

#[derive(Serialize)]
struct SendEmailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

/// Sends the waitlist confirmation email through the delivery channel
///
/// Strictly best-effort: `send_welcome` is attempted exactly once per
/// submission and converts every channel failure (auth, non-2xx, network,
/// timeout) into a failed `NotificationAttempt` instead of an error. The
/// registration it accompanies is never affected.
pub struct Mailer {
    client: reqwest::Client,
    settings: Arc<MailerSettings>,
}

impl Mailer {
    /// Create a new Mailer with a bounded-timeout HTTP client
    ///
    /// # Errors
    /// Returns `ApplicationError` when the HTTP client cannot be
    /// constructed; this is a startup-time failure.
    pub fn new(settings: Arc<MailerSettings>) -> Result<Self, ApplicationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.send_timeout_secs()))
            .build()
            .map_err(|e| {
                ApplicationError::invalid_setting(
                    "MAIL_SEND_TIMEOUT_SECS",
                    format!("failed to build delivery client: {}", e),
                )
            })?;

        Ok(Self { client, settings })
    }

    /// Send the confirmation email for a persisted registration
    ///
    /// Never fails the caller: the returned attempt carries a sanitized
    /// diagnostic instead. Detail strings classify the failure without
    /// echoing credentials or raw channel responses.
    pub async fn send_welcome(&self, registrant: &registrant::Model) -> NotificationAttempt {
        let payload = SendEmailPayload {
            from: self.settings.from_address(),
            to: &registrant.email,
            subject: "Welcome to the waitlist!",
            html: welcome_email_html(&registrant.full_name),
            reply_to: self.settings.reply_to(),
        };

        let url = format!("{}/emails", self.settings.api_base());

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.settings.api_key())
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(email = %registrant.email, "Confirmation email accepted by delivery channel");
                NotificationAttempt::sent(&registrant.email)
            }
            Ok(resp) => {
                let status = resp.status();
                tracing::warn!(
                    email = %registrant.email,
                    status = %status,
                    "Delivery channel rejected confirmation email"
                );
                NotificationAttempt::failed(
                    &registrant.email,
                    format!("delivery channel returned status {}", status.as_u16()),
                )
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!(email = %registrant.email, "Confirmation email timed out");
                NotificationAttempt::failed(&registrant.email, "delivery channel timed out")
            }
            Err(e) => {
                tracing::warn!(email = %registrant.email, error = %e, "Confirmation email failed");
                NotificationAttempt::failed(&registrant.email, "delivery channel unreachable")
            }
        }
    }
}

/// Canonical confirmation email body
///
/// The single source for the welcome template; personalization is limited
/// to the registrant's name.
fn welcome_email_html(full_name: &str) -> String {
    format!(
        concat!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">",
            "<h2>Hello {name},</h2>",
            "<p>Thanks for joining the waitlist!</p>",
            "<p>We'll keep you posted as the launch gets closer.</p>",
            "<hr style=\"border: none; border-top: 1px solid #eaeaea; margin: 20px 0;\" />",
            "<p style=\"color: #666; font-size: 12px;\">",
            "If you didn't sign up, please ignore this email.",
            "</p>",
            "</div>"
        ),
        name = full_name
    )
}
