//! Fire-and-forget payment reminder over the messaging platform's bot API.
//!
//! A reminder failure is logged and never propagated: the request that
//! triggered it must not block on, or fail because of, the messaging API.

use std::sync::Arc;
use std::time::Duration;

use crate::config;

/// HTTP request timeout for a single send attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for reminder delivery failures. Non-fatal by contract:
/// surfaces in the log, never in a response.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The bot API returned a non-2xx status code.
    #[error("Bot API returned HTTP {0}")]
    HttpStatus(u16),
}

/// Sends "time to pay" reminders to users via the bot API.
///
/// Without a configured bot token the notifier is disabled and every send
/// is a logged no-op, which keeps local development free of network calls.
pub struct PaymentReminder {
    client: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl PaymentReminder {
    pub fn from_env() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_base: config::bot_api_base(),
            token: config::bot_token(),
        }
    }

    /// A notifier with no token: every send is a logged no-op. Used by the
    /// HTTP tests, which must not reach out to the network.
    pub fn disabled() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_base: config::DEFAULT_BOT_API_BASE.to_string(),
            token: None,
        }
    }

    /// Send one reminder message to `tlgid`.
    pub async fn send(&self, tlgid: i64, text: &str) -> Result<(), NotifyError> {
        let Some(token) = &self.token else {
            tracing::debug!(tlgid, "Bot token not configured, skipping payment reminder");
            return Ok(());
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let payload = serde_json::json!({
            "chat_id": tlgid,
            "text": text,
        });

        let response = self.client.post(&url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }

    /// Detach a reminder send onto the runtime. The triggering request
    /// continues immediately; a failure only produces a warn log entry.
    pub fn spawn_payment_reminder(self: &Arc<Self>, tlgid: i64) {
        use crate::db::LogOnError;

        let notifier = Arc::clone(self);
        tokio::spawn(async move {
            notifier
                .send(tlgid, config::PAYMENT_REMINDER_TEXT)
                .await
                .log_warn(&format!("Payment reminder to {} failed", tlgid));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_notifier_send_is_a_no_op() {
        let notifier = PaymentReminder::disabled();
        notifier.send(123, "pay up").await.unwrap();
    }

    #[test]
    fn notify_error_display_http_status() {
        let err = NotifyError::HttpStatus(502);
        assert_eq!(err.to_string(), "Bot API returned HTTP 502");
    }
}
