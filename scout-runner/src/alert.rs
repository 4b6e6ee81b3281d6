//! Operator alerts
//!
//! Raised when a job worker finds the session credential has been
//! rejected, since nothing can progress until someone logs in again and
//! replaces the cookie file. Delivery is best effort.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{error, info, warn};

/// Sink for operator notifications
#[async_trait]
pub trait Alerter: Send + Sync {
    /// Notifies the operator; delivery failures are logged, never returned
    async fn notify_operator(&self, reason: &str);
}

/// Writes the alert to the log only
#[derive(Debug, Default)]
pub struct LogAlerter;

#[async_trait]
impl Alerter for LogAlerter {
    async fn notify_operator(&self, reason: &str) {
        error!(reason, "Operator attention required");
    }
}

#[derive(Debug, Serialize)]
struct AlertPayload<'a> {
    subject: &'a str,
    text: &'a str,
    timestamp: chrono::DateTime<chrono::Utc>,
}

/// Posts the alert as JSON to a webhook
#[derive(Debug, Clone)]
pub struct WebhookAlerter {
    url: String,
    client: Client,
}

impl WebhookAlerter {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl Alerter for WebhookAlerter {
    async fn notify_operator(&self, reason: &str) {
        // Always leave a trace locally, delivery may fail.
        error!(reason, "Operator attention required");

        let payload = AlertPayload {
            subject: "Recruiting session expired",
            text: reason,
            timestamp: chrono::Utc::now(),
        };

        match self.client.post(&self.url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Operator alert delivered");
            }
            Ok(response) => {
                warn!("Operator alert rejected by webhook: {}", response.status());
            }
            Err(e) => {
                warn!("Failed to deliver operator alert: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_webhook_failure_is_swallowed() {
        // Port 9 (discard) on localhost is never an HTTP server.
        let alerter = WebhookAlerter::new("http://127.0.0.1:9/alert");
        alerter.notify_operator("session expired").await;
    }

    #[tokio::test]
    async fn test_log_alerter() {
        LogAlerter.notify_operator("session expired").await;
    }
}
