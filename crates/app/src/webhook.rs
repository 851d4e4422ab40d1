//! Gate trigger webhook delivery.

use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reqwest::Client;
use tracing::warn;

/// Default upper bound on a single webhook delivery.
pub const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

#[automock]
#[async_trait]
/// Delivers gate-open notifications to a tenant's local hub.
///
/// Ordinary transport failures are part of the contract: implementations
/// report them as `false` instead of erroring.
pub trait WebhookNotifier: Send + Sync {
    /// Notify the hub at `webhook_url` that `plate` was authorized.
    async fn trigger(
        &self,
        webhook_url: &str,
        plate: &str,
        tenant_id: &str,
        timestamp: Timestamp,
    ) -> bool;
}

/// HTTP webhook notifier.
#[derive(Debug, Clone)]
pub struct HttpWebhookNotifier {
    http: Client,
    timeout: Duration,
}

impl HttpWebhookNotifier {
    /// Create a notifier with the given per-delivery timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            timeout,
        }
    }
}

impl Default for HttpWebhookNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_WEBHOOK_TIMEOUT)
    }
}

#[async_trait]
impl WebhookNotifier for HttpWebhookNotifier {
    async fn trigger(
        &self,
        webhook_url: &str,
        plate: &str,
        tenant_id: &str,
        timestamp: Timestamp,
    ) -> bool {
        let body = serde_json::json!({
            "plate": plate,
            "timestamp": timestamp,
            "tenant_id": tenant_id,
        });

        let response = self
            .http
            .post(webhook_url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await;

        match response {
            Ok(response) => matches!(response.status().as_u16(), 200 | 201 | 204),
            Err(error) => {
                warn!(tenant = %tenant_id, "webhook delivery failed: {error}");

                false
            }
        }
    }
}
