//! Webhook Config

use std::time::Duration;

use clap::Args;

/// Webhook delivery settings.
#[derive(Debug, Args)]
pub struct WebhookDeliveryConfig {
    /// Webhook delivery timeout in seconds
    #[arg(long, env = "WEBHOOK_TIMEOUT_SECONDS", default_value_t = 5_u64)]
    pub timeout_seconds: u64,
}

impl WebhookDeliveryConfig {
    /// Upper bound on a single webhook delivery.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
