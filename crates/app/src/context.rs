//! App Context

use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    detection::{DetectionPipeline, DetectionService},
    recognition::{PlateRecognizerClient, RecognizerConfig},
    tenants::{InMemoryTenantsService, TenantRegistry, TenantsService, models::Tenant},
    webhook::HttpWebhookNotifier,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to parse tenant seed config")]
    InvalidSeed(#[source] serde_json::Error),
}

/// Application settings independent of the serving transport.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Recognition service client settings.
    pub recognizer: RecognizerConfig,

    /// Upper bound on a single webhook delivery.
    pub webhook_timeout: Duration,

    /// Optional JSON map of tenants to provision at startup.
    pub tenant_seed: Option<String>,
}

#[derive(Clone)]
pub struct AppContext {
    pub tenants: Arc<dyn TenantsService>,
    pub detection: Arc<dyn DetectionService>,
}

/// Seeded tenant entry as it appears in the startup config.
#[derive(Debug, Deserialize)]
struct SeedTenant {
    #[serde(default)]
    webhook_url: Option<String>,

    #[serde(default)]
    authorized_plates: Vec<String>,

    #[serde(default = "default_cooldown_seconds")]
    cooldown_seconds: u32,
}

const fn default_cooldown_seconds() -> u32 {
    10
}

impl AppContext {
    /// Build the application context, provisioning any seeded tenants.
    ///
    /// # Errors
    ///
    /// Returns an error when the tenant seed config is not valid JSON.
    pub fn from_config(config: AppConfig) -> Result<Self, AppInitError> {
        let registry = Arc::new(TenantRegistry::new());

        if let Some(seed) = config.tenant_seed.as_deref() {
            let seeded: FxHashMap<String, SeedTenant> =
                serde_json::from_str(seed).map_err(AppInitError::InvalidSeed)?;
            let now = Timestamp::now();

            for (id, tenant) in seeded {
                registry.insert(Tenant {
                    id,
                    webhook_url: tenant.webhook_url,
                    authorized_plates: tenant.authorized_plates,
                    cooldown_seconds: tenant.cooldown_seconds,
                    cooldown_until: None,
                    created_at: now,
                });
            }

            info!(tenants = registry.len(), "tenant registry seeded");
        }

        let recognizer = Arc::new(PlateRecognizerClient::new(config.recognizer));
        let notifier = Arc::new(HttpWebhookNotifier::new(config.webhook_timeout));

        Ok(Self {
            tenants: Arc::new(InMemoryTenantsService::new(Arc::clone(&registry))),
            detection: Arc::new(DetectionPipeline::new(registry, recognizer, notifier)),
        })
    }
}
