//! Server configuration module

use clap::Parser;

use lychgate_app::context::AppConfig;

use crate::config::{
    logging::LoggingConfig, recognizer::RecognizerApiConfig, seed::TenantSeedConfig,
    server::ServerRuntimeConfig, webhook::WebhookDeliveryConfig,
};

pub(crate) mod logging;
pub(crate) mod recognizer;
pub(crate) mod seed;
pub(crate) mod server;
pub(crate) mod webhook;

/// Lychgate JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "lychgate-json", about = "Lychgate JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Plate recognition service settings.
    #[command(flatten)]
    pub recognizer: RecognizerApiConfig,

    /// Webhook delivery settings.
    #[command(flatten)]
    pub webhook: WebhookDeliveryConfig,

    /// Startup tenant seed settings.
    #[command(flatten)]
    pub seed: TenantSeedConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Transport-independent application settings.
    #[must_use]
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            recognizer: self.recognizer.to_client_config(),
            webhook_timeout: self.webhook.timeout(),
            tenant_seed: self.seed.tenants.clone(),
        }
    }
}
