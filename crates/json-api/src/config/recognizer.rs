//! Recognizer Config

use std::time::Duration;

use clap::Args;

use lychgate_app::recognition::RecognizerConfig;

/// Plate recognition service settings.
#[derive(Debug, Args)]
pub struct RecognizerApiConfig {
    /// Recognition endpoint URL
    #[arg(
        long,
        env = "PLATE_API_URL",
        default_value = "https://api.platerecognizer.com/v1/plate-reader/"
    )]
    pub url: String,

    /// Recognition API token
    #[arg(long, env = "PLATE_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Recognition call timeout in seconds
    #[arg(long, env = "PLATE_API_TIMEOUT_SECONDS", default_value_t = 15_u64)]
    pub timeout_seconds: u64,
}

impl RecognizerApiConfig {
    /// Client configuration for the recognition service.
    #[must_use]
    pub fn to_client_config(&self) -> RecognizerConfig {
        RecognizerConfig {
            url: self.url.clone(),
            api_token: self.api_token.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}
