//! Tenant Seed Config

use clap::Args;

/// Startup tenant seed settings.
#[derive(Debug, Args)]
pub struct TenantSeedConfig {
    /// JSON map of tenants to provision at startup
    #[arg(long, env = "TENANTS_CONFIG", hide_env_values = true)]
    pub tenants: Option<String>,
}
