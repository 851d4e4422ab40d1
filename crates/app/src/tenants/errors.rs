//! Tenants service errors.

use thiserror::Error;

/// Tenant service error variants.
#[derive(Debug, Error)]
pub enum TenantsServiceError {
    /// Tenant already exists.
    #[error("tenant already exists")]
    AlreadyExists,

    /// Tenant was not found.
    #[error("tenant not found")]
    NotFound,

    /// Required data was missing.
    #[error("missing required data")]
    MissingRequiredData,
}
