//! Tenants

pub mod errors;
pub mod models;
pub mod registry;
pub mod service;

pub use errors::TenantsServiceError;
pub use registry::{TenantRegistry, TriggerDecision};
pub use service::*;
