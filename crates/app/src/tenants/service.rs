//! Tenants service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::tenants::{
    errors::TenantsServiceError,
    models::{NewTenant, Tenant, TenantSummary},
    registry::TenantRegistry,
};

/// Registry-backed tenants service.
#[derive(Debug, Clone)]
pub struct InMemoryTenantsService {
    registry: Arc<TenantRegistry>,
}

impl InMemoryTenantsService {
    #[must_use]
    pub fn new(registry: Arc<TenantRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl TenantsService for InMemoryTenantsService {
    async fn create_tenant(&self, tenant: NewTenant) -> Result<Tenant, TenantsServiceError> {
        if tenant.id.trim().is_empty() || tenant.webhook_url.trim().is_empty() {
            return Err(TenantsServiceError::MissingRequiredData);
        }

        let record = Tenant {
            id: tenant.id,
            webhook_url: Some(tenant.webhook_url),
            authorized_plates: tenant.authorized_plates,
            cooldown_seconds: tenant.cooldown_seconds,
            cooldown_until: None,
            created_at: Timestamp::now(),
        };

        if !self.registry.insert(record.clone()) {
            return Err(TenantsServiceError::AlreadyExists);
        }

        info!(tenant = %record.id, plates = record.authorized_plates.len(), "tenant provisioned");

        Ok(record)
    }

    async fn get_tenant(&self, id: &str) -> Result<Tenant, TenantsServiceError> {
        self.registry.get(id).ok_or(TenantsServiceError::NotFound)
    }

    async fn list_tenants(&self) -> Vec<TenantSummary> {
        self.registry
            .list()
            .into_iter()
            .map(|tenant| TenantSummary {
                id: tenant.id,
                plate_count: tenant.authorized_plates.len(),
                created_at: tenant.created_at,
            })
            .collect()
    }
}

#[automock]
#[async_trait]
/// Tenant provisioning and lookup operations.
pub trait TenantsService: Send + Sync {
    /// Provisions a new tenant.
    async fn create_tenant(&self, tenant: NewTenant) -> Result<Tenant, TenantsServiceError>;

    /// Looks up a tenant record by id.
    async fn get_tenant(&self, id: &str) -> Result<Tenant, TenantsServiceError>;

    /// Lists tenants without sensitive data.
    async fn list_tenants(&self) -> Vec<TenantSummary>;
}
