//! List Tenants Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use lychgate_app::tenants::models::TenantSummary;

use crate::{extensions::*, state::State};

/// Tenant listing entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TenantSummaryResponse {
    /// Tenant identifier
    pub tenant_id: String,

    /// Number of authorized plates on the allow-list
    pub plate_count: usize,

    /// Tenant creation timestamp
    pub created_at: String,
}

impl From<TenantSummary> for TenantSummaryResponse {
    fn from(summary: TenantSummary) -> Self {
        Self {
            tenant_id: summary.id,
            plate_count: summary.plate_count,
            created_at: summary.created_at.to_string(),
        }
    }
}

/// Tenant List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TenantListResponse {
    /// Number of provisioned tenants
    pub total_tenants: usize,

    /// Tenant summaries without sensitive data
    pub tenants: Vec<TenantSummaryResponse>,
}

/// List Tenants Handler
#[endpoint(
    tags("tenants"),
    summary = "List Tenants",
    responses(
        (status_code = StatusCode::OK, description = "Tenant listing"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TenantListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tenants: Vec<TenantSummaryResponse> = state
        .app
        .tenants
        .list_tenants()
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(TenantListResponse {
        total_tenants: tenants.len(),
        tenants,
    }))
}
