//! Create Tenant Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use lychgate_app::tenants::models::NewTenant;

use crate::{extensions::*, state::State, tenants::errors::into_status_error};

/// Create Tenant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateTenantRequest {
    /// Identifier to register the tenant under
    pub tenant_id: String,

    /// Hub endpoint to notify on gate triggers
    pub webhook_url: String,

    /// Initial allow-list of raw plate strings
    #[serde(default)]
    pub authorized_plates: Vec<String>,

    /// Minimum interval between two successful gate triggers, in seconds
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u32,
}

fn default_cooldown_seconds() -> u32 {
    10
}

impl From<CreateTenantRequest> for NewTenant {
    fn from(request: CreateTenantRequest) -> Self {
        NewTenant {
            id: request.tenant_id,
            webhook_url: request.webhook_url,
            authorized_plates: request.authorized_plates,
            cooldown_seconds: request.cooldown_seconds,
        }
    }
}

/// Tenant Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TenantCreatedResponse {
    /// Request status
    pub status: String,

    /// Created tenant identifier
    pub tenant_id: String,
}

/// Create Tenant Handler
#[endpoint(
    tags("tenants"),
    summary = "Provision Tenant",
    responses(
        (status_code = StatusCode::CREATED, description = "Tenant created"),
        (status_code = StatusCode::CONFLICT, description = "Tenant already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateTenantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TenantCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tenant = state
        .app
        .tenants
        .create_tenant(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/tenants/{}", tenant.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(TenantCreatedResponse {
        status: "success".to_string(),
        tenant_id: tenant.id,
    }))
}
