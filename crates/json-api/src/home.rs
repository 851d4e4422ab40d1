//! Service info handler.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Service info response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceInfoResponse {
    /// Service name
    pub service: String,

    /// Service status
    pub status: String,

    /// Current server time
    pub timestamp: String,

    /// Number of provisioned tenants
    pub tenants: usize,
}

/// Service info handler
#[endpoint(tags("info"), summary = "Service info")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ServiceInfoResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tenants = state.app.tenants.list_tenants().await.len();

    Ok(Json(ServiceInfoResponse {
        service: "Lychgate Gate Access Relay".to_string(),
        status: "running".to_string(),
        timestamp: Timestamp::now().to_string(),
        tenants,
    }))
}
