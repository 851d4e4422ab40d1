//! Tenant Errors

use salvo::http::StatusError;

use lychgate_app::tenants::TenantsServiceError;

pub(crate) fn into_status_error(error: TenantsServiceError) -> StatusError {
    match error {
        TenantsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Tenant already exists")
        }
        TenantsServiceError::MissingRequiredData => {
            StatusError::bad_request().brief("tenant_id and webhook_url required")
        }
        TenantsServiceError::NotFound => StatusError::not_found().brief("Tenant not found"),
    }
}
