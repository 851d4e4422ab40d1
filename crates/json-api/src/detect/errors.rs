//! Detect Errors

use salvo::http::StatusError;
use tracing::error;

use lychgate_app::{detection::DetectionError, recognition::RecognitionError};

pub(crate) fn into_status_error(error: DetectionError) -> StatusError {
    match error {
        DetectionError::UnknownTenant => StatusError::not_found().brief("Unknown tenant_id"),
        DetectionError::Recognition(RecognitionError::Timeout) => {
            StatusError::gateway_timeout().brief("Plate recognition timed out")
        }
        DetectionError::Recognition(RecognitionError::Service { status, body }) => {
            error!("plate recognition failed with status {status}: {body}");

            StatusError::internal_server_error()
                .brief(format!("Plate recognition failed with status {status}"))
        }
        DetectionError::Recognition(RecognitionError::Http(source)) => {
            error!("plate recognition request failed: {source}");

            StatusError::internal_server_error().brief("Plate recognition failed")
        }
    }
}
