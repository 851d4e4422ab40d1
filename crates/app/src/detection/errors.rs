//! Detection pipeline errors.

use thiserror::Error;

use crate::recognition::RecognitionError;

/// Errors surfaced by a detection request.
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The request referenced a tenant absent from the registry.
    #[error("unknown tenant")]
    UnknownTenant,

    /// The recognition collaborator failed; the pipeline never ran.
    #[error("plate recognition failed")]
    Recognition(#[from] RecognitionError),
}
