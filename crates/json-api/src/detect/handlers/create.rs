//! Detect Plate Handler

use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use lychgate_app::detection::models::{DetectedPlate, DetectionOutcome};

use crate::{detect::errors::into_status_error, extensions::*, state::State};

/// Detect Plate Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DetectRequest {
    /// Tenant whose gate this image may open
    pub tenant_id: String,

    /// Base64-encoded JPEG capture
    pub image: String,
}

/// Detected plate entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DetectedPlateResponse {
    /// Raw plate text as reported by the recognition service
    pub plate: String,

    /// Recognition confidence
    pub confidence: f64,
}

impl From<DetectedPlate> for DetectedPlateResponse {
    fn from(detected: DetectedPlate) -> Self {
        Self {
            plate: detected.plate,
            confidence: detected.confidence,
        }
    }
}

/// Detect Plate Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DetectResponse {
    /// Request status
    pub status: String,

    /// Tenant the image was processed for
    pub tenant_id: String,

    /// Processing timestamp
    pub timestamp: String,

    /// Every plate reading, authorized or not
    pub detected_plates: Vec<DetectedPlateResponse>,

    /// Whether this request fired the gate
    pub gate_triggered: bool,

    /// Allow-list entry that fired the gate, when it did
    pub matched_plate: Option<String>,
}

impl DetectResponse {
    fn from_outcome(tenant_id: String, outcome: DetectionOutcome) -> Self {
        Self {
            status: "success".to_string(),
            tenant_id,
            timestamp: Timestamp::now().to_string(),
            detected_plates: outcome
                .detected_plates
                .into_iter()
                .map(Into::into)
                .collect(),
            gate_triggered: outcome.gate_triggered,
            matched_plate: outcome.matched_plate,
        }
    }
}

/// Detect Plate Handler
#[endpoint(
    tags("detect"),
    summary = "Detect plate and trigger gate",
    responses(
        (status_code = StatusCode::OK, description = "Detection processed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown tenant"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Recognition service timeout"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<DetectRequest>,
    depot: &mut Depot,
) -> Result<Json<DetectResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.tenant_id.is_empty() {
        return Err(StatusError::bad_request().brief("No tenant_id provided"));
    }

    if request.image.is_empty() {
        return Err(StatusError::bad_request().brief("No image provided"));
    }

    let image = BASE64
        .decode(request.image.as_bytes())
        .map_err(|_invalid| StatusError::bad_request().brief("Invalid base64 image"))?;

    let outcome = state
        .app
        .detection
        .detect(&request.tenant_id, image)
        .await
        .map_err(into_status_error)?;

    Ok(Json(DetectResponse::from_outcome(request.tenant_id, outcome)))
}
