//! Detection Models

/// One plate reading reported for a submitted image.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedPlate {
    /// Raw plate text as reported by the recognition service.
    pub plate: String,

    /// Recognition confidence, passed through verbatim.
    pub confidence: f64,
}

/// Result of running the detection pipeline once.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionOutcome {
    /// Every reading from the recognition service, authorized or not.
    pub detected_plates: Vec<DetectedPlate>,

    /// Whether this request fired the gate.
    pub gate_triggered: bool,

    /// Allow-list entry that fired the gate, when it did.
    pub matched_plate: Option<String>,
}
