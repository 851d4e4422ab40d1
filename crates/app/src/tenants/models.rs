//! Tenant Models

use jiff::Timestamp;

/// Tenant Model
///
/// One customer site whose gate this service can trigger.
#[derive(Debug, Clone)]
pub struct Tenant {
    /// Unique tenant identifier.
    pub id: String,

    /// Endpoint of the tenant's local hub. Absent means gate triggers
    /// always fail for this tenant.
    pub webhook_url: Option<String>,

    /// Ordered allow-list of raw plate strings. Scan order is list order;
    /// the detection path never mutates it.
    pub authorized_plates: Vec<String>,

    /// Minimum interval between two successful gate triggers, in seconds.
    pub cooldown_seconds: u32,

    /// Instant before which triggering is suppressed. Only a successful
    /// trigger moves this, and only forward.
    pub cooldown_until: Option<Timestamp>,

    /// Tenant creation timestamp.
    pub created_at: Timestamp,
}

/// New Tenant Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewTenant {
    /// Identifier to register the tenant under.
    pub id: String,

    /// Hub endpoint to notify on gate triggers.
    pub webhook_url: String,

    /// Initial allow-list of raw plate strings.
    pub authorized_plates: Vec<String>,

    /// Minimum interval between two successful gate triggers, in seconds.
    pub cooldown_seconds: u32,
}

/// Tenant listing entry without sensitive data.
#[derive(Debug, Clone, PartialEq)]
pub struct TenantSummary {
    /// Tenant identifier.
    pub id: String,

    /// Number of authorized plates on the allow-list.
    pub plate_count: usize,

    /// Tenant creation timestamp.
    pub created_at: Timestamp,
}
