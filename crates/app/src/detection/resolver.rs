//! Allow-list authorization resolution.

use crate::{plates, tenants::models::Tenant};

/// A successful allow-list match.
#[derive(Debug, Clone, PartialEq)]
pub struct Authorization {
    /// The allow-list entry that matched, verbatim.
    pub plate: String,

    /// Match score in `0..=100`.
    pub score: f64,
}

/// Resolve a detected plate against the tenant's allow-list.
///
/// Entries are scanned in list order and the first match wins, even when a
/// later entry would score higher.
#[must_use]
pub fn resolve(tenant: &Tenant, detected: &str) -> Option<Authorization> {
    tenant.authorized_plates.iter().find_map(|authorized| {
        plates::fuzzy_match(detected, authorized).map(|score| Authorization {
            plate: authorized.clone(),
            score,
        })
    })
}
