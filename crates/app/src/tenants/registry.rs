//! In-memory tenant registry and per-tenant trigger gating.

use jiff::{SignedDuration, Timestamp};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::tenants::models::Tenant;

/// Outcome of an attempt to reserve a gate trigger for a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    /// The attempt may proceed. The tenant stays reserved until
    /// [`TenantRegistry::commit_trigger`] or [`TenantRegistry::abort_trigger`]
    /// is called.
    Begun,

    /// The tenant's cooldown interval has not elapsed.
    CoolingDown,

    /// Another request already holds this tenant's trigger slot.
    Busy,

    /// No tenant with this id exists.
    UnknownTenant,
}

#[derive(Debug, Default)]
struct Inner {
    tenants: FxHashMap<String, Tenant>,
    in_flight: FxHashSet<String>,
}

/// Process-wide store of tenant records.
///
/// All pipeline invocations share one registry handle. The lock is only ever
/// held for map access and cooldown updates; webhook delivery happens between
/// `begin_trigger` and `commit_trigger`/`abort_trigger` with no lock held, so
/// a slow hub cannot stall other tenants.
#[derive(Debug, Default)]
pub struct TenantRegistry {
    inner: RwLock<Inner>,
}

impl TenantRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a tenant record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Tenant> {
        self.inner.read().tenants.get(id).cloned()
    }

    /// Insert a new tenant. Returns `false` when the id is already taken.
    pub fn insert(&self, tenant: Tenant) -> bool {
        let mut inner = self.inner.write();

        if inner.tenants.contains_key(&tenant.id) {
            return false;
        }

        inner.tenants.insert(tenant.id.clone(), tenant);

        true
    }

    /// Snapshot all tenant records, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<Tenant> {
        let mut tenants: Vec<_> = self.inner.read().tenants.values().cloned().collect();

        tenants.sort_by(|a, b| a.id.cmp(&b.id));
        tenants
    }

    /// Number of provisioned tenants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().tenants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Atomically reserve the tenant's single trigger slot.
    ///
    /// Eligible iff `now` is strictly after the tenant's `cooldown_until`
    /// and no other request currently holds the slot. Reserving leaves the
    /// cooldown untouched; only [`Self::commit_trigger`] moves it.
    pub fn begin_trigger(&self, id: &str, now: Timestamp) -> TriggerDecision {
        let mut inner = self.inner.write();

        let cooldown_until = match inner.tenants.get(id) {
            Some(tenant) => tenant.cooldown_until,
            None => return TriggerDecision::UnknownTenant,
        };

        if let Some(until) = cooldown_until {
            if now <= until {
                return TriggerDecision::CoolingDown;
            }
        }

        if !inner.in_flight.insert(id.to_owned()) {
            return TriggerDecision::Busy;
        }

        TriggerDecision::Begun
    }

    /// Record a successful trigger: push `cooldown_until` forward by the
    /// tenant's cooldown interval and release the slot.
    pub fn commit_trigger(&self, id: &str, now: Timestamp) {
        let mut inner = self.inner.write();

        if let Some(tenant) = inner.tenants.get_mut(id) {
            let cooldown = SignedDuration::from_secs(i64::from(tenant.cooldown_seconds));

            tenant.cooldown_until = Some(now.checked_add(cooldown).unwrap_or(Timestamp::MAX));
        }

        inner.in_flight.remove(id);
    }

    /// Release the slot after a failed or skipped attempt. The cooldown is
    /// left untouched so a later request may retry naturally.
    pub fn abort_trigger(&self, id: &str) {
        self.inner.write().in_flight.remove(id);
    }
}
