//! Whitelist storage: backing-schema compatibility and the in-memory
//! reference implementation.
//!
//! The persistent table lives in the database's own auth keyspace. Two
//! generations of the table exist in deployments; during a rolling upgrade
//! both may be present and the newer schema is authoritative:
//!
//! ```text
//! CREATE TABLE role_audit_whitelists_v2 (
//!     role text,
//!     resource text,
//!     operations set<text>,
//!     PRIMARY KEY(role, resource))
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use vigil_contracts::{
    entry::{Permission, WhitelistEntry},
    error::{VigilError, VigilResult},
    resource::Resource,
};
use vigil_core::traits::WhitelistStore;

/// The legacy single-level whitelist table.
pub const WHITELIST_TABLE_V1: &str = "role_audit_whitelists";

/// The current whitelist table, keyed by (role, resource).
pub const WHITELIST_TABLE_V2: &str = "role_audit_whitelists_v2";

/// Which table a backing store should read, given which tables exist.
///
/// The v2 schema is authoritative whenever present; v1 is only consulted
/// when it is the sole survivor (mid-migration deployments).
pub fn authoritative_table(has_v1: bool, has_v2: bool) -> Option<&'static str> {
    match (has_v1, has_v2) {
        (_, true) => Some(WHITELIST_TABLE_V2),
        (true, false) => Some(WHITELIST_TABLE_V1),
        (false, false) => None,
    }
}

// ── In-memory reference implementation ────────────────────────────────────────

/// The mutable interior of an [`InMemoryWhitelistStore`]: role → resource
/// text → operation set.
type Entries = HashMap<String, HashMap<String, HashSet<Permission>>>;

/// An in-memory [`WhitelistStore`], the reference implementation used in
/// tests and by embedders that bootstrap their own persistence.
///
/// # Thread safety
///
/// All operations acquire an internal `Mutex`; lookups are point reads and
/// never block on anything else.
pub struct InMemoryWhitelistStore {
    entries: Mutex<Entries>,
}

impl InMemoryWhitelistStore {
    pub fn new() -> Self {
        Self { entries: Mutex::new(HashMap::new()) }
    }

    fn lock(&self) -> VigilResult<std::sync::MutexGuard<'_, Entries>> {
        self.entries.lock().map_err(|e| VigilError::StoreUnavailable {
            reason: format!("whitelist state lock poisoned: {e}"),
        })
    }
}

impl Default for InMemoryWhitelistStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WhitelistStore for InMemoryWhitelistStore {
    fn get_entries(&self, role: &str) -> VigilResult<Vec<WhitelistEntry>> {
        let entries = self.lock()?;
        Ok(entries
            .get(role)
            .map(|by_resource| {
                by_resource
                    .iter()
                    .map(|(resource, operations)| WhitelistEntry {
                        role: role.to_string(),
                        resource: resource.clone(),
                        operations: operations.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Record (or replace) the entry for (`role`, `resource`).
    ///
    /// The resource text is parsed and stored in canonical form, so a
    /// malformed administrative statement fails with `InvalidResource`
    /// instead of planting an unmatchable entry.
    fn put_entry(
        &self,
        role: &str,
        resource: &str,
        operations: HashSet<Permission>,
    ) -> VigilResult<()> {
        let canonical = Resource::parse(resource.trim())?.name();
        let mut entries = self.lock()?;
        entries
            .entry(role.to_string())
            .or_default()
            .insert(canonical, operations);
        Ok(())
    }

    fn delete_entry(&self, role: &str, resource: &str) -> VigilResult<()> {
        let canonical = Resource::parse(resource.trim())?.name();
        let mut entries = self.lock()?;
        if let Some(by_resource) = entries.get_mut(role) {
            by_resource.remove(&canonical);
            if by_resource.is_empty() {
                entries.remove(role);
            }
        }
        Ok(())
    }
}
