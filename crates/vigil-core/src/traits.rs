//! Core trait definitions for the audit decision pipeline.
//!
//! These three traits define the engine's collaborator seams:
//!
//! - `WhitelistStore` — persistence of per-role audit exemptions
//! - `Authorizer`     — the database's native authorization provider
//! - `AuditFilter`    — the suppression decision consulted per entry
//!
//! The store and authorizer are external collaborators this engine only
//! consumes; the filter is the seam the decision pipeline composes over.

use std::collections::HashSet;

use vigil_contracts::{
    entry::{AuditEntry, Permission, WhitelistEntry},
    error::VigilResult,
    resource::Resource,
};

/// Persistence for per-role whitelist entries.
///
/// Implementations must provide thread-safe point lookups — `get_entries`
/// is on the hot path and is called for every audited operation. At most
/// one entry exists per (role, resource) pair; `put_entry` replaces the
/// operation set of an existing pair.
pub trait WhitelistStore: Send + Sync {
    /// All whitelist entries recorded for `role`.
    fn get_entries(&self, role: &str) -> VigilResult<Vec<WhitelistEntry>>;

    /// Record (or replace) the entry for (`role`, `resource`).
    ///
    /// `resource` is textual and is validated/canonicalized by the
    /// implementation; malformed input fails with `InvalidResource` so a
    /// bad administrative statement is rejected rather than stored.
    fn put_entry(
        &self,
        role: &str,
        resource: &str,
        operations: HashSet<Permission>,
    ) -> VigilResult<()>;

    /// Remove the entry for (`role`, `resource`), if present.
    fn delete_entry(&self, role: &str, resource: &str) -> VigilResult<()>;
}

/// The database's native authorization provider.
///
/// May itself be an audit wrapper around an inner provider. The raw entry
/// point is part of this contract precisely so callers never need to
/// type-test the provider: permission checks made *by* the audit engine go
/// through `raw_authorize` and therefore never produce audit records of
/// their own.
pub trait Authorizer: Send + Sync {
    /// The permissions `performer` holds on `resource`.
    fn authorize(&self, performer: &str, resource: &Resource) -> HashSet<Permission>;

    /// Like `authorize`, but guaranteed free of audit side effects.
    ///
    /// Plain providers have nothing to bypass; the default delegates.
    /// Audit-wrapping providers must override this to query their inner
    /// provider directly.
    fn raw_authorize(&self, performer: &str, resource: &Resource) -> HashSet<Permission> {
        self.authorize(performer, resource)
    }
}

/// The per-entry suppression decision.
///
/// Implementations decide whether an audit entry is exempt from logging.
/// They must be safe to call concurrently from many command-handling
/// threads and perform no I/O beyond at most one store lookup.
pub trait AuditFilter: Send + Sync {
    /// One-time initialization, called at startup before any decision.
    ///
    /// Configuration failures propagate untouched so startup fails loudly
    /// rather than running with a partially loaded whitelist.
    fn setup(&self) -> VigilResult<()> {
        Ok(())
    }

    /// True when `entry` is exempt from audit logging.
    fn is_whitelisted(&self, entry: &AuditEntry) -> VigilResult<bool>;
}
