//! Role-whitelist matching over the resource ancestor chain.

use std::sync::Arc;

use tracing::debug;

use vigil_contracts::{
    entry::{AuditEntry, Permission},
    error::VigilResult,
    resource::Resource,
};
use vigil_core::traits::{AuditFilter, WhitelistStore};

/// An [`AuditFilter`] that suppresses entries whose role holds a whitelist
/// entry for the resource — or any of its ancestors — covering the
/// requested operation.
///
/// Whitelisting is hierarchical: an entry for `data/ks` covers every table
/// in `ks`. Connection/login entries are matched like any other — the
/// ancestor chain of the connection root contains only `connections`, so
/// entries keyed at non-connection resources can never suppress a login
/// action. Callers re-resource login entries onto
/// [`Resource::connection_root`] before asking; no special case exists here.
pub struct RoleWhitelistFilter {
    store: Arc<dyn WhitelistStore>,
}

impl RoleWhitelistFilter {
    pub fn new(store: Arc<dyn WhitelistStore>) -> Self {
        Self { store }
    }

    /// True when `role` is whitelisted for `operation` on `resource` or any
    /// of its ancestors. One store lookup, no other I/O.
    pub fn is_operation_whitelisted(
        &self,
        role: &str,
        resource: &Resource,
        operation: Permission,
    ) -> VigilResult<bool> {
        let entries = self.store.get_entries(role)?;
        if entries.is_empty() {
            return Ok(false);
        }

        let chain = resource.ancestors();
        let whitelisted = entries.iter().any(|entry| {
            entry.operations.contains(&operation)
                && chain.iter().any(|ancestor| ancestor.name() == entry.resource)
        });

        if whitelisted {
            debug!(
                role = %role,
                resource = %resource,
                operation = %operation,
                "operation whitelisted via ancestor chain"
            );
        }

        Ok(whitelisted)
    }
}

impl AuditFilter for RoleWhitelistFilter {
    fn is_whitelisted(&self, entry: &AuditEntry) -> VigilResult<bool> {
        self.is_operation_whitelisted(&entry.role, &entry.resource, entry.operation)
    }
}
