//! The ALTER-permission guard for role alterations.
//!
//! Altering a role's own credentials or flags is the one place where a
//! whitelist shortcut could open a privilege escalation path, so the check
//! here runs independently of whitelisting. The decision:
//!
//! - superusers pass unconditionally;
//! - setting a password on *someone else's* role, or touching the
//!   LOGIN/SUPERUSER flags on *any* role (including one's own), requires
//!   the performer to hold ALTER on the target role resource or one of its
//!   ancestors;
//! - a self password change is exempt and never consults the provider.
//!
//! Permission lookups go through [`Authorizer::raw_authorize`] so that a
//! provider which is itself an audit wrapper does not emit audit records
//! for the guard's own queries.

use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use vigil_contracts::{
    entry::{AuthenticatedUser, Permission},
    error::{VigilError, VigilResult},
    options::RoleOptions,
    resource::Resource,
};
use vigil_core::traits::Authorizer;

// ── Global provider registry ──────────────────────────────────────────────────

static GLOBAL_AUTHORIZER: OnceLock<Arc<dyn Authorizer>> = OnceLock::new();

/// Install the process-wide authorization provider.
///
/// Called once by the embedding server at startup. A second installation
/// fails with `Configuration` — the provider is immutable for the process
/// lifetime.
pub fn install_global_authorizer(authorizer: Arc<dyn Authorizer>) -> VigilResult<()> {
    GLOBAL_AUTHORIZER
        .set(authorizer)
        .map_err(|_| VigilError::Configuration {
            reason: "authorization provider already installed".to_string(),
        })
}

fn global_authorizer() -> VigilResult<Arc<dyn Authorizer>> {
    GLOBAL_AUTHORIZER
        .get()
        .cloned()
        .ok_or_else(|| VigilError::Configuration {
            reason: "no authorization provider installed".to_string(),
        })
}

// ── Permission checker ────────────────────────────────────────────────────────

/// Decides whether a role-alteration statement requires — and whether the
/// performer holds — explicit ALTER permission on the target role.
///
/// The provider reference is resolved lazily from the global registry on
/// first use and cached in a once-cell: concurrent first calls converge on
/// one provider instance, and reads never block afterwards.
pub struct PermissionChecker {
    authorizer: OnceLock<Arc<dyn Authorizer>>,
}

impl PermissionChecker {
    /// A checker that binds to the globally installed provider on first use.
    pub fn new() -> Self {
        Self { authorizer: OnceLock::new() }
    }

    /// A checker bound to the given provider. Test-injectable escape hatch;
    /// the global registry is never consulted.
    pub fn with_authorizer(authorizer: Arc<dyn Authorizer>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(authorizer);
        Self { authorizer: cell }
    }

    fn authorizer(&self) -> VigilResult<&Arc<dyn Authorizer>> {
        if let Some(authorizer) = self.authorizer.get() {
            return Ok(authorizer);
        }
        let resolved = global_authorizer()?;
        Ok(self.authorizer.get_or_init(|| resolved))
    }

    /// Check whether `performer` may apply `options` to `role`.
    ///
    /// Returns `Unauthorized` when the alteration is restricted and ALTER
    /// is not held anywhere on the target role's ancestor chain. Errors are
    /// final; the caller must fail the statement, never default to allow.
    pub fn check_alter_role_access(
        &self,
        performer: &AuthenticatedUser,
        role: &Resource,
        options: &RoleOptions,
    ) -> VigilResult<()> {
        if performer.superuser {
            return Ok(());
        }

        if !is_permission_required(performer, role, options) {
            return Ok(());
        }

        if self.has_permission_to_alter(performer, role)? {
            debug!(
                performer = %performer.name,
                role = %role,
                "restricted role alteration permitted by ALTER permission"
            );
            return Ok(());
        }

        warn!(
            performer = %performer.name,
            role = %role,
            "restricted role alteration denied"
        );
        Err(VigilError::Unauthorized {
            performer: performer.name.clone(),
            role: role.role_name().unwrap_or_default().to_string(),
        })
    }

    /// True when ALTER is held on the role resource or any of its ancestors.
    fn has_permission_to_alter(
        &self,
        performer: &AuthenticatedUser,
        role: &Resource,
    ) -> VigilResult<bool> {
        let authorizer = self.authorizer()?;
        Ok(role.ancestors().iter().any(|resource| {
            authorizer
                .raw_authorize(&performer.name, resource)
                .contains(&Permission::Alter)
        }))
    }
}

impl Default for PermissionChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_permission_required(
    performer: &AuthenticatedUser,
    role: &Resource,
    options: &RoleOptions,
) -> bool {
    is_changing_password_of_other_role(performer, role, options)
        || options.touches_restricted_settings()
}

fn is_changing_password_of_other_role(
    performer: &AuthenticatedUser,
    role: &Resource,
    options: &RoleOptions,
) -> bool {
    options.password.is_some() && role.role_name() != Some(performer.name.as_str())
}
