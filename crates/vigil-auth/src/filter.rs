//! TOML-driven exempt-user filter.
//!
//! A coarse companion to the role whitelist: a flat list of user names
//! whose operations are never audited, loaded once at startup from a TOML
//! document:
//!
//! ```toml
//! whitelist = ["svc_backup", "svc_metrics"]
//! ```
//!
//! The exemption deliberately does not extend to login events — a login
//! entry carries the connection root as its resource and is always audited
//! regardless of this list.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use vigil_contracts::{
    entry::AuditEntry,
    error::{VigilError, VigilResult},
};
use vigil_core::traits::AuditFilter;

#[derive(Debug, Deserialize)]
struct ExemptUserConfig {
    whitelist: Vec<String>,
}

/// An [`AuditFilter`] exempting a fixed set of users, except for logins.
#[derive(Debug)]
pub struct TomlExemptUserFilter {
    users: HashSet<String>,
}

impl TomlExemptUserFilter {
    /// Parse `s` as a TOML exempt-user document.
    ///
    /// Returns `Configuration` if the TOML is malformed — the error
    /// propagates so startup fails loudly rather than running with a
    /// partially loaded whitelist.
    pub fn from_toml_str(s: &str) -> VigilResult<Self> {
        let config: ExemptUserConfig =
            toml::from_str(s).map_err(|e| VigilError::Configuration {
                reason: format!("failed to parse exempt-user TOML: {e}"),
            })?;
        debug!(users = config.whitelist.len(), "exempt-user whitelist loaded");
        Ok(Self { users: config.whitelist.into_iter().collect() })
    }

    /// Read the file at `path` and parse it as exempt-user configuration.
    pub fn from_file(path: &Path) -> VigilResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| VigilError::Configuration {
                reason: format!(
                    "failed to read exempt-user file '{}': {e}",
                    path.display()
                ),
            })?;
        Self::from_toml_str(&contents)
    }
}

impl AuditFilter for TomlExemptUserFilter {
    fn is_whitelisted(&self, entry: &AuditEntry) -> VigilResult<bool> {
        // Login attempts are always audited, whoever the user is.
        if entry.resource.is_connection() {
            return Ok(false);
        }
        Ok(self.users.contains(&entry.role))
    }
}
