//! # vigil-auth
//!
//! Trusted implementations for the vigil audit engine:
//!
//! - [`RoleWhitelistFilter`] — per-role, hierarchy-aware audit exemptions
//! - [`PermissionChecker`] — the ALTER guard for restricted role alterations
//! - [`InMemoryWhitelistStore`] — the reference whitelist store, plus the
//!   backing-table compatibility constants
//! - [`TomlExemptUserFilter`] — a flat exempt-user list loaded from TOML
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vigil_auth::{InMemoryWhitelistStore, RoleWhitelistFilter};
//! use vigil_core::{AuditDecider, LogTimingStrategy};
//!
//! let store = Arc::new(InMemoryWhitelistStore::new());
//! let filter = RoleWhitelistFilter::new(store.clone());
//! let decider = AuditDecider::new(LogTimingStrategy::PostLogging, Box::new(filter));
//! ```

pub mod filter;
pub mod guard;
pub mod matcher;
pub mod store;

pub use filter::TomlExemptUserFilter;
pub use guard::{install_global_authorizer, PermissionChecker};
pub use matcher::RoleWhitelistFilter;
pub use store::{
    authoritative_table, InMemoryWhitelistStore, WHITELIST_TABLE_V1, WHITELIST_TABLE_V2,
};

// ── Tests ─────────────────────────────────────────────────────────────────────
