//! Error types for the vigil audit-decision engine.
//!
//! All fallible operations in the engine return `VigilResult<T>`. None of
//! the variants represent transient conditions: resource parsing failures
//! are caller-correctable input errors, authorization failures are final,
//! and configuration failures must abort startup rather than leave the
//! engine running with a partially loaded whitelist. An authorization or
//! identity decision is never silently defaulted to "allow" on error.

use thiserror::Error;

/// The unified error type for the vigil engine.
#[derive(Debug, Error)]
pub enum VigilError {
    /// A textual resource identifier could not be parsed: unknown root,
    /// a leaf segment outside the `\w+` grammar, a sub-resource under
    /// `connections`, or a recursive grant wrapping.
    ///
    /// Surfaced as a rejected administrative statement, never retried.
    #[error("invalid resource: {reason}")]
    InvalidResource { reason: String },

    /// The performer lacks the ALTER permission required for a restricted
    /// role alteration.
    #[error("user {performer} is not authorized to alter role {role}")]
    Unauthorized { performer: String, role: String },

    /// A configuration collaborator failed during setup.
    ///
    /// Propagated untouched so startup fails loudly.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// The whitelist store could not serve a lookup.
    #[error("whitelist store unavailable: {reason}")]
    StoreUnavailable { reason: String },
}

/// Convenience alias used throughout the vigil crates.
pub type VigilResult<T> = Result<T, VigilError>;
