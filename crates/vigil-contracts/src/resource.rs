//! The typed resource hierarchy for auditable database entities.
//!
//! Every auditable entity is addressed by a `Resource`: a data object
//! (keyspace/table), a role, a client connection, a function, or a
//! grant-wrapped reference to one of these. Resources form small finite
//! hierarchies — each non-root resource has exactly one parent, and the
//! ancestor chain always ends at the variant's root. The chain is what
//! gives whitelist entries their "applies to all children" semantics:
//! whitelisting `data/ks` covers every table in `ks`.
//!
//! The textual grammar round-trips through [`Resource::parse`] and
//! [`Resource::name`]:
//!
//! ```text
//! <root>[/<segment>[/<segment>]]    roots: data, roles, connections,
//!                                          functions, grants
//! ```
//!
//! Leaf segments must match `\w+` (ASCII alphanumeric or underscore).
//! `grants/<inner>` wraps any non-grants resource; wrapping a grant in
//! another grant is rejected both at parse time and structurally in
//! [`Resource::grant`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{VigilError, VigilResult};

const DATA_ROOT: &str = "data";
const ROLES_ROOT: &str = "roles";
const CONNECTIONS_ROOT: &str = "connections";
const FUNCTIONS_ROOT: &str = "functions";
const GRANTS_ROOT: &str = "grants";

const SEPARATOR: char = '/';

/// A typed, hierarchical identifier for an auditable database entity.
///
/// One variant per hierarchy level. The `Grant` variant recursively wraps a
/// non-grant resource, modelling "permission to grant X" as distinct from
/// "permission to use X" — a separate policy namespace with its own root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// The root of the data hierarchy (`data`).
    DataRoot,
    /// A keyspace (`data/<keyspace>`).
    Keyspace { keyspace: String },
    /// A table within a keyspace (`data/<keyspace>/<table>`).
    Table { keyspace: String, table: String },
    /// The root of the role hierarchy (`roles`).
    RoleRoot,
    /// A named role (`roles/<name>`).
    Role { name: String },
    /// A client connection / login event (`connections`). Root only —
    /// the connection hierarchy has no sub-resources.
    ConnectionRoot,
    /// The root of the function hierarchy (`functions`).
    FunctionRoot,
    /// All functions in a keyspace (`functions/<keyspace>`).
    FunctionKeyspace { keyspace: String },
    /// A named function (`functions/<keyspace>/<name>`).
    Function { keyspace: String, name: String },
    /// The root of the grant namespace (`grants`).
    GrantRoot,
    /// Permission-to-grant on the wrapped resource (`grants/<inner>`).
    /// The inner resource is never itself a grant.
    Grant { inner: Box<Resource> },
}

impl Resource {
    // ── Constructors ──────────────────────────────────────────────────────

    pub fn data_root() -> Self {
        Resource::DataRoot
    }

    pub fn keyspace(keyspace: impl Into<String>) -> Self {
        Resource::Keyspace { keyspace: keyspace.into() }
    }

    pub fn table(keyspace: impl Into<String>, table: impl Into<String>) -> Self {
        Resource::Table { keyspace: keyspace.into(), table: table.into() }
    }

    pub fn role_root() -> Self {
        Resource::RoleRoot
    }

    pub fn role(name: impl Into<String>) -> Self {
        Resource::Role { name: name.into() }
    }

    pub fn connection_root() -> Self {
        Resource::ConnectionRoot
    }

    pub fn function_root() -> Self {
        Resource::FunctionRoot
    }

    pub fn function_keyspace(keyspace: impl Into<String>) -> Self {
        Resource::FunctionKeyspace { keyspace: keyspace.into() }
    }

    pub fn function(keyspace: impl Into<String>, name: impl Into<String>) -> Self {
        Resource::Function { keyspace: keyspace.into(), name: name.into() }
    }

    pub fn grant_root() -> Self {
        Resource::GrantRoot
    }

    /// Wrap `inner` in the grant namespace.
    ///
    /// Rejects an inner grant at construction time, independent of how it
    /// was produced — grant-of-grant semantics are unrepresentable.
    pub fn grant(inner: Resource) -> VigilResult<Self> {
        if matches!(inner, Resource::GrantRoot | Resource::Grant { .. }) {
            return Err(VigilError::InvalidResource {
                reason: format!(
                    "invalid resource type: {}/{}, recursive grants not allowed",
                    GRANTS_ROOT, inner
                ),
            });
        }
        Ok(Resource::Grant { inner: Box::new(inner) })
    }

    // ── Parsing ───────────────────────────────────────────────────────────

    /// Parse a textual resource identifier.
    ///
    /// Splits on the first `/` into a root segment and remainder, then
    /// delegates to the per-hierarchy parser. Non-root leaf segments must
    /// match the `\w+` grammar; root segments never pass through that check.
    pub fn parse(text: &str) -> VigilResult<Self> {
        let (root, rest) = match text.split_once(SEPARATOR) {
            Some((root, rest)) => (root, Some(rest)),
            None => (text, None),
        };

        match root {
            DATA_ROOT => Self::parse_data(rest),
            ROLES_ROOT => Self::parse_role(rest),
            CONNECTIONS_ROOT => match rest {
                None => Ok(Resource::ConnectionRoot),
                Some(_) => Err(VigilError::InvalidResource {
                    reason: format!("connection resources have no sub-resources: {text}"),
                }),
            },
            FUNCTIONS_ROOT => Self::parse_function(rest),
            GRANTS_ROOT => match rest {
                None => Ok(Resource::GrantRoot),
                Some(inner) if inner.starts_with(GRANTS_ROOT) => {
                    Err(VigilError::InvalidResource {
                        reason: format!(
                            "invalid resource type: {text}, recursive grants not allowed"
                        ),
                    })
                }
                Some(inner) => Self::grant(Self::parse(inner)?),
            },
            _ => Err(VigilError::InvalidResource {
                reason: format!("invalid resource type: {text}"),
            }),
        }
    }

    /// Parse a collection of textual identifiers into a deduplicated set.
    ///
    /// Each name is trimmed of surrounding whitespace before parsing.
    pub fn parse_set<I, S>(names: I) -> VigilResult<HashSet<Resource>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| Self::parse(name.as_ref().trim()))
            .collect()
    }

    fn parse_data(rest: Option<&str>) -> VigilResult<Self> {
        let Some(rest) = rest else {
            return Ok(Resource::DataRoot);
        };

        let mut segments = rest.split(SEPARATOR);
        let keyspace = segments.next().unwrap_or_default();
        let table = segments.next();

        if segments.next().is_some() {
            return Err(VigilError::InvalidResource {
                reason: format!("invalid resource type: {DATA_ROOT}/{rest}"),
            });
        }
        if !is_valid_name(keyspace) {
            return Err(VigilError::InvalidResource {
                reason: format!("\"{keyspace}\" is not a valid keyspace name"),
            });
        }

        match table {
            None => Ok(Resource::keyspace(keyspace)),
            Some(table) if is_valid_name(table) => Ok(Resource::table(keyspace, table)),
            Some(table) => Err(VigilError::InvalidResource {
                reason: format!("\"{table}\" is not a valid table name"),
            }),
        }
    }

    fn parse_role(rest: Option<&str>) -> VigilResult<Self> {
        match rest {
            None => Ok(Resource::RoleRoot),
            Some(name) if is_valid_name(name) => Ok(Resource::role(name)),
            Some(name) => Err(VigilError::InvalidResource {
                reason: format!("\"{name}\" is not a valid role name"),
            }),
        }
    }

    fn parse_function(rest: Option<&str>) -> VigilResult<Self> {
        let Some(rest) = rest else {
            return Ok(Resource::FunctionRoot);
        };

        let mut segments = rest.split(SEPARATOR);
        let keyspace = segments.next().unwrap_or_default();
        let name = segments.next();

        if segments.next().is_some() {
            return Err(VigilError::InvalidResource {
                reason: format!("invalid resource type: {FUNCTIONS_ROOT}/{rest}"),
            });
        }
        if !is_valid_name(keyspace) {
            return Err(VigilError::InvalidResource {
                reason: format!("\"{keyspace}\" is not a valid keyspace name"),
            });
        }

        match name {
            None => Ok(Resource::function_keyspace(keyspace)),
            Some(name) if is_valid_name(name) => Ok(Resource::function(keyspace, name)),
            Some(name) => Err(VigilError::InvalidResource {
                reason: format!("\"{name}\" is not a valid function name"),
            }),
        }
    }

    // ── Hierarchy ─────────────────────────────────────────────────────────

    /// The immediate parent in this resource's own hierarchy, or `None`
    /// for a root. A grant wrapper's parent wraps the inner resource's
    /// parent, bottoming out at the grant root.
    pub fn parent(&self) -> Option<Resource> {
        match self {
            Resource::DataRoot
            | Resource::RoleRoot
            | Resource::ConnectionRoot
            | Resource::FunctionRoot
            | Resource::GrantRoot => None,
            Resource::Keyspace { .. } => Some(Resource::DataRoot),
            Resource::Table { keyspace, .. } => Some(Resource::keyspace(keyspace.clone())),
            Resource::Role { .. } => Some(Resource::RoleRoot),
            Resource::FunctionKeyspace { .. } => Some(Resource::FunctionRoot),
            Resource::Function { keyspace, .. } => {
                Some(Resource::function_keyspace(keyspace.clone()))
            }
            Resource::Grant { inner } => Some(match inner.parent() {
                Some(parent) => Resource::Grant { inner: Box::new(parent) },
                None => Resource::GrantRoot,
            }),
        }
    }

    /// The ancestor chain from this resource up to its hierarchy's root,
    /// inclusive of both ends. Order is self-first, root-last — matchers
    /// walk it to test "is any ancestor whitelisted".
    pub fn ancestors(&self) -> Vec<Resource> {
        let mut chain = vec![self.clone()];
        let mut current = self.parent();
        while let Some(resource) = current {
            current = resource.parent();
            chain.push(resource);
        }
        chain
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// The role name, for named role resources.
    pub fn role_name(&self) -> Option<&str> {
        match self {
            Resource::Role { name } => Some(name),
            _ => None,
        }
    }

    /// True for the connection root, the resource login events carry.
    pub fn is_connection(&self) -> bool {
        matches!(self, Resource::ConnectionRoot)
    }

    /// The canonical textual name. Round-trips through [`Resource::parse`].
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// The user-facing display form used in administrative statements and
    /// error messages.
    pub fn printable_name(&self) -> String {
        format!("AUDIT WHITELIST ON {self}")
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::DataRoot => write!(f, "{DATA_ROOT}"),
            Resource::Keyspace { keyspace } => write!(f, "{DATA_ROOT}/{keyspace}"),
            Resource::Table { keyspace, table } => {
                write!(f, "{DATA_ROOT}/{keyspace}/{table}")
            }
            Resource::RoleRoot => write!(f, "{ROLES_ROOT}"),
            Resource::Role { name } => write!(f, "{ROLES_ROOT}/{name}"),
            Resource::ConnectionRoot => write!(f, "{CONNECTIONS_ROOT}"),
            Resource::FunctionRoot => write!(f, "{FUNCTIONS_ROOT}"),
            Resource::FunctionKeyspace { keyspace } => {
                write!(f, "{FUNCTIONS_ROOT}/{keyspace}")
            }
            Resource::Function { keyspace, name } => {
                write!(f, "{FUNCTIONS_ROOT}/{keyspace}/{name}")
            }
            Resource::GrantRoot => write!(f, "{GRANTS_ROOT}"),
            Resource::Grant { inner } => write!(f, "{GRANTS_ROOT}/{inner}"),
        }
    }
}

/// Leaf segment grammar: `\w+` — non-empty, ASCII alphanumeric or underscore.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
