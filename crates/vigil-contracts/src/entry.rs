//! Audit entry types: operations, lifecycle status, principals, and the
//! immutable entry itself.
//!
//! An `AuditEntry` is built once per command invocation by the command
//! pipeline and never mutated afterwards. A derived entry — for example the
//! login re-resourcing of a generic entry onto the connection root — is
//! built with [`AuditEntry::based_on`], which copies every field not
//! explicitly overridden.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::VigilError;
use crate::resource::Resource;

/// A database permission / operation name.
///
/// The closed set of operations a whitelist entry can exempt and an
/// authorization provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
    Alter,
    Authorize,
    Create,
    Drop,
    Execute,
    Modify,
    Select,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::Alter => "ALTER",
            Permission::Authorize => "AUTHORIZE",
            Permission::Create => "CREATE",
            Permission::Drop => "DROP",
            Permission::Execute => "EXECUTE",
            Permission::Modify => "MODIFY",
            Permission::Select => "SELECT",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Permission {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALTER" => Ok(Permission::Alter),
            "AUTHORIZE" => Ok(Permission::Authorize),
            "CREATE" => Ok(Permission::Create),
            "DROP" => Ok(Permission::Drop),
            "EXECUTE" => Ok(Permission::Execute),
            "MODIFY" => Ok(Permission::Modify),
            "SELECT" => Ok(Permission::Select),
            other => Err(VigilError::InvalidResource {
                reason: format!("\"{other}\" is not a valid operation name"),
            }),
        }
    }
}

/// The lifecycle phase of command execution an audit decision is made at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The command is about to execute.
    Attempt,
    /// The command completed successfully.
    Succeeded,
    /// The command failed.
    Failed,
}

/// The authenticated principal performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The principal's role name.
    pub name: String,
    /// Superusers bypass the ALTER-permission guard entirely.
    pub superuser: bool,
}

impl AuthenticatedUser {
    pub fn new(name: impl Into<String>, superuser: bool) -> Self {
        Self { name: name.into(), superuser }
    }
}

/// One per-role audit exemption: suppress logging for the given resource
/// and operation set.
///
/// At most one entry exists per (role, resource) pair; the resource is
/// stored as canonical text so entries key directly against
/// [`Resource::name`] during matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub role: String,
    /// Canonical resource text, e.g. `data/ks`.
    pub resource: String,
    pub operations: HashSet<Permission>,
}

/// An auditable action at one lifecycle point of command execution.
///
/// Immutable once built. Construct with [`AuditEntry::builder`], or derive
/// from an existing entry with [`AuditEntry::based_on`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// The role performing the operation.
    pub role: String,
    /// The resource the operation addresses.
    pub resource: Resource,
    /// The requested operation.
    pub operation: Permission,
    /// The lifecycle phase this entry was produced at.
    pub status: Status,
    /// Wall-clock time (UTC) the entry was built.
    pub timestamp: DateTime<Utc>,
    /// Error detail, populated for `Status::Failed` entries.
    pub failure_reason: Option<String>,
    /// The batch this entry belongs to, when the command is part of one.
    pub batch_id: Option<Uuid>,
}

impl AuditEntry {
    /// Start building an entry from its required fields.
    ///
    /// Status defaults to `Attempt` and the timestamp to now.
    pub fn builder(
        role: impl Into<String>,
        resource: Resource,
        operation: Permission,
    ) -> AuditEntryBuilder {
        AuditEntryBuilder {
            role: role.into(),
            resource,
            operation,
            status: Status::Attempt,
            timestamp: None,
            failure_reason: None,
            batch_id: None,
        }
    }

    /// Start building an entry that copies every field of `entry`.
    ///
    /// Used to derive one action from another with a single override, e.g.
    /// re-resourcing a generic entry onto the connection root for the login
    /// sub-flow.
    pub fn based_on(entry: &AuditEntry) -> AuditEntryBuilder {
        AuditEntryBuilder {
            role: entry.role.clone(),
            resource: entry.resource.clone(),
            operation: entry.operation,
            status: entry.status,
            timestamp: Some(entry.timestamp),
            failure_reason: entry.failure_reason.clone(),
            batch_id: entry.batch_id,
        }
    }
}

/// Builder for [`AuditEntry`]. All setters override the corresponding field.
#[derive(Debug, Clone)]
pub struct AuditEntryBuilder {
    role: String,
    resource: Resource,
    operation: Permission,
    status: Status,
    timestamp: Option<DateTime<Utc>>,
    failure_reason: Option<String>,
    batch_id: Option<Uuid>,
}

impl AuditEntryBuilder {
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn resource(mut self, resource: Resource) -> Self {
        self.resource = resource;
        self
    }

    pub fn operation(mut self, operation: Permission) -> Self {
        self.operation = operation;
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reason = Some(reason.into());
        self
    }

    pub fn batch_id(mut self, batch_id: Uuid) -> Self {
        self.batch_id = Some(batch_id);
        self
    }

    pub fn build(self) -> AuditEntry {
        AuditEntry {
            role: self.role,
            resource: self.resource,
            operation: self.operation,
            status: self.status,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            failure_reason: self.failure_reason,
            batch_id: self.batch_id,
        }
    }
}
