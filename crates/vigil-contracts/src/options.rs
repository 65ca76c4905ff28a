//! Role-alteration options as seen by the permission guard.
//!
//! Only *presence* matters to the guard: setting a password on someone
//! else's role, or touching the `login`/`superuser` flags at all, is what
//! triggers the ALTER-permission requirement. The values themselves are
//! never inspected here.

use serde::{Deserialize, Serialize};

/// The options an ALTER ROLE statement requests to change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOptions {
    /// A new password, when the statement sets one.
    pub password: Option<String>,
    /// The LOGIN flag, when the statement touches it. Restricted.
    pub login: Option<bool>,
    /// The SUPERUSER flag, when the statement touches it. Restricted.
    pub superuser: Option<bool>,
}

impl RoleOptions {
    /// Options that change nothing the guard cares about.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_login(mut self, login: bool) -> Self {
        self.login = Some(login);
        self
    }

    pub fn with_superuser(mut self, superuser: bool) -> Self {
        self.superuser = Some(superuser);
        self
    }

    /// True when the statement touches a restricted setting — the LOGIN or
    /// SUPERUSER flag — regardless of whose role is targeted.
    pub fn touches_restricted_settings(&self) -> bool {
        self.login.is_some() || self.superuser.is_some()
    }
}
