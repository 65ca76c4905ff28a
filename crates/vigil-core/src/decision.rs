//! The audit decision pipeline: timing policy first, whitelist second.
//!
//! The command-execution pipeline builds an [`AuditEntry`] at each
//! lifecycle point (attempt / success / failure) and asks the decider
//! whether to emit it. The gates run in a fixed order:
//!
//!   LogTimingStrategy → AuditFilter
//!
//! A phase the strategy does not log is suppressed without touching the
//! filter; a whitelisted entry is suppressed after one store lookup. For
//! role-alteration statements the pipeline additionally consults the
//! ALTER-permission guard (`vigil-auth`), which can block the statement
//! outright — that check is independent of whitelisting and is not part
//! of `decide`, because it needs the statement's role options rather than
//! a generic audit entry.

use tracing::debug;

use vigil_contracts::{entry::AuditEntry, error::VigilResult};

use crate::timing::LogTimingStrategy;
use crate::traits::AuditFilter;

/// The outcome of an audit decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The entry must be written to the audit log.
    Emit,
    /// The entry is exempt: wrong phase for the strategy, or whitelisted.
    Suppress,
}

/// Composes the timing strategy and the whitelist filter into the single
/// emit/suppress decision the command pipeline consumes.
pub struct AuditDecider {
    strategy: LogTimingStrategy,
    filter: Box<dyn AuditFilter>,
}

impl AuditDecider {
    pub fn new(strategy: LogTimingStrategy, filter: Box<dyn AuditFilter>) -> Self {
        Self { strategy, filter }
    }

    /// Initialize the filter. Called once at startup; configuration
    /// failures propagate so the server never runs half-configured.
    pub fn setup(&self) -> VigilResult<()> {
        self.filter.setup()
    }

    /// The strategy this decider was configured with.
    pub fn strategy(&self) -> LogTimingStrategy {
        self.strategy
    }

    /// Decide whether `entry` should be emitted.
    ///
    /// Hot path: at most one whitelist-store lookup, no other I/O.
    pub fn decide(&self, entry: &AuditEntry) -> VigilResult<Decision> {
        if !self.strategy.should_log(entry.status) {
            debug!(
                role = %entry.role,
                resource = %entry.resource,
                status = ?entry.status,
                "phase not logged by strategy"
            );
            return Ok(Decision::Suppress);
        }

        if self.filter.is_whitelisted(entry)? {
            debug!(
                role = %entry.role,
                resource = %entry.resource,
                operation = %entry.operation,
                "entry whitelisted"
            );
            return Ok(Decision::Suppress);
        }

        Ok(Decision::Emit)
    }
}
