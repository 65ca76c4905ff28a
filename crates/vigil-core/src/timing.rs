//! Log timing strategies: which execution phases produce an audit record.
//!
//! Exactly two strategies exist. The embedding server selects one at
//! startup and it never changes for the lifetime of the process.
//!
//! | strategy | attempt | succeeded | failed | failed-batch-summary |
//! |----------|---------|-----------|--------|----------------------|
//! | pre      | yes     | no        | yes    | yes                  |
//! | post     | no      | yes       | yes    | no                   |

use serde::{Deserialize, Serialize};

use vigil_contracts::entry::Status;

/// When in the command lifecycle audit records are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogTimingStrategy {
    /// Log before execution: attempts and failures, plus a summary entry
    /// for failed batches (individual attempts were already logged, the
    /// summary ties the failure to them).
    PreLogging,
    /// Log after execution: successes and failures only.
    PostLogging,
}

impl LogTimingStrategy {
    /// Whether an entry at the given phase should be logged at all.
    pub fn should_log(&self, status: Status) -> bool {
        match (self, status) {
            (LogTimingStrategy::PreLogging, Status::Attempt) => true,
            (LogTimingStrategy::PreLogging, Status::Succeeded) => false,
            (LogTimingStrategy::PreLogging, Status::Failed) => true,
            (LogTimingStrategy::PostLogging, Status::Attempt) => false,
            (LogTimingStrategy::PostLogging, Status::Succeeded) => true,
            (LogTimingStrategy::PostLogging, Status::Failed) => true,
        }
    }

    /// Whether a summary entry should be emitted when a batch fails.
    pub fn should_log_failed_batch_summary(&self) -> bool {
        matches!(self, LogTimingStrategy::PreLogging)
    }
}
