//! # vigil-core
//!
//! Trait seams and the decision pipeline for the vigil audit engine.
//!
//! This crate provides:
//! - The three collaborator traits (`WhitelistStore`, `Authorizer`,
//!   `AuditFilter`)
//! - The two fixed [`LogTimingStrategy`] configurations
//! - The [`AuditDecider`] that composes timing and whitelisting into one
//!   emit/suppress decision
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vigil_core::{AuditDecider, Decision, LogTimingStrategy};
//!
//! let decider = AuditDecider::new(LogTimingStrategy::PostLogging, filter);
//! decider.setup()?;
//! match decider.decide(&entry)? {
//!     Decision::Emit => log_entry(&entry),
//!     Decision::Suppress => {}
//! }
//! ```

pub mod decision;
pub mod timing;
pub mod traits;

pub use decision::{AuditDecider, Decision};
pub use timing::LogTimingStrategy;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use vigil_contracts::{
        entry::{AuditEntry, Permission, Status},
        error::VigilResult,
        resource::Resource,
    };

    use crate::traits::AuditFilter;
    use crate::{AuditDecider, Decision, LogTimingStrategy};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A filter with a fixed answer, for exercising the decider in isolation.
    struct FixedFilter {
        whitelisted: bool,
    }

    impl AuditFilter for FixedFilter {
        fn is_whitelisted(&self, _entry: &AuditEntry) -> VigilResult<bool> {
            Ok(self.whitelisted)
        }
    }

    fn entry_with_status(status: Status) -> AuditEntry {
        AuditEntry::builder("alice", Resource::table("ks", "tbl"), Permission::Select)
            .status(status)
            .build()
    }

    fn decider(strategy: LogTimingStrategy, whitelisted: bool) -> AuditDecider {
        AuditDecider::new(strategy, Box::new(FixedFilter { whitelisted }))
    }

    // ── LogTimingStrategy decision table ──────────────────────────────────────

    /// Pre-execution logging: attempts and failures, never successes.
    #[test]
    fn pre_logging_log_status() {
        let strategy = LogTimingStrategy::PreLogging;
        assert!(strategy.should_log(Status::Attempt));
        assert!(!strategy.should_log(Status::Succeeded));
        assert!(strategy.should_log(Status::Failed));
    }

    /// Post-execution logging: successes and failures, never attempts.
    #[test]
    fn post_logging_log_status() {
        let strategy = LogTimingStrategy::PostLogging;
        assert!(!strategy.should_log(Status::Attempt));
        assert!(strategy.should_log(Status::Succeeded));
        assert!(strategy.should_log(Status::Failed));
    }

    #[test]
    fn failed_batch_summary_only_for_pre_logging() {
        assert!(LogTimingStrategy::PreLogging.should_log_failed_batch_summary());
        assert!(!LogTimingStrategy::PostLogging.should_log_failed_batch_summary());
    }

    // ── AuditDecider ──────────────────────────────────────────────────────────

    /// A phase the strategy does not log is suppressed before the filter
    /// is consulted.
    #[test]
    fn decide_suppresses_unlogged_phase() {
        struct PanicFilter;
        impl AuditFilter for PanicFilter {
            fn is_whitelisted(&self, _entry: &AuditEntry) -> VigilResult<bool> {
                panic!("filter must not be consulted for an unlogged phase");
            }
        }

        let decider =
            AuditDecider::new(LogTimingStrategy::PostLogging, Box::new(PanicFilter));
        let decision = decider.decide(&entry_with_status(Status::Attempt)).unwrap();
        assert_eq!(decision, Decision::Suppress);
    }

    #[test]
    fn decide_suppresses_whitelisted_entry() {
        let decider = decider(LogTimingStrategy::PostLogging, true);
        let decision = decider.decide(&entry_with_status(Status::Succeeded)).unwrap();
        assert_eq!(decision, Decision::Suppress);
    }

    #[test]
    fn decide_emits_logged_unwhitelisted_entry() {
        let decider = decider(LogTimingStrategy::PostLogging, false);
        assert_eq!(
            decider.decide(&entry_with_status(Status::Succeeded)).unwrap(),
            Decision::Emit
        );
        assert_eq!(
            decider.decide(&entry_with_status(Status::Failed)).unwrap(),
            Decision::Emit
        );
    }

    #[test]
    fn decide_emits_attempts_under_pre_logging() {
        let decider = decider(LogTimingStrategy::PreLogging, false);
        assert_eq!(
            decider.decide(&entry_with_status(Status::Attempt)).unwrap(),
            Decision::Emit
        );
        assert_eq!(
            decider.decide(&entry_with_status(Status::Succeeded)).unwrap(),
            Decision::Suppress
        );
    }

    // ── Authorizer default raw path ───────────────────────────────────────────

    /// A plain provider's `raw_authorize` delegates to `authorize`.
    #[test]
    fn raw_authorize_defaults_to_authorize() {
        use std::collections::HashSet;

        use crate::traits::Authorizer;

        struct PlainAuthorizer;
        impl Authorizer for PlainAuthorizer {
            fn authorize(
                &self,
                _performer: &str,
                _resource: &Resource,
            ) -> HashSet<Permission> {
                [Permission::Select].into_iter().collect()
            }
        }

        let perms = PlainAuthorizer.raw_authorize("alice", &Resource::data_root());
        assert!(perms.contains(&Permission::Select));
    }
}
