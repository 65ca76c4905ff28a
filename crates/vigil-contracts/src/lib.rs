//! # vigil-contracts
//!
//! Shared types and contracts for the vigil audit-decision engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types: the typed resource
//! hierarchy, the audit entry and its builder, role-alteration options,
//! permissions, and the unified error type.

pub mod entry;
pub mod error;
pub mod options;
pub mod resource;

#[cfg(test)]
mod tests {
    use super::*;
    use entry::{AuditEntry, Permission, Status};
    use error::VigilError;
    use options::RoleOptions;
    use resource::Resource;

    // ── Parsing round-trips ──────────────────────────────────────────────────

    /// Every valid resource text parses and prints back to its canonical form.
    #[test]
    fn parse_round_trips_all_root_kinds() {
        let names = [
            "data",
            "data/ks",
            "data/ks/tbl",
            "roles",
            "roles/alice",
            "connections",
            "functions",
            "functions/ks",
            "functions/ks/fn1",
            "grants",
            "grants/data/ks",
            "grants/roles/alice",
        ];

        for name in names {
            let resource = Resource::parse(name).unwrap();
            assert_eq!(resource.name(), name, "canonical form must round-trip");
        }
    }

    #[test]
    fn parse_unknown_root_fails() {
        let err = Resource::parse("keyspaces/ks").unwrap_err();
        match err {
            VigilError::InvalidResource { reason } => {
                assert!(reason.contains("invalid resource type"), "got: {reason}");
            }
            other => panic!("expected InvalidResource, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_bad_leaf_names() {
        // Leaf segments must match \w+ — anything else is rejected.
        assert!(Resource::parse("data/bad-name").is_err());
        assert!(Resource::parse("data/ks/bad.table").is_err());
        assert!(Resource::parse("roles/al ice").is_err());
        assert!(Resource::parse("functions/bad-ks").is_err());
        assert!(Resource::parse("data/").is_err());
        assert!(Resource::parse("roles/").is_err());
    }

    #[test]
    fn parse_rejects_too_many_segments() {
        assert!(Resource::parse("data/ks/tbl/extra").is_err());
        assert!(Resource::parse("functions/ks/fn1/extra").is_err());
    }

    /// The connection hierarchy is root-only.
    #[test]
    fn parse_rejects_connection_sub_resources() {
        let err = Resource::parse("connections/native").unwrap_err();
        match err {
            VigilError::InvalidResource { reason } => {
                assert!(reason.contains("no sub-resources"), "got: {reason}");
            }
            other => panic!("expected InvalidResource, got {other:?}"),
        }
    }

    // ── Grant wrapping ───────────────────────────────────────────────────────

    /// `grants/data/ks` wraps a data resource; the wrapper is structural.
    #[test]
    fn parse_grant_wraps_inner_resource() {
        let resource = Resource::parse("grants/data/ks").unwrap();
        match resource {
            Resource::Grant { ref inner } => {
                assert_eq!(**inner, Resource::keyspace("ks"));
            }
            other => panic!("expected Grant, got {other:?}"),
        }
    }

    #[test]
    fn parse_recursive_grant_fails() {
        let err = Resource::parse("grants/grants/data/ks").unwrap_err();
        match err {
            VigilError::InvalidResource { reason } => {
                assert!(
                    reason.contains("recursive grants not allowed"),
                    "got: {reason}"
                );
            }
            other => panic!("expected InvalidResource, got {other:?}"),
        }
    }

    /// Grant-of-grant is rejected at construction time, independent of how
    /// the inner resource was produced.
    #[test]
    fn grant_constructor_rejects_grant_inner() {
        let grant = Resource::parse("grants/data/ks").unwrap();
        assert!(Resource::grant(grant).is_err());
        assert!(Resource::grant(Resource::grant_root()).is_err());
    }

    // ── Ancestor chains ──────────────────────────────────────────────────────

    /// Self-first, root-last, inclusive of both ends.
    #[test]
    fn ancestors_of_table() {
        let chain = Resource::table("ks", "tbl").ancestors();
        assert_eq!(
            chain,
            vec![
                Resource::table("ks", "tbl"),
                Resource::keyspace("ks"),
                Resource::data_root(),
            ]
        );
    }

    #[test]
    fn ancestors_of_role() {
        let chain = Resource::role("alice").ancestors();
        assert_eq!(chain, vec![Resource::role("alice"), Resource::role_root()]);
    }

    #[test]
    fn ancestors_of_root_is_just_root() {
        assert_eq!(
            Resource::connection_root().ancestors(),
            vec![Resource::connection_root()]
        );
    }

    /// A grant wrapper chains through the wrapped hierarchy and ends at the
    /// grant root, not the inner root.
    #[test]
    fn ancestors_of_grant_wrapped_table() {
        let chain = Resource::parse("grants/data/ks/tbl").unwrap().ancestors();
        let names: Vec<String> = chain.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["grants/data/ks/tbl", "grants/data/ks", "grants/data", "grants"]
        );
    }

    #[test]
    fn ancestors_of_function() {
        let chain = Resource::function("ks", "fn1").ancestors();
        let names: Vec<String> = chain.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["functions/ks/fn1", "functions/ks", "functions"]);
    }

    // ── parse_set ────────────────────────────────────────────────────────────

    /// Whitespace is trimmed and duplicates collapse.
    #[test]
    fn parse_set_trims_and_deduplicates() {
        let set =
            Resource::parse_set(["data/ks", " data/ks ", "roles/alice"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Resource::keyspace("ks")));
        assert!(set.contains(&Resource::role("alice")));
    }

    #[test]
    fn parse_set_propagates_first_error() {
        assert!(Resource::parse_set(["data/ks", "bogus/x"]).is_err());
    }

    // ── Display forms ────────────────────────────────────────────────────────

    #[test]
    fn printable_name_has_whitelist_prefix() {
        assert_eq!(
            Resource::keyspace("ks").printable_name(),
            "AUDIT WHITELIST ON data/ks"
        );
    }

    // ── AuditEntry builder ───────────────────────────────────────────────────

    fn sample_entry() -> AuditEntry {
        AuditEntry::builder("alice", Resource::table("ks", "tbl"), Permission::Select)
            .status(Status::Failed)
            .failure_reason("syntax error")
            .build()
    }

    /// `based_on` copies every field not explicitly overridden.
    #[test]
    fn based_on_copies_all_fields() {
        let entry = sample_entry();
        let login = AuditEntry::based_on(&entry)
            .resource(Resource::connection_root())
            .build();

        assert_eq!(login.role, entry.role);
        assert_eq!(login.operation, entry.operation);
        assert_eq!(login.status, entry.status);
        assert_eq!(login.timestamp, entry.timestamp);
        assert_eq!(login.failure_reason, entry.failure_reason);
        assert_eq!(login.batch_id, entry.batch_id);
        assert_eq!(login.resource, Resource::connection_root());
    }

    #[test]
    fn builder_defaults_status_to_attempt() {
        let entry =
            AuditEntry::builder("bob", Resource::data_root(), Permission::Modify).build();
        assert_eq!(entry.status, Status::Attempt);
        assert!(entry.failure_reason.is_none());
        assert!(entry.batch_id.is_none());
    }

    // ── Permission ───────────────────────────────────────────────────────────

    #[test]
    fn permission_display_and_from_str_round_trip() {
        for permission in [
            Permission::Alter,
            Permission::Authorize,
            Permission::Create,
            Permission::Drop,
            Permission::Execute,
            Permission::Modify,
            Permission::Select,
        ] {
            let parsed: Permission = permission.to_string().parse().unwrap();
            assert_eq!(parsed, permission);
        }
    }

    #[test]
    fn permission_rejects_unknown_name() {
        assert!("FLY".parse::<Permission>().is_err());
    }

    // ── RoleOptions ──────────────────────────────────────────────────────────

    #[test]
    fn role_options_restricted_settings() {
        assert!(!RoleOptions::none().touches_restricted_settings());
        assert!(!RoleOptions::none().with_password("pw").touches_restricted_settings());
        assert!(RoleOptions::none().with_login(true).touches_restricted_settings());
        assert!(RoleOptions::none().with_superuser(false).touches_restricted_settings());
    }

    // ── Serde round-trips ────────────────────────────────────────────────────

    #[test]
    fn resource_serde_round_trips() {
        let original = Resource::parse("grants/data/ks/tbl").unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let decoded: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Status::Attempt).unwrap(), "\"ATTEMPT\"");
        assert_eq!(serde_json::to_string(&Permission::Select).unwrap(), "\"SELECT\"");
    }

    // ── Error display messages ───────────────────────────────────────────────

    #[test]
    fn error_unauthorized_display() {
        let err = VigilError::Unauthorized {
            performer: "alice".to_string(),
            role: "bob".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("alice"));
        assert!(msg.contains("not authorized to alter role bob"));
    }

    #[test]
    fn error_invalid_resource_display() {
        let err = VigilError::InvalidResource {
            reason: "\"b@d\" is not a valid keyspace name".to_string(),
        };
        assert!(err.to_string().contains("invalid resource"));
        assert!(err.to_string().contains("b@d"));
    }

    #[test]
    fn error_configuration_display() {
        let err = VigilError::Configuration {
            reason: "missing whitelist file".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
        assert!(err.to_string().contains("missing whitelist file"));
    }
}
