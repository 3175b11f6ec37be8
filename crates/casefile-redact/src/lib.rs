//! # casefile-redact
//!
//! Pattern-based PII masking and structural record redaction.
//!
//! ## Overview
//!
//! Masking is driven by a versioned rule table ([`RuleSet`]) loaded from
//! TOML. The built-in table replaces email addresses, phone numbers,
//! badge/warrant/employee/staff numbers, and generic ID-like tokens with
//! fixed placeholders. [`redact_complaint`] applies the table across a whole
//! record, honouring the record's [`RedactionOverrides`](casefile_contracts::redaction::RedactionOverrides).
//!
//! Masking is heuristic. The generic ID rule in particular over-matches
//! reference codes and case numbers; that is accepted rather than tuned away.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use casefile_redact::mask_text;
//!
//! let safe = mask_text("Contact: jane.doe@example.org re: case ABC1234");
//! assert_eq!(safe, "Contact: [redacted-email] re: case [redacted-id]");
//! ```

pub mod engine;
pub mod mask;
pub mod rules;

pub use engine::{redact_complaint, PatternRedactor};
pub use mask::{mask_text, mask_text_with_stats, MaskStats};
pub use rules::{Rule, RuleSet, RuleSpec, RuleTable};

/// Placeholder for email addresses.
pub const REDACTED_EMAIL: &str = "[redacted-email]";
/// Placeholder for phone numbers.
pub const REDACTED_PHONE: &str = "[redacted-phone]";
/// Placeholder for badge, staff, and ID-like numbers.
pub const REDACTED_ID: &str = "[redacted-id]";

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use casefile_contracts::error::CasefileError;

    use crate::{mask_text, mask_text_with_stats, RuleSet};

    // ── Built-in patterns ─────────────────────────────────────────────────────

    #[test]
    fn test_concrete_scenario() {
        assert_eq!(
            mask_text("Contact: jane.doe@example.org re: case ABC1234"),
            "Contact: [redacted-email] re: case [redacted-id]"
        );
    }

    #[test]
    fn test_email_variants() {
        assert_eq!(mask_text("a.b+tag@mail.example.co.uk"), "[redacted-email]");
        assert_eq!(mask_text("write to x_y@host.io today"), "write to [redacted-email] today");
        assert_eq!(mask_text("not an email: foo@bar"), "not an email: foo@bar");
    }

    #[test]
    fn test_phone_variants() {
        assert_eq!(mask_text("call +44 20 7946 0958"), "call [redacted-phone]");
        assert_eq!(mask_text("call (020) 7946-0958 now"), "call [redacted-phone] now");
        assert_eq!(mask_text("ring 01234567"), "ring [redacted-phone]");
        // Seven digits is below the threshold.
        assert_eq!(mask_text("ring 1234567"), "ring 1234567");
    }

    /// The keyword and its number are replaced together.
    #[test]
    fn test_badge_numbers_masked_with_keyword() {
        assert_eq!(mask_text("Officer badge 4471 attended"), "Officer [redacted-id] attended");
        assert_eq!(mask_text("Staff No. 123"), "[redacted-id]");
        assert_eq!(mask_text("warrant #98765"), "[redacted-id]");
        assert_eq!(mask_text("employee id: 5566 left"), "[redacted-id] left");
        // Two digits is too short to be an identifier.
        assert_eq!(mask_text("staff 12"), "staff 12");
    }

    #[test]
    fn test_generic_id_shapes() {
        assert_eq!(mask_text("ref NHS123456"), "ref [redacted-id]");
        assert_eq!(mask_text("ref AB123"), "ref [redacted-id]");
        // Lowercase and over-long prefixes are left alone.
        assert_eq!(mask_text("ref ab123"), "ref ab123");
        assert_eq!(mask_text("ref ABCDEF123"), "ref ABCDEF123");
        // Seven trailing digits do not fit the 3-6 digit shape.
        assert_eq!(mask_text("ref AB1234567"), "ref AB1234567");
    }

    /// Known over-match: reference codes that happen to look like IDs.
    #[test]
    fn test_generic_id_over_matches_reference_codes() {
        assert_eq!(mask_text("see section GDPR2016"), "see section [redacted-id]");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "The council did not respond within the statutory period.";
        assert_eq!(mask_text(text), text);
        assert_eq!(mask_text(""), "");
    }

    // ── Idempotence ───────────────────────────────────────────────────────────

    #[test]
    fn test_placeholders_are_stable() {
        let text = "[redacted-email] [redacted-phone] [redacted-id] [redacted-id]";
        assert_eq!(mask_text(text), text);
    }

    #[test]
    fn test_mask_twice_is_mask_once() {
        let text = "Email j@x.org, phone +1 (555) 010-9999, badge 7781, ref XY9876.";
        let once = mask_text(text);
        assert_eq!(mask_text(&once), once);
    }

    // ── Stats ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_stats_count_per_rule() {
        let (masked, stats) =
            mask_text_with_stats("a@b.com and c@d.org; case AB1234; ring 07700 900123");

        assert_eq!(masked, "[redacted-email] and [redacted-email]; case [redacted-id]; ring [redacted-phone]");
        assert_eq!(stats.count("email"), 2);
        assert_eq!(stats.count("phone"), 1);
        assert_eq!(stats.count("generic-id"), 1);
        assert_eq!(stats.count("badge"), 0);
        assert_eq!(stats.total(), 4);
    }

    // ── Rule tables ───────────────────────────────────────────────────────────

    #[test]
    fn test_builtin_table_order_and_version() {
        let rules = RuleSet::builtin();
        let ids: Vec<&str> = rules.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["email", "phone", "badge", "generic-id"]);
        assert_eq!(rules.version(), 1);
    }

    #[test]
    fn test_custom_table_from_toml() {
        let toml = r#"
            version = 9

            [[rules]]
            id = "postcode"
            pattern = '\b[A-Z]{1,2}[0-9][0-9A-Z]? [0-9][A-Z]{2}\b'
            replacement = "[redacted-postcode]"
        "#;

        let rules = RuleSet::from_toml_str(toml).unwrap();

        assert_eq!(rules.version(), 9);
        assert_eq!(rules.mask("Lives at SW1A 1AA."), "Lives at [redacted-postcode].");
        // Only the custom rule runs.
        assert_eq!(rules.mask("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_invalid_pattern_is_rule_compile_error() {
        let toml = r#"
            version = 1

            [[rules]]
            id = "broken"
            pattern = '(unclosed'
            replacement = "x"
        "#;

        match RuleSet::from_toml_str(toml) {
            Err(CasefileError::RuleCompile { rule_id, .. }) => assert_eq!(rule_id, "broken"),
            other => panic!("expected RuleCompile, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_rule_ids_rejected() {
        let toml = r#"
            version = 1

            [[rules]]
            id = "dup"
            pattern = 'a'
            replacement = "x"

            [[rules]]
            id = "dup"
            pattern = 'b'
            replacement = "y"
        "#;

        assert!(matches!(RuleSet::from_toml_str(toml), Err(CasefileError::ConfigError { .. })));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        assert!(matches!(
            RuleSet::from_toml_str("version = "),
            Err(CasefileError::ConfigError { .. })
        ));
    }
}
