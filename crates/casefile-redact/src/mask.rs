//! Free-text masking.
//!
//! Rules run in table order and each one sees the output of the previous
//! one. Placeholders are lowercase with hyphens, so no built-in rule matches
//! its own output and masking already-masked text is a no-op.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::rules::RuleSet;

/// Substitution counts from one masking pass, keyed by rule id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskStats {
    pub by_rule: BTreeMap<String, usize>,
}

impl MaskStats {
    pub fn total(&self) -> usize {
        self.by_rule.values().sum()
    }

    pub fn count(&self, rule_id: &str) -> usize {
        self.by_rule.get(rule_id).copied().unwrap_or(0)
    }
}

impl RuleSet {
    /// Apply every rule to `text`.
    pub fn mask(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in self.rules() {
            let replaced = rule.regex.replace_all(&current, rule.replacement.as_str());
            if let Cow::Owned(replaced) = replaced {
                current = replaced;
            }
        }
        current
    }

    /// Like `mask`, also counting matches per rule.
    pub fn mask_with_stats(&self, text: &str) -> (String, MaskStats) {
        let mut stats = MaskStats::default();
        let mut current = text.to_string();
        for rule in self.rules() {
            let hits = rule.regex.find_iter(&current).count();
            if hits == 0 {
                continue;
            }
            current = rule.regex.replace_all(&current, rule.replacement.as_str()).into_owned();
            *stats.by_rule.entry(rule.id.clone()).or_default() += hits;
        }
        (current, stats)
    }
}

/// Mask `text` with the built-in rule table.
pub fn mask_text(text: &str) -> String {
    RuleSet::builtin().mask(text)
}

/// Mask `text` with the built-in rule table and report what was replaced.
pub fn mask_text_with_stats(text: &str) -> (String, MaskStats) {
    RuleSet::builtin().mask_with_stats(text)
}
