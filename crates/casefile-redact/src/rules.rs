//! Redaction rule table: TOML schema and compiled form.
//!
//! A `RuleTable` is deserialized from TOML and holds an ordered list of
//! `RuleSpec`s plus a version number. `RuleSet::from_table` compiles every
//! pattern up front so masking itself can never fail.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use casefile_contracts::error::{CasefileError, CasefileResult};

const BUILTIN_RULES: &str = include_str!("../rules/default.toml");

static BUILTIN: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::from_toml_str(BUILTIN_RULES).expect("built-in redaction rules must compile")
});

/// A single masking rule as written in TOML.
///
/// `replacement` uses `regex` replacement syntax, so named groups from
/// `pattern` can be kept (`${keyword}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Stable identifier, used in stats and error messages.
    pub id: String,

    #[serde(default)]
    pub description: String,

    pub pattern: String,

    pub replacement: String,

    #[serde(default)]
    pub case_insensitive: bool,
}

/// The top-level structure deserialized from a TOML rule file.
///
/// Example:
/// ```toml
/// version = 3
///
/// [[rules]]
/// id = "email"
/// pattern = '[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}'
/// replacement = "[redacted-email]"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTable {
    pub version: u32,
    /// Applied in order.
    pub rules: Vec<RuleSpec>,
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub regex: Regex,
    pub replacement: String,
}

/// An ordered, compiled rule table.
#[derive(Debug, Clone)]
pub struct RuleSet {
    version: u32,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// The compiled-in default table.
    pub fn builtin() -> &'static RuleSet {
        &BUILTIN
    }

    /// Compile every rule in `table`.
    ///
    /// Returns `CasefileError::RuleCompile` naming the first rule whose
    /// pattern is invalid, and `ConfigError` if two rules share an id.
    pub fn from_table(table: RuleTable) -> CasefileResult<Self> {
        let mut rules: Vec<Rule> = Vec::with_capacity(table.rules.len());

        for spec in table.rules {
            if rules.iter().any(|r| r.id == spec.id) {
                return Err(CasefileError::ConfigError {
                    reason: format!("duplicate redaction rule id '{}'", spec.id),
                });
            }

            let regex = RegexBuilder::new(&spec.pattern)
                .case_insensitive(spec.case_insensitive)
                .build()
                .map_err(|e| CasefileError::RuleCompile {
                    rule_id: spec.id.clone(),
                    reason: e.to_string(),
                })?;

            debug!(rule_id = %spec.id, "redaction rule compiled");
            rules.push(Rule { id: spec.id, regex, replacement: spec.replacement });
        }

        Ok(Self { version: table.version, rules })
    }

    /// Parse `s` as a TOML rule table and compile it.
    pub fn from_toml_str(s: &str) -> CasefileResult<Self> {
        let table: RuleTable = toml::from_str(s).map_err(|e| CasefileError::ConfigError {
            reason: format!("failed to parse redaction rules TOML: {}", e),
        })?;
        Self::from_table(table)
    }

    /// Read and compile the rule table at `path`.
    pub fn from_file(path: &Path) -> CasefileResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CasefileError::ConfigError {
            reason: format!("failed to read rules file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
