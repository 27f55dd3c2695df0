pub mod builtin;
pub mod engine;
pub mod finding;

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use serde_json::Value;

pub use engine::RuleEngine;
pub use finding::{Finding, Severity};

/// A named detection pattern. Each rule is plain data with a compiled
/// case-insensitive regex; loaded once, immutable for the run.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub pattern: Regex,
    pub recommendation: String,
}

/// Serializable view of a rule, used for `list-rules` output.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RuleMetadata {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub pattern: String,
    pub recommendation: String,
}

/// One entry of a rule definition file.
#[derive(Debug, Deserialize)]
struct RuleSpec {
    id: String,
    description: String,
    regex: String,
    #[serde(default = "default_severity", deserialize_with = "lenient_severity")]
    severity: Severity,
    #[serde(default = "default_recommendation")]
    recommendation: String,
}

fn default_severity() -> Severity {
    Severity::Medium
}

fn default_recommendation() -> String {
    "No recommendation.".to_string()
}

fn lenient_severity<'de, D>(deserializer: D) -> std::result::Result<Severity, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Severity::from_str_lenient(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown severity: {s}")))
}

pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// An ordered, immutable set of rules. Declaration order is finding order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// The built-in default set.
    pub fn defaults() -> Self {
        Self {
            rules: builtin::default_rules(),
        }
    }

    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Load rules from a JSON file (array of `{id, description, regex,
    /// severity?, recommendation?}` objects).
    ///
    /// Degrades rather than fails: a missing or wholly malformed file
    /// yields the defaults, a malformed entry is skipped, and an empty
    /// surviving set falls back to the defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no rule file, using built-in rules");
            return Self::defaults();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read rule file, using built-in rules");
                return Self::defaults();
            }
        };

        let entries: Vec<Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed rule file, using built-in rules");
                return Self::defaults();
            }
        };

        let rules: Vec<Rule> = entries.into_iter().filter_map(compile_entry).collect();

        if rules.is_empty() {
            tracing::warn!(path = %path.display(), "no valid rule entries, using built-in rules");
            return Self::defaults();
        }

        tracing::info!(path = %path.display(), count = rules.len(), "loaded rules");
        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Metadata for every rule, in declaration order.
    pub fn metadata(&self) -> Vec<RuleMetadata> {
        self.rules
            .iter()
            .map(|rule| RuleMetadata {
                id: rule.id.clone(),
                description: rule.description.clone(),
                severity: rule.severity,
                pattern: rule.pattern.as_str().to_string(),
                recommendation: rule.recommendation.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Turn one JSON entry into a rule, or skip it with a warning.
fn compile_entry(entry: Value) -> Option<Rule> {
    let spec: RuleSpec = match serde_json::from_value(entry) {
        Ok(spec) => spec,
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed rule entry");
            return None;
        }
    };

    let pattern = match compile_pattern(&spec.regex) {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!(rule_id = %spec.id, error = %e, "skipping rule with invalid regex");
            return None;
        }
    };

    Some(Rule {
        id: spec.id,
        description: spec.description,
        severity: spec.severity,
        pattern,
        recommendation: spec.recommendation,
    })
}
