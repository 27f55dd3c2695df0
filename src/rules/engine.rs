//! Rule evaluation.
//!
//! Each event is flattened into a single text blob (scalar field values
//! joined by single spaces, in field order) and every rule's pattern is
//! searched against it. One finding is emitted per matching rule, in
//! rule declaration order.

use crate::event::Event;
use crate::rules::{Finding, RuleSet};

/// Evaluates a shared, read-only rule set against events.
pub struct RuleEngine {
    rules: RuleSet,
}

impl RuleEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run every rule against one event. Returns zero or more findings,
    /// ordered by rule declaration order.
    pub fn apply(&self, event: &Event, source_file: &str) -> Vec<Finding> {
        let blob = text_blob(event);
        let mut findings = Vec::new();

        for rule in self.rules.iter() {
            if rule.pattern.is_match(&blob) {
                findings.push(Finding {
                    rule_id: rule.id.clone(),
                    description: rule.description.clone(),
                    severity: rule.severity,
                    recommendation: rule.recommendation.clone(),
                    source_file: source_file.to_string(),
                    event: event.clone(),
                    raw_line: raw_line(event),
                });
            }
        }

        findings
    }
}

/// The searchable surface of an event: scalar field values joined with
/// single spaces. Null and nested values are excluded.
fn text_blob(event: &Event) -> String {
    event
        .iter()
        .filter_map(|(_, value)| value.blob_text())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The original line behind an event: its `message` field when textual,
/// else the JSON-encoded event.
fn raw_line(event: &Event) -> String {
    if let Some(message) = event.message() {
        return message.to_string();
    }
    serde_json::to_string(event).unwrap_or_else(|_| format!("{event:?}"))
}
