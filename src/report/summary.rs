//! Finding aggregation shared by the report renderers.
//!
//! Groups findings by rule with per-file sub-counts. Group order is the
//! reporting contract: severity rank descending (critical first), then
//! occurrence count descending.

use std::collections::BTreeMap;

use crate::rules::{Finding, Severity};

/// Occurrence count per severity. Severities with zero findings are
/// absent; renderers iterate `Severity::ALL` when they need zeros.
pub fn severity_counts(findings: &[Finding]) -> BTreeMap<Severity, usize> {
    let mut counts = BTreeMap::new();
    for finding in findings {
        *counts.entry(finding.severity).or_insert(0) += 1;
    }
    counts
}

/// Sorted, deduplicated list of analyzed source files.
pub fn analyzed_sources(findings: &[Finding]) -> Vec<&str> {
    let mut sources: Vec<&str> = findings.iter().map(|f| f.source_file.as_str()).collect();
    sources.sort_unstable();
    sources.dedup();
    sources
}

/// All findings for one rule.
#[derive(Debug)]
pub struct RuleGroup<'a> {
    pub rule_id: &'a str,
    pub severity: Severity,
    pub description: &'a str,
    pub recommendation: &'a str,
    pub findings: Vec<&'a Finding>,
    /// Occurrences per source file, highest count first.
    pub per_file: Vec<(&'a str, usize)>,
}

impl RuleGroup<'_> {
    pub fn count(&self) -> usize {
        self.findings.len()
    }
}

/// Group findings by rule id, ordered by severity rank descending then
/// occurrence count descending.
pub fn group_by_rule(findings: &[Finding]) -> Vec<RuleGroup<'_>> {
    let mut groups: Vec<RuleGroup<'_>> = Vec::new();

    for finding in findings {
        let index = match groups.iter().position(|g| g.rule_id == finding.rule_id) {
            Some(index) => index,
            None => {
                groups.push(RuleGroup {
                    rule_id: &finding.rule_id,
                    severity: finding.severity,
                    description: &finding.description,
                    recommendation: &finding.recommendation,
                    findings: Vec::new(),
                    per_file: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.findings.push(finding);
        match group
            .per_file
            .iter()
            .position(|(file, _)| *file == finding.source_file)
        {
            Some(index) => group.per_file[index].1 += 1,
            None => group.per_file.push((&finding.source_file, 1)),
        }
    }

    for group in &mut groups {
        group.per_file.sort_by(|a, b| b.1.cmp(&a.1));
    }
    groups.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.findings.len().cmp(&a.findings.len()))
    });

    groups
}
