//! Markdown report renderer.

use std::fmt::Write as _;

use crate::error::Result;
use crate::report::summary::{self, RuleGroup};
use crate::rules::{Finding, Severity};

const SAMPLE_LIMIT: usize = 5;

pub fn render(findings: &[Finding]) -> Result<String> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let counts = summary::severity_counts(findings);
    let groups = summary::group_by_rule(findings);
    let sources = summary::analyzed_sources(findings);

    let mut md = String::new();
    let _ = writeln!(md, "# Log Analysis Report\n");
    let _ = writeln!(md, "Generated at: {generated_at}  ");
    let _ = writeln!(md, "Total findings: **{}**\n", findings.len());

    if !sources.is_empty() {
        let _ = writeln!(md, "Analyzed files:\n");
        for source in &sources {
            let _ = writeln!(md, "- `{source}`");
        }
        md.push('\n');
    }

    let _ = writeln!(md, "## Summary by severity\n");
    let _ = writeln!(md, "| Severity | Findings |\n|---|---:|");
    for severity in Severity::ALL.iter().rev() {
        if let Some(count) = counts.get(severity) {
            let _ = writeln!(md, "| {} | {count} |", severity.label());
        }
    }
    md.push('\n');

    let _ = writeln!(md, "## Top rules\n");
    let _ = writeln!(md, "| Rule | Severity | Findings | Description |\n|---|---|---:|---|");
    for group in &groups {
        let _ = writeln!(
            md,
            "| `{}` | {} | {} | {} |",
            group.rule_id,
            group.severity.label(),
            group.count(),
            group.description
        );
    }
    md.push('\n');

    if !groups.is_empty() {
        let _ = writeln!(md, "## Details by rule\n");
        for group in &groups {
            render_group(&mut md, group)?;
        }
    }

    Ok(md)
}

fn render_group(md: &mut String, group: &RuleGroup<'_>) -> Result<()> {
    let _ = writeln!(
        md,
        "### `{}` — {} ({})\n",
        group.rule_id,
        group.severity.label(),
        group.count()
    );
    if !group.description.is_empty() {
        let _ = writeln!(md, "{}\n", group.description);
    }
    if !group.recommendation.is_empty() {
        let _ = writeln!(md, "- **Recommendation**: {}\n", group.recommendation);
    }

    if !group.per_file.is_empty() {
        let _ = writeln!(md, "Affected files:\n");
        let _ = writeln!(md, "| File | Findings |\n|---|---:|");
        for (file, count) in &group.per_file {
            let _ = writeln!(md, "| `{file}` | {count} |");
        }
        md.push('\n');
    }

    let _ = writeln!(md, "Sample events (up to {SAMPLE_LIMIT}):\n");
    for finding in group.findings.iter().take(SAMPLE_LIMIT) {
        let pretty = serde_json::to_string_pretty(&finding.event)?;
        let _ = writeln!(md, "```json\n{pretty}\n```\n");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    fn finding(rule_id: &str, severity: Severity) -> Finding {
        let mut event = Event::new();
        event.insert("message", "sample");
        Finding {
            rule_id: rule_id.into(),
            description: "a rule".into(),
            severity,
            recommendation: "fix it".into(),
            source_file: "a.log".into(),
            event,
            raw_line: "sample".into(),
        }
    }

    #[test]
    fn includes_summary_and_detail_sections() {
        let findings = vec![finding("R1", Severity::Critical), finding("R2", Severity::Low)];
        let md = render(&findings).unwrap();
        assert!(md.contains("# Log Analysis Report"));
        assert!(md.contains("## Summary by severity"));
        assert!(md.contains("| Critical | 1 |"));
        assert!(md.contains("### `R1` — Critical (1)"));
        assert!(md.contains("`a.log`"));
    }

    #[test]
    fn samples_cap_at_five() {
        let findings: Vec<Finding> = (0..8).map(|_| finding("R1", Severity::High)).collect();
        let md = render(&findings).unwrap();
        assert_eq!(md.matches("```json").count(), SAMPLE_LIMIT);
    }
}
