//! Fixed-format plain text renderer: one block per finding.

use std::fmt::Write as _;

use crate::error::Result;
use crate::report::summary;
use crate::rules::Finding;

pub fn render(findings: &[Finding]) -> Result<String> {
    let mut out = String::new();

    let sources = summary::analyzed_sources(findings);
    if !sources.is_empty() {
        out.push_str("analyzed_files:\n");
        for source in &sources {
            let _ = writeln!(out, "- {source}");
        }
        out.push('\n');
    }

    for finding in findings {
        let _ = writeln!(out, "issue: {}", finding.description);
        let _ = writeln!(out, "severity: {}", finding.severity.label());
        let _ = writeln!(out, "recommendation: {}", finding.recommendation);
        let _ = writeln!(out, "log line: {}\n", finding.raw_line);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::rules::Severity;

    #[test]
    fn one_block_per_finding() {
        let mut event = Event::new();
        event.insert("message", "bad line");
        let findings = vec![Finding {
            rule_id: "R1".into(),
            description: "something".into(),
            severity: Severity::Critical,
            recommendation: "do the thing".into(),
            source_file: "a.log".into(),
            event,
            raw_line: "bad line".into(),
        }];
        let text = render(&findings).unwrap();
        assert!(text.contains("analyzed_files:\n- a.log"));
        assert!(text.contains("issue: something"));
        assert!(text.contains("severity: Critical"));
        assert!(text.contains("recommendation: do the thing"));
        assert!(text.contains("log line: bad line"));
    }
}
