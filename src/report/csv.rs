//! CSV report writer.
//!
//! This schema is for reporting only; it intentionally differs from the
//! CSV ingestion parser's header-driven schema.

use crate::error::{Result, SiftError};
use crate::report::summary;
use crate::rules::Finding;

const COLUMNS: [&str; 6] = [
    "rule_id",
    "severity",
    "description",
    "source_file",
    "recommendation",
    "event",
];

/// Render findings as CSV, preceded by a comment line naming the
/// analyzed files.
pub fn render(findings: &[Finding]) -> Result<String> {
    let mut out = String::new();

    let sources = summary::analyzed_sources(findings);
    if !sources.is_empty() {
        out.push_str("# analyzed_files: ");
        out.push_str(&sources.join(" | "));
        out.push('\n');
    }

    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for finding in findings {
        let severity = finding.severity.to_string();
        let event_json = serde_json::to_string(&finding.event)?;
        writer.write_record([
            finding.rule_id.as_str(),
            severity.as_str(),
            finding.description.as_str(),
            finding.source_file.as_str(),
            finding.recommendation.as_str(),
            event_json.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SiftError::Report(e.to_string()))?;
    out.push_str(&String::from_utf8(bytes).map_err(|e| SiftError::Report(e.to_string()))?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::event::Event;
    use crate::rules::Severity;

    #[test]
    fn header_and_json_encoded_event() {
        let mut event = Event::new();
        event.insert("message", "failed");
        let findings = vec![Finding {
            rule_id: "R1".into(),
            description: "desc".into(),
            severity: Severity::High,
            recommendation: "fix".into(),
            source_file: "a.log".into(),
            event,
            raw_line: "failed".into(),
        }];

        let csv = render(&findings).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "# analyzed_files: a.log");
        assert_eq!(
            lines.next().unwrap(),
            "rule_id,severity,description,source_file,recommendation,event"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("R1,high,desc,a.log,fix,"));
        assert!(row.contains("message"));
    }

    #[test]
    fn empty_findings_render_header_only() {
        let csv = render(&[]).unwrap();
        assert_eq!(
            csv.trim_end(),
            "rule_id,severity,description,source_file,recommendation,event"
        );
    }
}
