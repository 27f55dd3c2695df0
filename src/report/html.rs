//! Self-contained HTML report renderer with a client-side filterable
//! rules table.

use std::fmt::Write as _;

use crate::error::Result;
use crate::report::summary::{self, RuleGroup};
use crate::rules::{Finding, Severity};

const SAMPLE_LIMIT: usize = 5;

const CSS: &str = "body{font-family:Segoe UI,Roboto,Arial,sans-serif;margin:20px;}\
h1{margin-bottom:0;} small{color:#555;} table{border-collapse:collapse;width:100%;}\
th,td{border:1px solid #ddd;padding:8px;} th{background:#f5f5f5;text-align:left;}\
.sev-info{background:#eef5ff;} .sev-low{background:#effaf0;} .sev-medium{background:#fff7e6;}\
.sev-high{background:#ffecec;} .sev-critical{background:#ffe1e1;} .badge{padding:2px 6px;border-radius:4px;}\
.b-info{background:#2f86eb;color:#fff;} .b-low{background:#2ecc71;color:#fff;} .b-medium{background:#f39c12;color:#fff;}\
.b-high{background:#e74c3c;color:#fff;} .b-critical{background:#c0392b;color:#fff;} pre{background:#f8f8f8;padding:8px;overflow:auto;}\
details{margin:8px 0;} summary{cursor:pointer;} .grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(160px,1fr));gap:12px;margin:12px 0;}\
.card{border:1px solid #ddd;border-radius:8px;padding:12px;background:#fff;} .muted{color:#666;}\
#filter{padding:8px;border:1px solid #ccc;border-radius:6px;width:100%;max-width:420px;}";

const FILTER_SCRIPT: &str = "const q=document.getElementById('filter');\
const rows=[...document.querySelectorAll('#rulesTbl tbody tr')];\
q&&q.addEventListener('input',()=>{const v=q.value.toLowerCase();\
rows.forEach(r=>{r.style.display=r.innerText.toLowerCase().includes(v)?'':'none';});});";

pub fn render(findings: &[Finding]) -> Result<String> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let counts = summary::severity_counts(findings);
    let groups = summary::group_by_rule(findings);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html lang='en'><head><meta charset='utf-8'>");
    html.push_str("<meta name='viewport' content='width=device-width, initial-scale=1'>");
    html.push_str("<title>Log Analysis Report</title>");
    let _ = write!(html, "<style>{CSS}</style></head><body>");
    html.push_str("<h1>Log Analysis Report</h1>");
    let _ = write!(html, "<small>Generated at {generated_at}</small>");
    let _ = write!(
        html,
        "<p><strong>Total findings:</strong> {}</p>",
        findings.len()
    );

    html.push_str("<h2>Summary by severity</h2><div class='grid'>");
    for severity in Severity::ALL.iter().rev() {
        if let Some(count) = counts.get(severity) {
            let _ = write!(
                html,
                "<div class='card {}'><div>{}</div>\
<div style='font-size:28px;font-weight:700'>{count}</div>\
<div class='muted'>findings</div></div>",
                severity_class(*severity),
                badge(*severity),
            );
        }
    }
    html.push_str("</div>");

    html.push_str("<h2>Top rules</h2>");
    html.push_str(
        "<input id='filter' type='search' placeholder='Filter by rule, severity or description...'>",
    );
    html.push_str(
        "<table id='rulesTbl'><thead><tr><th>Rule</th><th>Severity</th>\
<th>Findings</th><th>Description</th></tr></thead><tbody>",
    );
    for group in &groups {
        let _ = write!(
            html,
            "<tr class='{}'><td><a href='#rule-{}'><code>{}</code></a></td><td>{}</td><td>{}</td><td>{}</td></tr>",
            severity_class(group.severity),
            group.rule_id,
            group.rule_id,
            badge(group.severity),
            group.count(),
            html_escape(group.description),
        );
    }
    html.push_str("</tbody></table>");

    html.push_str("<h2>Details by rule</h2>");
    for group in &groups {
        render_group(&mut html, group)?;
    }

    let _ = write!(html, "<script>{FILTER_SCRIPT}</script></body></html>");
    Ok(html)
}

fn render_group(html: &mut String, group: &RuleGroup<'_>) -> Result<()> {
    let _ = write!(
        html,
        "<h3 id='rule-{}'><code>{}</code> — {} ({})</h3>",
        group.rule_id,
        group.rule_id,
        badge(group.severity),
        group.count(),
    );
    if !group.description.is_empty() {
        let _ = write!(html, "<p>{}</p>", html_escape(group.description));
    }
    if !group.recommendation.is_empty() {
        let _ = write!(
            html,
            "<p><strong>Recommendation:</strong> {}</p>",
            html_escape(group.recommendation)
        );
    }

    if !group.per_file.is_empty() {
        html.push_str(
            "<h4>Affected files</h4><table><thead><tr><th>File</th>\
<th>Findings</th></tr></thead><tbody>",
        );
        for (file, count) in &group.per_file {
            let _ = write!(
                html,
                "<tr><td><code>{}</code></td><td>{count}</td></tr>",
                html_escape(file)
            );
        }
        html.push_str("</tbody></table>");
    }

    let _ = write!(html, "<h4>Samples (up to {SAMPLE_LIMIT})</h4>");
    for finding in group.findings.iter().take(SAMPLE_LIMIT) {
        let pretty = serde_json::to_string_pretty(&finding.event)?;
        let _ = write!(
            html,
            "<details><summary>Event</summary><pre>{}</pre></details>",
            html_escape(&pretty)
        );
    }
    Ok(())
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "sev-info",
        Severity::Low => "sev-low",
        Severity::Medium => "sev-medium",
        Severity::High => "sev-high",
        Severity::Critical => "sev-critical",
    }
}

fn badge(severity: Severity) -> String {
    let class = match severity {
        Severity::Info => "b-info",
        Severity::Low => "b-low",
        Severity::Medium => "b-medium",
        Severity::High => "b-high",
        Severity::Critical => "b-critical",
    };
    format!("<span class='badge {class}'>{}</span>", severity.label())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    #[test]
    fn escapes_markup_in_descriptions() {
        let mut event = Event::new();
        event.insert("message", "x");
        let findings = vec![Finding {
            rule_id: "R1".into(),
            description: "<script>alert(1)</script>".into(),
            severity: Severity::High,
            recommendation: String::new(),
            source_file: "a.log".into(),
            event,
            raw_line: "x".into(),
        }];
        let html = render(&findings).unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn includes_filter_wiring() {
        let html = render(&[]).unwrap();
        assert!(html.contains("id='filter'"));
        assert!(html.contains("rulesTbl"));
    }
}
