//! Logsift — offline log analysis engine.
//!
//! Ingests heterogeneous log files (JSON Lines, JSON, CSV, Apache
//! combined access logs, plaintext), normalizes them into flat events
//! and evaluates regex detection rules against each event to surface
//! security-relevant findings.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use logsift::{analyze, AnalyzeOptions};
//!
//! let options = AnalyzeOptions::default();
//! let report = analyze(&[PathBuf::from("/var/log")], &options).unwrap();
//! println!("Findings: {}", report.findings.len());
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod event;
pub mod parser;
pub mod report;
pub mod rules;

use std::path::PathBuf;

use error::Result;
use parser::Encoding;
use report::ReportFormat;
use rules::{Finding, RuleEngine, RuleSet, Severity};

/// Options for an analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Rule definition file; the built-in rules apply when `None` or
    /// when the file cannot be loaded.
    pub rules_path: Option<PathBuf>,
    /// Source text encoding.
    pub encoding: Encoding,
    /// Per-file line cap, 0 = unlimited.
    pub max_lines: usize,
}

/// Complete analysis report.
#[derive(Debug)]
pub struct AnalysisReport {
    /// Findings, ordered by file, then event within file, then rule
    /// declaration order.
    pub findings: Vec<Finding>,
    /// The analyzed files, in analysis order.
    pub files: Vec<PathBuf>,
}

impl AnalysisReport {
    pub fn highest_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }

    /// Whether any finding is at or above `threshold`.
    pub fn exceeds(&self, threshold: Severity) -> bool {
        self.highest_severity()
            .is_some_and(|highest| highest >= threshold)
    }
}

/// Run a complete analysis: discover files, detect formats, parse,
/// evaluate rules.
///
/// A file that yields no events, or a rule source that degrades to the
/// built-in set, is not an error; the only failure here is an input
/// path that does not exist.
pub fn analyze(inputs: &[PathBuf], options: &AnalyzeOptions) -> Result<AnalysisReport> {
    let files = discover::find_log_files(inputs)?;

    let rule_set = match &options.rules_path {
        Some(path) => RuleSet::load(path),
        None => RuleSet::defaults(),
    };
    let engine = RuleEngine::new(rule_set);

    let mut findings: Vec<Finding> = Vec::new();
    for file in &files {
        let source = file.display().to_string();
        let events = parser::detect_and_parse(file, options.max_lines, options.encoding);
        for event in events {
            findings.extend(engine.apply(&event, &source));
        }
    }

    tracing::info!(
        files = files.len(),
        findings = findings.len(),
        "analysis complete"
    );

    Ok(AnalysisReport { findings, files })
}

/// Render an analysis report in the specified format.
pub fn render_report(report: &AnalysisReport, format: ReportFormat) -> Result<String> {
    report::render(&report.findings, format)
}
