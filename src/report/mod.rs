pub mod csv;
pub mod html;
pub mod json;
pub mod markdown;
pub mod summary;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::Finding;

/// Report format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Csv,
    Markdown,
    Html,
    Text,
}

impl ReportFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "markdown" | "md" => Some(Self::Markdown),
            "html" => Some(Self::Html),
            "text" | "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Render findings into the specified format.
pub fn render(findings: &[Finding], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => json::render(findings),
        ReportFormat::Csv => csv::render(findings),
        ReportFormat::Markdown => markdown::render(findings),
        ReportFormat::Html => html::render(findings),
        ReportFormat::Text => text::render(findings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_format_names() {
        assert_eq!(ReportFormat::from_str_lenient("MD"), Some(ReportFormat::Markdown));
        assert_eq!(ReportFormat::from_str_lenient("txt"), Some(ReportFormat::Text));
        assert_eq!(ReportFormat::from_str_lenient("yaml"), None);
    }
}
