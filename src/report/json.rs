use crate::error::Result;
use crate::rules::Finding;

/// Render findings as a JSON array of finding records.
pub fn render(findings: &[Finding]) -> Result<String> {
    let json = serde_json::to_string_pretty(findings)?;
    Ok(json)
}
