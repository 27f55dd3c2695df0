//! Apache combined access log parser.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::lines::{Encoding, LineReader};
use super::{empty_stream, EventStream};
use crate::event::{Event, FieldValue};

/// Combined log format: `IP - - [time] "METHOD path PROTO" status size
/// ["referrer" "user-agent"]`. The referrer/user-agent group is optional.
pub static APACHE_COMBINED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?P<ip>\S+) \S+ \S+ \[(?P<time>[^\]]+)\] "(?P<method>\S+) (?P<path>\S+) \S+" (?P<status>\d{3}) (?P<size>\S+)( "(?P<ref>[^"]*)" "(?P<ua>[^"]*)")?"#,
    )
    .expect("apache combined pattern must compile")
});

const FIELDS: [&str; 8] = ["ip", "time", "method", "path", "status", "size", "ref", "ua"];

/// Parse an access log lazily. Lines that do not match the combined
/// format are skipped.
pub fn parse(path: &Path, max_lines: usize, encoding: Encoding) -> EventStream {
    let lines = match LineReader::open(path, max_lines, encoding) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open file");
            return empty_stream();
        }
    };

    Box::new(lines.filter_map(|line| {
        APACHE_COMBINED_RE.captures(&line).map(|caps| {
            let mut event = Event::new();
            for name in FIELDS {
                match caps.name(name) {
                    Some(m) => event.insert(name, m.as_str()),
                    None => event.insert(name, FieldValue::Null),
                }
            }
            event.insert("source", "apache");
            event
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const COMBINED: &str = "203.0.113.9 - - [10/Oct/2024:13:55:36 +0000] \
\"GET /index.html HTTP/1.1\" 200 2326 \"http://example.com/\" \"Mozilla/5.0\"\n";
    const COMMON: &str =
        "203.0.113.9 - - [10/Oct/2024:13:55:36 +0000] \"GET /index.html HTTP/1.1\" 404 150\n";

    fn log_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_combined_line() {
        let file = log_file(COMBINED);
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.get("ip").unwrap().as_str(), Some("203.0.113.9"));
        assert_eq!(event.get("method").unwrap().as_str(), Some("GET"));
        assert_eq!(event.get("status").unwrap().as_str(), Some("200"));
        assert_eq!(event.get("ua").unwrap().as_str(), Some("Mozilla/5.0"));
        assert_eq!(event.get("source").unwrap().as_str(), Some("apache"));
    }

    #[test]
    fn referrer_and_agent_are_optional() {
        let file = log_file(COMMON);
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].get("ref"), Some(&FieldValue::Null));
        assert_eq!(events[0].get("ua"), Some(&FieldValue::Null));
    }

    #[test]
    fn non_matching_lines_are_skipped() {
        let content = format!("garbage line\n{COMBINED}also not apache\n");
        let file = log_file(&content);
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert_eq!(events.len(), 1);
    }
}
