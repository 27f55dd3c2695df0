//! JSON Lines parser: one standalone JSON value per line.

use std::path::Path;

use serde_json::Value;

use super::lines::{Encoding, LineReader};
use super::{empty_stream, EventStream};
use crate::event::Event;

/// Parse a `.jsonl` file lazily. Blank lines, unparseable lines and
/// non-object values are skipped. `max_lines` caps lines consumed.
pub fn parse(path: &Path, max_lines: usize, encoding: Encoding) -> EventStream {
    let lines = match LineReader::open(path, max_lines, encoding) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open file");
            return empty_stream();
        }
    };

    Box::new(lines.filter_map(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(object)) => Some(Event::from_json_object(object)),
            Ok(_) => None,
            Err(_) => None,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn jsonl_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn skips_invalid_lines_and_keeps_order() {
        let file = jsonl_file("{\"x\":1}\nnot json\n{\"y\":2}\n");
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert_eq!(events.len(), 2);
        assert!(events[0].get("x").is_some());
        assert!(events[1].get("y").is_some());
    }

    #[test]
    fn skips_blank_lines_and_non_objects() {
        let file = jsonl_file("\n   \n[1,2]\n\"str\"\n42\n{\"ok\":true}\n");
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn max_lines_caps_lines_consumed_not_events() {
        // The cap applies to lines read; the invalid second line still
        // spends one line of budget.
        let file = jsonl_file("{\"a\":1}\nnot json\n{\"b\":2}\n");
        let events: Vec<Event> = parse(file.path(), 2, Encoding::Utf8).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn missing_file_yields_zero_events() {
        let events: Vec<Event> =
            parse(Path::new("/nonexistent.jsonl"), 0, Encoding::Utf8).collect();
        assert!(events.is_empty());
    }
}
