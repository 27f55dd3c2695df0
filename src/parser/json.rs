//! Whole-document JSON parser.

use std::path::Path;

use serde_json::Value;

use super::lines::Encoding;
use super::EventStream;
use crate::event::Event;

/// Parse a `.json` file as one document.
///
/// An array yields each object element, capped at `max_lines` elements;
/// a single object yields one event; anything else (including a document
/// that fails to parse) yields zero events.
pub fn parse(path: &Path, max_lines: usize, encoding: Encoding) -> EventStream {
    let events = read_document(path, max_lines, encoding).unwrap_or_default();
    Box::new(events.into_iter())
}

fn read_document(path: &Path, max_lines: usize, encoding: Encoding) -> Option<Vec<Event>> {
    let bytes = std::fs::read(path).ok()?;
    let document: Value = serde_json::from_str(&encoding.decode(&bytes)).ok()?;

    match document {
        Value::Array(items) => {
            let cap = if max_lines > 0 { max_lines } else { usize::MAX };
            Some(
                items
                    .into_iter()
                    .take(cap)
                    .filter_map(|item| match item {
                        Value::Object(object) => Some(Event::from_json_object(object)),
                        _ => None,
                    })
                    .collect(),
            )
        }
        Value::Object(object) => Some(vec![Event::from_json_object(object)]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn json_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn array_of_objects() {
        let file = json_file(r#"[{"a":1}, {"b":2}, 3, "x", {"c":4}]"#);
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn single_object_is_one_event() {
        let file = json_file(r#"{"msg": "hello"}"#);
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn max_lines_counts_array_elements() {
        // Cap counts elements scanned, not objects kept: the scalar in
        // position two consumes budget.
        let file = json_file(r#"[{"a":1}, 7, {"b":2}]"#);
        let events: Vec<Event> = parse(file.path(), 2, Encoding::Utf8).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn garbage_document_yields_zero_events() {
        let file = json_file("not { json");
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn empty_file_yields_zero_events() {
        let file = json_file("");
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn scalar_document_yields_zero_events() {
        let file = json_file("42");
        let events: Vec<Event> = parse(file.path(), 0, Encoding::Utf8).collect();
        assert!(events.is_empty());
    }
}
