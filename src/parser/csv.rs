//! CSV parser: first row is the header, each data row becomes an event.

use std::path::Path;

use super::lines::Encoding;
use super::EventStream;
use crate::event::Event;

/// Parse a `.csv` file. Every cell is kept as a string, keyed by its
/// header. A parse failure yields zero events (no partial results).
pub fn parse(path: &Path, max_lines: usize, encoding: Encoding) -> EventStream {
    let events = read_rows(path, max_lines, encoding).unwrap_or_default();
    Box::new(events.into_iter())
}

fn read_rows(path: &Path, max_lines: usize, encoding: Encoding) -> Option<Vec<Event>> {
    let bytes = std::fs::read(path).ok()?;
    let text = encoding.decode(&bytes);

    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers().ok()?.clone();

    let mut events = Vec::new();
    for result in reader.records() {
        if max_lines > 0 && events.len() >= max_lines {
            break;
        }
        let record = result.ok()?;
        let mut event = Event::new();
        for (name, value) in headers.iter().zip(record.iter()) {
            event.insert(name, value);
        }
        events.push(event);
    }
    Some(events)
}
