//! Plaintext fallback: one `{message: line}` event per line.

use std::path::Path;

use super::lines::{Encoding, LineReader};
use super::{empty_stream, EventStream};
use crate::event::Event;

pub fn parse(path: &Path, max_lines: usize, encoding: Encoding) -> EventStream {
    let lines = match LineReader::open(path, max_lines, encoding) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open file");
            return empty_stream();
        }
    };

    Box::new(lines.map(|line| {
        let mut event = Event::new();
        event.insert("message", line);
        event
    }))
}
