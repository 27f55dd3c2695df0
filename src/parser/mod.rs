//! Format autodetection and per-format parsers.
//!
//! Each parser turns a file into a lazy, single-pass stream of
//! normalized [`Event`]s. Malformed units are skipped in place; a file
//! that yields zero events is a valid outcome, never an error.

pub mod apache;
pub mod csv;
pub mod json;
pub mod jsonl;
pub mod lines;
pub mod plaintext;

use std::path::Path;

use crate::event::Event;

pub use lines::{Encoding, LineReader};

/// A finite, forward-only stream of parsed events.
pub type EventStream = Box<dyn Iterator<Item = Event>>;

pub(crate) fn empty_stream() -> EventStream {
    Box::new(std::iter::empty())
}

/// The supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    JsonLines,
    Json,
    Csv,
    Apache,
    Plaintext,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JsonLines => write!(f, "jsonl"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Apache => write!(f, "apache"),
            Self::Plaintext => write!(f, "plaintext"),
        }
    }
}

/// Pick a parser for `path`: filename suffix first, then an Apache peek
/// over the first ten lines, then the plaintext fallback.
pub fn detect_format(path: &Path, encoding: Encoding) -> LogFormat {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match extension.as_deref() {
        Some("jsonl") => return LogFormat::JsonLines,
        Some("json") => return LogFormat::Json,
        Some("csv") => return LogFormat::Csv,
        _ => {}
    }

    if let Ok(head) = LineReader::open(path, 10, encoding) {
        for line in head {
            if apache::APACHE_COMBINED_RE.is_match(&line) {
                return LogFormat::Apache;
            }
        }
    }

    LogFormat::Plaintext
}

/// Detect the format of `path` and return its event stream.
pub fn detect_and_parse(path: &Path, max_lines: usize, encoding: Encoding) -> EventStream {
    let format = detect_format(path, encoding);
    tracing::debug!(path = %path.display(), %format, "detected log format");

    match format {
        LogFormat::JsonLines => jsonl::parse(path, max_lines, encoding),
        LogFormat::Json => json::parse(path, max_lines, encoding),
        LogFormat::Csv => csv::parse(path, max_lines, encoding),
        LogFormat::Apache => apache::parse(path, max_lines, encoding),
        LogFormat::Plaintext => plaintext::parse(path, max_lines, encoding),
    }
}
