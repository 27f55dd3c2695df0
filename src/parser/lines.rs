//! Line-oriented file reading with lossy decoding.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Source text encoding. Decoding never fails: undecodable UTF-8 byte
/// sequences become U+FFFD, and Latin-1 maps every byte to a char.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
}

impl Encoding {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Some(Self::Latin1),
            _ => None,
        }
    }

    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf-8"),
            Self::Latin1 => write!(f, "latin-1"),
        }
    }
}

/// Forward-only line iterator over a file.
///
/// Strips the trailing newline (`\n` or `\r\n`) from each line and stops
/// after `max_lines` lines when `max_lines > 0`.
pub struct LineReader {
    reader: BufReader<File>,
    encoding: Encoding,
    max_lines: usize,
    yielded: usize,
    buf: Vec<u8>,
}

impl LineReader {
    pub fn open(path: &Path, max_lines: usize, encoding: Encoding) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            encoding,
            max_lines,
            yielded: 0,
            buf: Vec::new(),
        })
    }
}

impl Iterator for LineReader {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.max_lines > 0 && self.yielded >= self.max_lines {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                self.yielded += 1;
                Some(self.encoding.decode(&self.buf))
            }
            Err(e) => {
                tracing::warn!(error = %e, "read error mid-file, stopping");
                None
            }
        }
    }
}
