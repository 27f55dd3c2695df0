//! Input file discovery and spooling.
//!
//! Produces the ordered path list the analysis pipeline consumes. Files
//! named explicitly are always taken; directories are walked recursively
//! and filtered to known log extensions.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::{Result, SiftError};

/// Extensions picked up when walking a directory.
pub const LOG_EXTENSIONS: [&str; 5] = ["log", "txt", "json", "jsonl", "csv"];

fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| LOG_EXTENSIONS.contains(&ext.as_str()))
}

/// Resolve input paths into a deduplicated, sorted list of absolute
/// file paths.
///
/// A path that is neither a file nor a directory is an operator error
/// and fails discovery, naming the offending path.
pub fn find_log_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    for path in paths {
        if path.is_file() {
            found.insert(std::path::absolute(path)?);
        } else if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file() && has_log_extension(entry.path()) {
                    found.insert(std::path::absolute(entry.path())?);
                }
            }
        } else {
            return Err(SiftError::PathNotFound(path.display().to_string()));
        }
    }

    Ok(found.into_iter().collect())
}

/// Copy log files into a destination directory, disambiguating basename
/// collisions with a short hash of the source path. Non-files and
/// failed copies are skipped. Returns the destination paths.
pub fn copy_logs_into(paths: &[PathBuf], destination: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(destination)?;

    let mut copied = Vec::new();
    for src in paths {
        if !src.is_file() {
            continue;
        }
        let stem = src
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = src
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let name = format!("{stem}_{}{}", short_hash(src), ext);
        let dst = destination.join(name);

        match std::fs::copy(src, &dst) {
            Ok(_) => copied.push(std::path::absolute(&dst)?),
            Err(e) => {
                tracing::warn!(src = %src.display(), error = %e, "copy failed, skipping");
            }
        }
    }
    Ok(copied)
}

/// First 8 hex chars of the SHA-256 of the path.
fn short_hash(path: &Path) -> String {
    let digest = Sha256::digest(path.to_string_lossy().as_bytes());
    hex::encode(&digest[..4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walks_directories_and_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.log"), "x").unwrap();
        fs::write(dir.path().join("sub/b.jsonl"), "x").unwrap();
        fs::write(dir.path().join("skip.pdf"), "x").unwrap();

        let files = find_log_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.log", "b.jsonl"]);
    }

    #[test]
    fn explicit_files_bypass_the_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        let odd = dir.path().join("events.dat");
        fs::write(&odd, "x").unwrap();
        let files = find_log_files(&[odd.clone()]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn duplicates_collapse() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.log");
        fs::write(&file, "x").unwrap();
        let files = find_log_files(&[file.clone(), file.clone()]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_path_is_an_error() {
        let err = find_log_files(&[PathBuf::from("/no/such/path")]).unwrap_err();
        assert!(matches!(err, SiftError::PathNotFound(_)));
    }

    #[test]
    fn spool_copy_disambiguates_names() {
        let src_a = tempfile::tempdir().unwrap();
        let src_b = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        fs::write(src_a.path().join("app.log"), "a").unwrap();
        fs::write(src_b.path().join("app.log"), "b").unwrap();

        let copied = copy_logs_into(
            &[src_a.path().join("app.log"), src_b.path().join("app.log")],
            dest.path(),
        )
        .unwrap();
        assert_eq!(copied.len(), 2);
        assert_ne!(copied[0], copied[1]);
    }
}
