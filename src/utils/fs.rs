//! Filesystem helpers
//!
//! Small async helpers shared by the writer, deleter and rename cascade.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Regular files in `dir` whose stem (file name minus extension) equals
/// `stem`, sorted for deterministic first-match behavior. A missing
/// directory yields an empty list.
pub async fn files_with_stem(dir: &Path, stem: &str) -> io::Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(matches),
        Err(e) => return Err(e),
    };

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.file_stem().and_then(|s| s.to_str()) == Some(stem) {
            matches.push(path);
        }
    }

    matches.sort();
    Ok(matches)
}

/// Count regular files under `dir`, recursively. A missing directory
/// counts zero.
pub async fn count_files(dir: &Path) -> io::Result<u64> {
    let mut stack = vec![dir.to_path_buf()];
    let mut count = 0u64;

    while let Some(current) = stack.pop() {
        let mut entries = match fs::read_dir(&current).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        };
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                stack.push(entry.path());
            } else if file_type.is_file() {
                count += 1;
            }
        }
    }

    Ok(count)
}

/// Remove a file, treating "already gone" as a normal outcome.
pub async fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
