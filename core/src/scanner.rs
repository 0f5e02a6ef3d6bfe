use crate::error::{IndexError, Result};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// File names in `dir` (non-recursive) with the article extension, excluding
/// names ending in the backup suffix. Symlinked articles are followed.
/// Order follows the directory listing.
pub fn scan_corpus(dir: &Path, extension: &str, backup_suffix: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Err(IndexError::DirectoryNotFound {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        });
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            // the root itself failed to list
            Err(e) if e.depth() == 0 => {
                return Err(IndexError::DirectoryNotFound {
                    path: dir.to_path_buf(),
                    source: e.into_io_error().unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk failed")),
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            tracing::debug!(path = %entry.path().display(), "skipping non-file entry");
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if is_article(name, extension, backup_suffix) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Extension match is exact, so `a.html` and `a.HTML` never share a fileId.
pub fn is_article(name: &str, extension: &str, backup_suffix: &str) -> bool {
    if !backup_suffix.is_empty() && name.ends_with(backup_suffix) {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e == extension)
}
