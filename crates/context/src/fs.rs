//! Lenient async file access: anything unreadable is treated as absent.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Read `path` as UTF-8, or `None` when it is missing or unreadable.
pub(crate) async fn read_optional(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping unreadable file");
            None
        }
    }
}

/// Markdown files directly inside `dir`, sorted, `index.md` excluded.
pub(crate) async fn list_markdown(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = list_entries(dir, false)
        .await
        .into_iter()
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .filter(|p| p.file_name().is_some_and(|name| name != "index.md"))
        .collect();
    files.sort();
    files
}

/// Subdirectories directly inside `dir`, sorted.
pub(crate) async fn list_subdirs(dir: &Path) -> Vec<PathBuf> {
    let mut dirs = list_entries(dir, true).await;
    dirs.sort();
    dirs
}

async fn list_entries(dir: &Path, want_dirs: bool) -> Vec<PathBuf> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = %dir.display(), error = %e, "Skipping unreadable directory");
            }
            return Vec::new();
        }
    };

    let mut paths = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let Ok(file_type) = entry.file_type().await else {
            continue;
        };
        if file_type.is_dir() == want_dirs {
            paths.push(entry.path());
        }
    }
    paths
}

/// File stem as a string, e.g. `jane-doe` for `people/internal/jane-doe.md`.
pub(crate) fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
