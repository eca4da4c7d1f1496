//! Directory size measurement and human-readable formatting.

use std::path::Path;
use walkdir::WalkDir;

/// Total size in bytes of all regular files under `path`.
///
/// Symlinks are not followed, so cyclic links cannot loop and linked
/// trees are not double-counted. Unreadable or vanished entries are
/// skipped; the result is a partial total rather than an error.
pub fn dir_size(path: &Path) -> u64 {
    let mut total = 0u64;

    for entry in WalkDir::new(path).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("Skipping entry under {}: {}", path.display(), err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => total = total.saturating_add(metadata.len()),
            Err(err) => {
                tracing::debug!("Skipping {}: {}", entry.path().display(), err);
            }
        }
    }

    total
}

/// Format a byte count as a human-readable string, one decimal place.
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.1} {}", size, UNITS[unit_idx])
}
