//! Shallow and recursive scans for cleanable artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::cleaner::detector::{classify, Artifact, ArtifactKind};
use crate::cleaner::size::dir_size;

/// Depth cap for recursive scans.
const MAX_SCAN_DEPTH: usize = 10;

/// How a scan traversed the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// The folder itself, its children, and artifacts directly inside
    /// ordinary (non-artifact) children.
    Shallow,
    /// The whole subtree, stopping descent at artifact boundaries.
    Recursive,
}

/// Artifacts found by one scan, with their aggregate size.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub mode: ScanMode,
    pub artifacts: Vec<Artifact>,
    pub total_bytes: u64,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Scan `root` for cleanable artifacts.
///
/// Read-only; unreadable directories are skipped with a warning and the
/// scan continues.
pub fn scan(root: &Path, mode: ScanMode) -> ScanResult {
    let artifacts = match mode {
        ScanMode::Shallow => shallow_artifacts(root),
        ScanMode::Recursive => recursive_artifacts(root),
    };
    let total_bytes = artifacts.iter().map(|a| a.size).sum();

    tracing::debug!(
        "Scanned {} ({:?}): {} artifact(s), {} bytes",
        root.display(),
        mode,
        artifacts.len(),
        total_bytes
    );

    ScanResult {
        mode,
        artifacts,
        total_bytes,
    }
}

/// Sorted immediate subdirectories of `root` that are not artifacts.
///
/// Artifact folders are cleanup targets, not navigation targets, so they
/// never appear in the numbered subdirectory list.
pub fn subdirs(root: &Path) -> Vec<PathBuf> {
    sorted_dirs(root)
        .into_iter()
        .filter(|p| classify(p).is_none())
        .collect()
}

fn shallow_artifacts(root: &Path) -> Vec<Artifact> {
    // The current folder itself may be an artifact; it is then a leaf and
    // nothing below it is inspected.
    if let Some(kind) = classify(root) {
        return vec![measure(root.to_path_buf(), kind)];
    }

    let mut artifacts = Vec::new();
    for child in sorted_dirs(root) {
        if let Some(kind) = classify(&child) {
            artifacts.push(measure(child, kind));
            continue;
        }
        // One level further: artifacts sitting directly inside ordinary
        // subfolders.
        for grandchild in sorted_dirs(&child) {
            if let Some(kind) = classify(&grandchild) {
                artifacts.push(measure(grandchild, kind));
            }
        }
    }
    artifacts
}

fn recursive_artifacts(root: &Path) -> Vec<Artifact> {
    let mut artifacts = Vec::new();
    let mut walker = WalkDir::new(root)
        .max_depth(MAX_SCAN_DEPTH)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        if let Some(kind) = classify(entry.path()) {
            artifacts.push(measure(entry.path().to_path_buf(), kind));
            // An artifact is a scan leaf: never look for more inside it.
            walker.skip_current_dir();
        }
    }

    artifacts
}

fn measure(path: PathBuf, kind: ArtifactKind) -> Artifact {
    let size = dir_size(&path);
    Artifact { path, kind, size }
}

fn sorted_dirs(path: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!("Cannot read {}: {}", path.display(), err);
            return Vec::new();
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("Skipping entry in {}: {}", path.display(), err);
                    return None;
                }
            };
            // file_type() does not follow symlinks, so a link to a
            // directory is not listed.
            let file_type = entry.file_type().ok()?;
            file_type.is_dir().then(|| entry.path())
        })
        .collect();

    dirs.sort();
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_venv(path: &Path) {
        fs::create_dir_all(path).unwrap();
        fs::write(path.join("pyvenv.cfg"), "").unwrap();
        fs::write(path.join("blob.bin"), "x".repeat(1000)).unwrap();
    }

    fn make_node_modules(path: &Path, bytes: usize) {
        fs::create_dir_all(path.join("lodash")).unwrap();
        fs::write(path.join("lodash/index.js"), "x".repeat(bytes)).unwrap();
    }

    #[test]
    fn test_shallow_finds_direct_children() {
        let tmp = TempDir::new().unwrap();
        make_venv(&tmp.path().join("venv"));
        make_node_modules(&tmp.path().join("node_modules"), 500);
        fs::create_dir(tmp.path().join("src")).unwrap();

        let result = scan(tmp.path(), ScanMode::Shallow);

        assert_eq!(result.artifacts.len(), 2);
        assert_eq!(result.total_bytes, 1500);
    }

    #[test]
    fn test_shallow_finds_artifacts_inside_ordinary_children() {
        let tmp = TempDir::new().unwrap();
        make_venv(&tmp.path().join("venv"));
        make_node_modules(&tmp.path().join("proj/node_modules"), 500);

        let result = scan(tmp.path(), ScanMode::Shallow);

        let paths: Vec<_> = result.artifacts.iter().map(|a| a.path.clone()).collect();
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&tmp.path().join("venv")));
        assert!(paths.contains(&tmp.path().join("proj/node_modules")));
    }

    #[test]
    fn test_shallow_stops_below_grandchildren() {
        let tmp = TempDir::new().unwrap();
        make_node_modules(&tmp.path().join("a/b/node_modules"), 500);

        let result = scan(tmp.path(), ScanMode::Shallow);
        assert!(result.is_empty());
    }

    #[test]
    fn test_shallow_classifies_the_root_itself() {
        let tmp = TempDir::new().unwrap();
        let nm = tmp.path().join("node_modules");
        make_node_modules(&nm, 300);

        let result = scan(&nm, ScanMode::Shallow);

        assert_eq!(result.artifacts.len(), 1);
        assert_eq!(result.artifacts[0].path, nm);
        assert_eq!(result.artifacts[0].kind, ArtifactKind::NodeModules);
    }

    #[test]
    fn test_recursive_finds_deep_artifacts() {
        let tmp = TempDir::new().unwrap();
        make_node_modules(&tmp.path().join("a/b/c/node_modules"), 700);
        make_venv(&tmp.path().join("x/venv"));

        let result = scan(tmp.path(), ScanMode::Recursive);

        assert_eq!(result.artifacts.len(), 2);
        assert_eq!(result.total_bytes, 1700);
    }

    #[test]
    fn test_recursive_treats_artifacts_as_leaves() {
        let tmp = TempDir::new().unwrap();
        let nm = tmp.path().join("proj/node_modules");
        make_node_modules(&nm, 100);
        // A venv nested inside node_modules must not be reported separately.
        make_venv(&nm.join("some-package/venv"));

        let result = scan(tmp.path(), ScanMode::Recursive);

        assert_eq!(result.artifacts.len(), 1);
        assert_eq!(result.artifacts[0].path, nm);
    }

    #[test]
    fn test_recursive_respects_depth_cap() {
        let tmp = TempDir::new().unwrap();
        let mut deep = tmp.path().to_path_buf();
        for _ in 0..MAX_SCAN_DEPTH + 2 {
            deep.push("d");
        }
        make_node_modules(&deep.join("node_modules"), 100);

        let result = scan(tmp.path(), ScanMode::Recursive);
        assert!(result.is_empty());
    }

    #[test]
    fn test_artifact_sizes_measured_per_artifact() {
        let tmp = TempDir::new().unwrap();
        make_node_modules(&tmp.path().join("node_modules"), 250);

        let result = scan(tmp.path(), ScanMode::Shallow);

        assert_eq!(result.artifacts.len(), 1);
        assert_eq!(result.artifacts[0].size, 250);
        assert_eq!(result.total_bytes, 250);
    }

    #[test]
    fn test_subdirs_sorted_and_excludes_artifacts() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("zeta")).unwrap();
        fs::create_dir(tmp.path().join("alpha")).unwrap();
        make_venv(&tmp.path().join("venv"));
        make_node_modules(&tmp.path().join("node_modules"), 10);
        fs::write(tmp.path().join("file.txt"), "not a dir").unwrap();

        let dirs = subdirs(tmp.path());

        assert_eq!(dirs.len(), 2);
        assert!(dirs[0].ends_with("alpha"));
        assert!(dirs[1].ends_with("zeta"));
    }

    #[test]
    fn test_subdirs_of_unreadable_path_is_empty() {
        assert!(subdirs(Path::new("/no/such/path")).is_empty());
    }

    #[test]
    fn test_scan_empty_directory() {
        let tmp = TempDir::new().unwrap();

        let shallow = scan(tmp.path(), ScanMode::Shallow);
        let recursive = scan(tmp.path(), ScanMode::Recursive);

        assert!(shallow.is_empty());
        assert!(recursive.is_empty());
        assert_eq!(shallow.total_bytes, 0);
    }
}
