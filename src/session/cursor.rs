//! Cursor over a lazily-explored directory hierarchy.

use std::path::{Path, PathBuf};

use crate::cleaner::subdirs;
use crate::error::{Result, SweepError};

/// Tracks the current path plus the sibling context needed for
/// next/previous movement.
///
/// The parent chain is derived purely from the path, so moving above the
/// session's start directory is allowed; only the filesystem root has no
/// parent. Sibling lists are recomputed from the parent on every move so
/// that deletions elsewhere in the tree are reflected.
#[derive(Debug)]
pub struct Cursor {
    current: PathBuf,
    siblings: Vec<PathBuf>,
    index: Option<usize>,
}

impl Cursor {
    pub fn new(start: PathBuf) -> Self {
        let (siblings, index) = sibling_context(&start);
        Self {
            current: start,
            siblings,
            index,
        }
    }

    /// The path the cursor is on.
    pub fn path(&self) -> &Path {
        &self.current
    }

    /// Sorted non-artifact subdirectories of the current path, listed
    /// fresh on every call.
    pub fn children(&self) -> Vec<PathBuf> {
        subdirs(&self.current)
    }

    /// Move into the child at 1-indexed `index` within `children` (the
    /// list currently displayed to the user).
    pub fn enter(&mut self, index: usize, children: &[PathBuf]) -> Result<()> {
        if index == 0 || index > children.len() {
            return Err(SweepError::InvalidSelection {
                index,
                max: children.len(),
            });
        }
        self.siblings = children.to_vec();
        self.index = Some(index - 1);
        self.current = children[index - 1].clone();
        Ok(())
    }

    /// Move to the filesystem parent. Returns `false` (no state change)
    /// only at the filesystem root.
    pub fn up(&mut self) -> bool {
        match self.current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                self.current = parent.to_path_buf();
                let (siblings, index) = sibling_context(&self.current);
                self.siblings = siblings;
                self.index = index;
                true
            }
            _ => false,
        }
    }

    /// Move to the next sibling. No wraparound: returns `false` at the
    /// last sibling (or when there is no sibling context).
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Move to the previous sibling. No wraparound: returns `false` at
    /// the first sibling.
    pub fn previous(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        let (siblings, index) = sibling_context(&self.current);
        self.siblings = siblings;
        self.index = index;

        let Some(idx) = self.index else {
            return false;
        };
        let target = idx as isize + delta;
        if target < 0 || target as usize >= self.siblings.len() {
            return false;
        }

        let target = target as usize;
        self.index = Some(target);
        self.current = self.siblings[target].clone();
        true
    }
}

fn sibling_context(path: &Path) -> (Vec<PathBuf>, Option<usize>) {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return (Vec::new(), None);
    };
    let siblings = subdirs(parent);
    let index = siblings.iter().position(|s| s == path);
    (siblings, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_tree() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        fs::create_dir(root.join("alpha")).unwrap();
        fs::create_dir(root.join("beta")).unwrap();
        fs::create_dir(root.join("gamma")).unwrap();
        (tmp, root)
    }

    #[test]
    fn test_enter_and_up_round_trip() {
        let (_tmp, root) = setup_tree();
        let mut cursor = Cursor::new(root.clone());

        let children = cursor.children();
        cursor.enter(2, &children).unwrap();
        assert_eq!(cursor.path(), root.join("beta"));

        assert!(cursor.up());
        assert_eq!(cursor.path(), root);
    }

    #[test]
    fn test_enter_out_of_range() {
        let (_tmp, root) = setup_tree();
        let mut cursor = Cursor::new(root.clone());

        let children = cursor.children();
        let err = cursor.enter(4, &children).unwrap_err();
        assert!(matches!(
            err,
            SweepError::InvalidSelection { index: 4, max: 3 }
        ));
        assert_eq!(cursor.path(), root);

        assert!(cursor.enter(0, &children).is_err());
    }

    #[test]
    fn test_next_and_previous_without_wraparound() {
        let (_tmp, root) = setup_tree();
        let mut cursor = Cursor::new(root.clone());
        let children = cursor.children();
        cursor.enter(1, &children).unwrap();

        assert!(cursor.next());
        assert_eq!(cursor.path(), root.join("beta"));
        assert!(cursor.next());
        assert_eq!(cursor.path(), root.join("gamma"));

        // At the last sibling: no wrap.
        assert!(!cursor.next());
        assert_eq!(cursor.path(), root.join("gamma"));

        assert!(cursor.previous());
        assert!(cursor.previous());
        assert_eq!(cursor.path(), root.join("alpha"));

        // At the first sibling: no wrap.
        assert!(!cursor.previous());
        assert_eq!(cursor.path(), root.join("alpha"));
    }

    #[test]
    fn test_up_is_allowed_above_the_start_directory() {
        let (_tmp, root) = setup_tree();
        let start = root.join("alpha");
        let mut cursor = Cursor::new(start);

        assert!(cursor.up());
        assert_eq!(cursor.path(), root);

        // Keeps going: the parent chain is path-derived, not capped at
        // the start directory.
        assert!(cursor.up());
        assert_eq!(cursor.path(), root.parent().unwrap());
    }

    #[test]
    fn test_up_stops_at_filesystem_root() {
        let mut cursor = Cursor::new(PathBuf::from("/"));
        assert!(!cursor.up());
        assert_eq!(cursor.path(), Path::new("/"));
        // Repeated calls behave identically.
        assert!(!cursor.up());
    }

    #[test]
    fn test_siblings_recomputed_after_deletion() {
        let (_tmp, root) = setup_tree();
        let mut cursor = Cursor::new(root.clone());
        let children = cursor.children();
        cursor.enter(1, &children).unwrap();

        // beta disappears while the cursor sits on alpha.
        fs::remove_dir(root.join("beta")).unwrap();

        assert!(cursor.next());
        assert_eq!(cursor.path(), root.join("gamma"));
    }

    #[test]
    fn test_children_exclude_artifacts() {
        let (_tmp, root) = setup_tree();
        fs::create_dir(root.join("node_modules")).unwrap();

        let cursor = Cursor::new(root);
        let children = cursor.children();

        assert_eq!(children.len(), 3);
        assert!(children.iter().all(|c| !c.ends_with("node_modules")));
    }
}
