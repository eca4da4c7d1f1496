//! Executor for deleting scanned artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cleaner::detector::{classify, Artifact};
use crate::cleaner::scanner::{ScanMode, ScanResult};

/// Which artifacts of a scan result a clean operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only artifacts physically inside the current folder. For a shallow
    /// result this is everything it found; for a recursive result it is
    /// restricted to the folder itself and its direct children.
    CurrentOnly,
    /// Every artifact in the result, regardless of depth.
    WholeTree,
}

/// Outcome of one clean batch.
#[derive(Debug, Default)]
pub struct CleanOutcome {
    /// Sum of sizes of successfully deleted artifacts.
    pub bytes_freed: u64,
    /// Artifacts that were deleted.
    pub deleted: Vec<Artifact>,
    /// Per-artifact failures, with the reason. The batch always runs to
    /// completion; failures never abort it.
    pub failures: Vec<(PathBuf, String)>,
}

/// Delete the in-scope artifacts of `result`.
///
/// Deletion is irreversible (`fs::remove_dir_all`, no trash bin). Each
/// path is re-classified immediately before removal and skipped with a
/// recorded failure if it no longer matches what the scan saw.
pub fn clean(scope: Scope, result: &ScanResult, current: &Path) -> CleanOutcome {
    let mut outcome = CleanOutcome::default();

    for artifact in &result.artifacts {
        if !in_scope(scope, result.mode, artifact, current) {
            continue;
        }

        match classify(&artifact.path) {
            Some(kind) if kind == artifact.kind => {}
            _ => {
                outcome.failures.push((
                    artifact.path.clone(),
                    "changed or vanished since the scan".to_string(),
                ));
                continue;
            }
        }

        match fs::remove_dir_all(&artifact.path) {
            Ok(()) => {
                tracing::info!("Deleted {} ({})", artifact.path.display(), artifact.kind);
                outcome.bytes_freed += artifact.size;
                outcome.deleted.push(artifact.clone());
            }
            Err(err) => {
                tracing::warn!("Failed to delete {}: {}", artifact.path.display(), err);
                outcome.failures.push((artifact.path.clone(), err.to_string()));
            }
        }
    }

    outcome
}

fn in_scope(scope: Scope, mode: ScanMode, artifact: &Artifact, current: &Path) -> bool {
    match scope {
        Scope::WholeTree => true,
        Scope::CurrentOnly => match mode {
            ScanMode::Shallow => true,
            ScanMode::Recursive => {
                artifact.path == current || artifact.path.parent() == Some(current)
            }
        },
    }
}
