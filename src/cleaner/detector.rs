//! Classification of cleanable dependency artifacts.

use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of cleanable artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A Python virtual environment.
    PythonVenv,
    /// A JavaScript `node_modules` folder.
    NodeModules,
}

impl ArtifactKind {
    /// Stable identifier used in output.
    pub fn id(&self) -> &'static str {
        match self {
            ArtifactKind::PythonVenv => "python-venv",
            ArtifactKind::NodeModules => "node-modules",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A classified cleanable directory.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Absolute path of the directory.
    pub path: PathBuf,
    /// What kind of artifact it is.
    pub kind: ArtifactKind,
    /// On-disk size in bytes, measured at scan time.
    pub size: u64,
}

/// Marker files that identify a Python virtual environment.
/// Any one of them is sufficient.
const VENV_MARKERS: &[&str] = &["pyvenv.cfg", "bin/activate", "Scripts/activate.bat"];

/// Classify a directory as a cleanable artifact, or `None`.
///
/// Probe failures (e.g. permission denied) behave as "not present", so a
/// single unreadable entry never aborts a scan.
pub fn classify(path: &Path) -> Option<ArtifactKind> {
    if !path.is_dir() {
        return None;
    }

    if VENV_MARKERS.iter().any(|m| path.join(m).exists()) {
        return Some(ArtifactKind::PythonVenv);
    }

    if path.file_name().is_some_and(|name| name == "node_modules") {
        return Some(ArtifactKind::NodeModules);
    }

    None
}
