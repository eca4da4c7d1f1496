//! Artifact detection, measurement, and cleanup.
//!
//! This module provides:
//! - Classification of Python venvs and `node_modules` folders
//! - Disk usage measurement of artifact directories
//! - Shallow and recursive scans of a directory tree
//! - Batch deletion with per-artifact failure tracking

mod detector;
mod executor;
mod scanner;
mod size;

pub use detector::{classify, Artifact, ArtifactKind};
pub use executor::{clean, CleanOutcome, Scope};
pub use scanner::{scan, subdirs, ScanMode, ScanResult};
pub use size::{dir_size, format_size};
