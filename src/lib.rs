//! depsweep - interactive cleanup of dependency artifacts
//!
//! This crate provides functionality for:
//! - Detecting Python virtual environments and `node_modules` folders
//! - Measuring and reporting their disk usage
//! - An interactive session for navigating a tree and deleting them

pub mod cleaner;
pub mod cli;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use error::{Result, SweepError};
