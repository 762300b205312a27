//! Utility modules for file operations, path handling, and identifiers.
//!
//! # Modules
//!
//! - [`files`]: Async file discovery and reading utilities
//! - [`ids`]: Slug derivation helpers
//! - [`paths`]: Path resolution helpers (tilde expansion, marker search)

pub mod files;
pub mod ids;
pub mod paths;
