//! Promptshelf Core: shared types, traits, errors, and utilities.
//!
//! This crate provides the foundational types used across all Promptshelf
//! crates. It has no internal Promptshelf dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Core traits for configuration abstraction
//! - [`util`]: File, path, and ID utilities

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;

// Convenience re-exports from util
pub use util::ids::{id_from_path, slugify};
