//! Prompt records, frontmatter extraction, and content utilities.
//!
//! # Features
//!
//! - Typed [`PromptEntry`] records with enumerated [`Category`] and [`Language`]
//! - Frontmatter extraction from markdown/MDX files
//! - Section parsing ("Prompt" / "How to Use") and HTML rendering
//! - The [`ContentStore`] seam with a filesystem and an in-memory store
//! - [`ContentLoader`], which validates at the load boundary and degrades
//!   store failures to empty results

#![doc = include_str!("../README.md")]

pub mod frontmatter;
pub mod loader;
pub mod model;
pub mod render;
pub mod sections;
pub mod store;
pub mod validation;

pub use loader::ContentLoader;
pub use model::{Category, CategoryMeta, Language, PromptEntry};
pub use render::{RenderedPrompt, escape_html, render_markdown_html, render_prompt_html};
pub use sections::{PromptSections, parse_sections, preview};
pub use store::{
    ContentStore, FsContentStore, MemoryContentStore, RawDefect, RawFields, RawPrompt,
};
pub use validation::{ValidationIssue, ValidationReport, validate_record, validate_records};
