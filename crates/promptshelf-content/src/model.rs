//! Typed prompt records.
//!
//! Category and language are closed enumerations; anything else is rejected
//! when a record is validated (see [`crate::validation`]).

use std::fmt;
use std::str::FromStr;

use promptshelf_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::sections::{PromptSections, parse_sections};

// ============================================================================
// Category
// ============================================================================

/// The fixed set of prompt categories.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Fill layers with generated content.
    AutoPopulate,
    /// Add annotations to designs.
    Annotation,
    /// Component override handling.
    Overrides,
    /// Connector/flow drawing.
    Connectors,
    /// Free-form generative design.
    #[default]
    VibeDesign,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::AutoPopulate,
        Category::Annotation,
        Category::Overrides,
        Category::Connectors,
        Category::VibeDesign,
    ];

    /// Wire value used in frontmatter and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AutoPopulate => "auto-populate",
            Category::Annotation => "annotation",
            Category::Overrides => "overrides",
            Category::Connectors => "connectors",
            Category::VibeDesign => "vibe-design",
        }
    }

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Category::AutoPopulate => "Auto Populate",
            Category::Annotation => "Annotation",
            Category::Overrides => "Overrides",
            Category::Connectors => "Connectors",
            Category::VibeDesign => "Vibe Design",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::invalid_data(format!("unknown category '{s}'")))
    }
}

// ============================================================================
// Language
// ============================================================================

/// The fixed set of prompt languages.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Language {
    /// English.
    #[default]
    #[serde(rename = "English")]
    English,
    /// Korean.
    #[serde(rename = "한국어")]
    Korean,
    /// Chinese.
    #[serde(rename = "中文")]
    Chinese,
}

impl Language {
    /// Every language, in display order.
    pub const ALL: [Language; 3] = [Language::English, Language::Korean, Language::Chinese];

    /// Wire value (the language's own name).
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Korean => "한국어",
            Language::Chinese => "中文",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| Error::invalid_data(format!("unknown language '{s}'")))
    }
}

// ============================================================================
// PromptEntry
// ============================================================================

/// A validated prompt record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEntry {
    /// Unique identifier, used as lookup key and URL segment.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Prompt category.
    pub category: Category,
    /// Prompt language.
    pub language: Language,
    /// Tags in display order.
    pub tags: Vec<String>,
    /// Raw markdown body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

impl PromptEntry {
    /// Split the body into its "Prompt" and "How to Use" sections.
    pub fn sections(&self) -> PromptSections {
        parse_sections(&self.content)
    }

    /// Whether the entry carries `tag` exactly.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Optional metadata for a category, from the store's category collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    /// Slug of the metadata file.
    #[serde(default)]
    pub slug: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Emoji icon.
    #[serde(default)]
    pub icon: Option<String>,
}
