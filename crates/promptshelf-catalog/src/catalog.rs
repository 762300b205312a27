//! The loaded catalog: filtered page views and facet listings.

use promptshelf_content::{Category, CategoryMeta, Language, PromptEntry};
use promptshelf_core::{Error, Result};
use serde::Serialize;

use crate::filter::{FilterState, filter_entries};
use crate::pagination::Pagination;
use crate::query;

// ============================================================================
// Types
// ============================================================================

/// A category with its entry count and display metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    /// Category identifier (wire value).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of entries in this category.
    pub count: usize,
    /// Optional description.
    pub description: Option<String>,
    /// Optional icon name.
    pub icon: Option<String>,
}

/// A language with its entry count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    /// Language label.
    pub name: String,
    /// Number of entries in this language.
    pub count: usize,
}

/// One page of filtered results.
#[derive(Clone, Debug, Serialize)]
pub struct CatalogView<'a> {
    /// Canonical query string for the filters (no page).
    pub query: String,
    /// Number of entries matching the filters.
    pub match_count: usize,
    /// Total pages; zero when nothing matches.
    pub total_pages: usize,
    /// Page requested; may lie beyond `total_pages`.
    pub current_page: usize,
    /// Position label, e.g. `"1 of 3"`.
    pub label: String,
    /// Entries on this page, in list order.
    pub entries: Vec<&'a PromptEntry>,
}

/// An ordered, immutable list of validated entries.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<PromptEntry>,
}

// ============================================================================
// Catalog
// ============================================================================

impl Catalog {
    /// Wrap a loaded entry list. Order is preserved.
    pub fn new(entries: Vec<PromptEntry>) -> Self {
        Self { entries }
    }

    /// All entries.
    pub fn entries(&self) -> &[PromptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by slug.
    pub fn find(&self, slug: &str) -> Option<&PromptEntry> {
        self.entries.iter().find(|e| e.slug == slug)
    }

    /// Look up an entry by slug, failing with `NotFound`.
    pub fn get(&self, slug: &str) -> Result<&PromptEntry> {
        self.find(slug)
            .ok_or_else(|| Error::not_found(format!("prompt '{slug}'")))
    }

    /// Entries matching `state`, in list order.
    pub fn matching(&self, state: &FilterState) -> Vec<&PromptEntry> {
        filter_entries(&self.entries, state)
    }

    /// The page of matches selected by `state`.
    ///
    /// A page beyond the last one yields an empty slice.
    pub fn view(&self, state: &FilterState) -> CatalogView<'_> {
        let matches = self.matching(state);
        let pagination = Pagination::new(matches.len(), state.page());
        let range = pagination.range();

        log::debug!(
            "catalog view: {} of {} entries match, page {}",
            matches.len(),
            self.entries.len(),
            pagination.label()
        );

        CatalogView {
            query: query::serialize(state),
            match_count: matches.len(),
            total_pages: pagination.total_pages(),
            current_page: pagination.current_page,
            label: pagination.label(),
            entries: matches[range].to_vec(),
        }
    }

    /// Distinct tags in first-seen order.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.entries.iter().flat_map(|e| e.tags.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }

    /// Every supported category with its count, merged with `metadata`.
    ///
    /// Metadata is matched by slug; categories without metadata fall back to
    /// their built-in title.
    pub fn category_counts(&self, metadata: &[CategoryMeta]) -> Vec<CategoryInfo> {
        Category::ALL
            .iter()
            .map(|category| {
                let meta = metadata.iter().find(|m| m.slug == category.as_str());
                let name = meta
                    .map(|m| m.name.trim())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(category.title());
                CategoryInfo {
                    id: category.as_str().to_string(),
                    name: name.to_string(),
                    count: self.entries.iter().filter(|e| e.category == *category).count(),
                    description: meta.and_then(|m| m.description.clone()),
                    icon: meta.and_then(|m| m.icon.clone()),
                }
            })
            .collect()
    }

    /// Every supported language with its count.
    pub fn language_counts(&self) -> Vec<LanguageInfo> {
        Language::ALL
            .iter()
            .map(|language| LanguageInfo {
                name: language.as_str().to_string(),
                count: self.entries.iter().filter(|e| e.language == *language).count(),
            })
            .collect()
    }
}

impl From<Vec<PromptEntry>> for Catalog {
    fn from(entries: Vec<PromptEntry>) -> Self {
        Self::new(entries)
    }
}
