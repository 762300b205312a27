//! Filter state and the matching predicate.
//!
//! An entry matches when every dimension matches:
//!
//! - category: no categories selected, or the entry's category is selected
//! - language: no languages selected, or the entry's language is selected
//! - tags: no tags selected, or the entry has at least one selected tag
//! - search: empty query, or the lowercased query is a substring of the
//!   lowercased title or of any lowercased tag

use promptshelf_content::{Category, Language, PromptEntry};
use serde::{Deserialize, Serialize};

/// The user's current filter selection.
///
/// Selections keep insertion order (it is the order they serialize in) and
/// never hold duplicates. Every `with_*`/`clear_*` method returns a new
/// value with `current_page` reset to 1; [`FilterState::with_page`] is the
/// only way to move between pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selected_categories: Vec<Category>,
    selected_languages: Vec<Language>,
    selected_tags: Vec<String>,
    search_query: String,
    current_page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_categories: Vec::new(),
            selected_languages: Vec::new(),
            selected_tags: Vec::new(),
            search_query: String::new(),
            current_page: 1,
        }
    }
}

fn toggled<T: PartialEq + Clone>(items: &[T], item: T, checked: bool) -> Vec<T> {
    let mut out: Vec<T> = items.iter().filter(|i| **i != item).cloned().collect();
    if checked {
        out.push(item);
    }
    out
}

fn dedup<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

impl FilterState {
    /// A state with no restrictions, on page 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from explicit selections, on page 1.
    pub fn from_parts(
        categories: impl IntoIterator<Item = Category>,
        languages: impl IntoIterator<Item = Language>,
        tags: impl IntoIterator<Item = String>,
        search: impl Into<String>,
    ) -> Self {
        Self {
            selected_categories: dedup(categories),
            selected_languages: dedup(languages),
            selected_tags: dedup(tags.into_iter().filter(|t| !t.is_empty())),
            search_query: search.into(),
            current_page: 1,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Selected categories.
    pub fn categories(&self) -> &[Category] {
        &self.selected_categories
    }

    /// Selected languages.
    pub fn languages(&self) -> &[Language] {
        &self.selected_languages
    }

    /// Selected tags.
    pub fn tags(&self) -> &[String] {
        &self.selected_tags
    }

    /// Search query, as typed.
    pub fn search(&self) -> &str {
        &self.search_query
    }

    /// 1-based page index.
    pub fn page(&self) -> usize {
        self.current_page
    }

    /// True when no dimension restricts the result.
    pub fn is_unrestricted(&self) -> bool {
        self.selected_categories.is_empty()
            && self.selected_languages.is_empty()
            && self.selected_tags.is_empty()
            && self.search_query.is_empty()
    }

    // ------------------------------------------------------------------------
    // Mutations (all return a new value)
    // ------------------------------------------------------------------------

    /// Select or deselect a category.
    pub fn with_category(&self, category: Category, checked: bool) -> Self {
        Self {
            selected_categories: toggled(&self.selected_categories, category, checked),
            current_page: 1,
            ..self.clone()
        }
    }

    /// Select or deselect a language.
    pub fn with_language(&self, language: Language, checked: bool) -> Self {
        Self {
            selected_languages: toggled(&self.selected_languages, language, checked),
            current_page: 1,
            ..self.clone()
        }
    }

    /// Select or deselect a tag. Empty tags are ignored.
    pub fn with_tag(&self, tag: impl Into<String>, checked: bool) -> Self {
        let tag = tag.into();
        let selected_tags = if tag.is_empty() {
            self.selected_tags.clone()
        } else {
            toggled(&self.selected_tags, tag, checked)
        };
        Self {
            selected_tags,
            current_page: 1,
            ..self.clone()
        }
    }

    /// Replace the search query.
    pub fn with_search(&self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            current_page: 1,
            ..self.clone()
        }
    }

    /// Drop every category selection.
    pub fn clear_categories(&self) -> Self {
        Self {
            selected_categories: Vec::new(),
            current_page: 1,
            ..self.clone()
        }
    }

    /// Drop every language selection.
    pub fn clear_languages(&self) -> Self {
        Self {
            selected_languages: Vec::new(),
            current_page: 1,
            ..self.clone()
        }
    }

    /// Drop every tag selection.
    pub fn clear_tags(&self) -> Self {
        Self {
            selected_tags: Vec::new(),
            current_page: 1,
            ..self.clone()
        }
    }

    /// Move to `page` (1-based; 0 is treated as 1). Filters are untouched.
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            current_page: page.max(1),
            ..self.clone()
        }
    }

    // ------------------------------------------------------------------------
    // Matching
    // ------------------------------------------------------------------------

    /// Whether `entry` passes every filter dimension.
    pub fn matches(&self, entry: &PromptEntry) -> bool {
        self.matches_category(entry)
            && self.matches_language(entry)
            && self.matches_tags(entry)
            && self.matches_search(entry)
    }

    fn matches_category(&self, entry: &PromptEntry) -> bool {
        self.selected_categories.is_empty() || self.selected_categories.contains(&entry.category)
    }

    fn matches_language(&self, entry: &PromptEntry) -> bool {
        self.selected_languages.is_empty() || self.selected_languages.contains(&entry.language)
    }

    fn matches_tags(&self, entry: &PromptEntry) -> bool {
        self.selected_tags.is_empty() || self.selected_tags.iter().any(|t| entry.has_tag(t))
    }

    fn matches_search(&self, entry: &PromptEntry) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let needle = self.search_query.to_lowercase();
        entry.title.to_lowercase().contains(&needle)
            || entry.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Entries matching `state`, in list order.
pub fn filter_entries<'a>(entries: &'a [PromptEntry], state: &FilterState) -> Vec<&'a PromptEntry> {
    entries.iter().filter(|e| state.matches(e)).collect()
}
