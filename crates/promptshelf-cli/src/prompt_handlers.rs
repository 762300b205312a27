//! Handler functions for the catalog commands.
//!
//! These implement `list`, `show`, `tags`, `categories`, `validate`, and
//! `query`. Each handler has a pure `format_*`/`render_*` counterpart that
//! builds the output text, so the output can be tested without capturing
//! stdout.

use promptshelf_catalog::{Catalog, CatalogView, CategoryInfo, FilterState, query};
use promptshelf_content::{
    Category, ContentLoader, ContentStore, Language, PromptEntry, RenderedPrompt,
    ValidationReport,
};
use promptshelf_core::{Error, Result};
use std::fmt::Write as _;

// ============================================================================
// Option types
// ============================================================================

/// Options for `list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Comma-separated categories.
    pub category: Option<String>,
    /// Comma-separated languages.
    pub language: Option<String>,
    /// Comma-separated tags.
    pub tags: Option<String>,
    /// Search text.
    pub search: Option<String>,
    /// 1-based page.
    pub page: usize,
    /// Emit JSON instead of text.
    pub json: bool,
}

fn split_arg(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .into_iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

impl ListOptions {
    /// Build the filter state. Unknown categories or languages are errors
    /// here, unlike in query strings, since they are almost always typos.
    pub fn filter_state(&self) -> Result<FilterState> {
        let mut state = FilterState::new();
        for part in split_arg(self.category.as_deref()) {
            state = state.with_category(part.parse::<Category>()?, true);
        }
        for part in split_arg(self.language.as_deref()) {
            state = state.with_language(part.parse::<Language>()?, true);
        }
        for part in split_arg(self.tags.as_deref()) {
            state = state.with_tag(part, true);
        }
        if let Some(search) = &self.search {
            state = state.with_search(search.as_str());
        }
        Ok(state.with_page(self.page))
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Text listing of one catalog page.
pub fn format_view(view: &CatalogView<'_>) -> String {
    let mut out = String::new();
    for entry in &view.entries {
        let _ = write!(
            out,
            "{:<40} {} [{}, {}]",
            entry.slug, entry.title, entry.category, entry.language
        );
        if !entry.tags.is_empty() {
            let _ = write!(out, " #{}", entry.tags.join(" #"));
        }
        out.push('\n');
    }
    if view.entries.is_empty() {
        out.push_str("No prompts match the current filters.\n");
    }
    let _ = writeln!(
        out,
        "\nPage {} ({} {})",
        view.label,
        view.match_count,
        if view.match_count == 1 { "match" } else { "matches" }
    );
    if !view.query.is_empty() {
        let _ = writeln!(out, "Query: ?{}", view.query);
    }
    out
}

/// Plain-text rendering of one prompt.
pub fn format_entry(entry: &PromptEntry) -> String {
    let sections = entry.sections();
    let mut out = String::new();
    let _ = writeln!(out, "{}", entry.title);
    let _ = writeln!(out, "Category: {}", entry.category.title());
    let _ = writeln!(out, "Language: {}", entry.language);
    if !entry.tags.is_empty() {
        let _ = writeln!(out, "Tags:     {}", entry.tags.join(", "));
    }
    let _ = writeln!(out, "\n## Prompt\n\n{}", sections.prompt);
    if sections.has_how_to() {
        let _ = writeln!(out, "\n## How to Use\n\n{}", sections.how_to);
    }
    out
}

/// HTML fragments for one prompt.
pub fn render_entry_html(entry: &PromptEntry) -> String {
    let rendered = RenderedPrompt::from_sections(&entry.sections());
    let mut out = rendered.prompt_html;
    out.push('\n');
    if let Some(how_to) = rendered.how_to_html {
        out.push_str(&how_to);
    }
    out
}

/// One tag per line.
pub fn format_tags(tags: &[&str]) -> String {
    tags.iter().map(|t| format!("{t}\n")).collect()
}

/// One category per line with its count.
pub fn format_categories(categories: &[CategoryInfo]) -> String {
    let mut out = String::new();
    for info in categories {
        let _ = write!(out, "{:<16} {:<20} {:>4}", info.id, info.name, info.count);
        if let Some(description) = &info.description {
            let _ = write!(out, "  {description}");
        }
        out.push('\n');
    }
    out
}

/// Validation report listing.
pub fn format_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    for issue in &report.errors {
        let _ = writeln!(out, "ERROR   [{}] {} ({}): {}", issue.code, issue.slug, issue.origin, issue.message);
    }
    for issue in &report.warnings {
        let _ = writeln!(out, "WARNING [{}] {} ({}): {}", issue.code, issue.slug, issue.origin, issue.message);
    }
    let _ = writeln!(
        out,
        "{} valid, {} rejected, {} warnings",
        report.entries.len(),
        report.errors.len(),
        report.warnings.len()
    );
    out
}

/// Canonical form of a filter query string.
pub fn canonical_query(raw: &str) -> String {
    query::serialize(&query::parse(raw))
}

// ============================================================================
// Handlers
// ============================================================================

/// List one page of matching prompts.
pub async fn handle_list<S: ContentStore>(
    loader: &ContentLoader<S>,
    options: ListOptions,
) -> Result<()> {
    let state = options.filter_state()?;
    let catalog = Catalog::new(loader.load_all().await);
    let view = catalog.view(&state);

    if options.json {
        let json = serde_json::to_string_pretty(&view)
            .map_err(|e| Error::serialization(e.to_string()))?;
        println!("{json}");
    } else {
        print!("{}", format_view(&view));
    }
    Ok(())
}

/// Show one prompt, or fail with `NotFound`.
pub async fn handle_show<S: ContentStore>(
    loader: &ContentLoader<S>,
    slug: &str,
    html: bool,
) -> Result<()> {
    let entry = loader
        .load_one(slug)
        .await
        .ok_or_else(|| Error::not_found(format!("prompt '{slug}'")))?;

    if html {
        print!("{}", render_entry_html(&entry));
    } else {
        print!("{}", format_entry(&entry));
    }
    Ok(())
}

/// Print every tag.
pub async fn handle_tags<S: ContentStore>(loader: &ContentLoader<S>) -> Result<()> {
    let catalog = Catalog::new(loader.load_all().await);
    print!("{}", format_tags(&catalog.all_tags()));
    Ok(())
}

/// Print categories with counts.
pub async fn handle_categories<S: ContentStore>(loader: &ContentLoader<S>) -> Result<()> {
    let catalog = Catalog::new(loader.load_all().await);
    let metadata = loader.load_categories().await;
    print!("{}", format_categories(&catalog.category_counts(&metadata)));
    Ok(())
}

/// Validate the collection. Fails when any entry is rejected.
pub async fn handle_validate<S: ContentStore>(loader: &ContentLoader<S>) -> Result<()> {
    let report = loader.load_report().await?;
    print!("{}", format_report(&report));
    if report.is_valid() {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "{} prompt(s) failed validation",
            report.errors.len()
        )))
    }
}

/// Print the canonical form of a query string.
pub fn handle_query(raw: &str) {
    println!("?{}", canonical_query(raw));
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptshelf_content::{CategoryMeta, MemoryContentStore, RawPrompt};

    fn entry(slug: &str, title: &str, category: Category, tags: &[&str]) -> PromptEntry {
        PromptEntry {
            slug: slug.to_string(),
            title: title.to_string(),
            category,
            language: Language::English,
            tags: tags.iter().map(ToString::to_string).collect(),
            content: "# Prompt\nFill every cell.\n\n# How to Use\n1. Select a table".to_string(),
        }
    }

    fn loader() -> ContentLoader<MemoryContentStore> {
        ContentLoader::new(
            MemoryContentStore::from_entries(&[
                entry("fill-table", "Fill Table", Category::AutoPopulate, &["table"]),
                entry("add-notes", "Add Notes", Category::Annotation, &["notes", "table"]),
            ])
            .with_categories(vec![CategoryMeta {
                slug: "annotation".into(),
                name: "Annotation".into(),
                description: Some("Describe designs".into()),
                icon: None,
            }]),
        )
    }

    #[test]
    fn test_list_options_filter_state() {
        let options = ListOptions {
            category: Some("annotation, connectors".into()),
            language: Some("한국어".into()),
            tags: Some("a,,b".into()),
            search: Some("Fill".into()),
            page: 2,
            json: false,
        };
        let state = options.filter_state().unwrap();
        assert_eq!(state.categories(), [Category::Annotation, Category::Connectors]);
        assert_eq!(state.languages(), [Language::Korean]);
        assert_eq!(state.tags(), ["a", "b"]);
        assert_eq!(state.search(), "Fill");
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_list_options_unknown_category_is_error() {
        let options = ListOptions {
            category: Some("layout".into()),
            page: 1,
            ..Default::default()
        };
        assert!(options.filter_state().is_err());
    }

    #[tokio::test]
    async fn test_format_view() {
        let catalog = Catalog::new(loader().load_all().await);
        let view = catalog.view(&FilterState::new().with_tag("notes", true));
        let text = format_view(&view);
        assert!(text.contains("add-notes"));
        assert!(!text.contains("fill-table"));
        assert!(text.contains("Page 1 of 1 (1 match)"));
        assert!(text.contains("Query: ?tags=notes"));
    }

    #[test]
    fn test_format_view_empty() {
        let catalog = Catalog::default();
        let text = format_view(&catalog.view(&FilterState::new()));
        assert!(text.contains("No prompts match"));
        assert!(text.contains("Page 0 of 0"));
    }

    #[test]
    fn test_format_entry_sections() {
        let text = format_entry(&entry("x", "X", Category::Overrides, &["t"]));
        assert!(text.contains("Category: Overrides"));
        assert!(text.contains("## Prompt\n\nFill every cell."));
        assert!(text.contains("## How to Use"));
    }

    #[test]
    fn test_format_entry_without_how_to() {
        let mut e = entry("x", "X", Category::Overrides, &[]);
        e.content = "# Prompt\nOnly this.".into();
        let text = format_entry(&e);
        assert!(text.contains("Only this."));
        assert!(!text.contains("How to Use"));
        assert!(!text.contains("Tags:"));
    }

    #[test]
    fn test_render_entry_html() {
        let html = render_entry_html(&entry("x", "X", Category::Overrides, &[]));
        assert!(html.contains("<pre class=\"whitespace-pre-wrap\">Fill every cell.</pre>"));
        assert!(html.contains("<ol"));
    }

    #[tokio::test]
    async fn test_format_categories() {
        let loader = loader();
        let catalog = Catalog::new(loader.load_all().await);
        let text = format_categories(&catalog.category_counts(&loader.load_categories().await));
        assert!(text.contains("annotation"));
        assert!(text.contains("Describe designs"));
        assert_eq!(text.lines().count(), Category::ALL.len());
    }

    #[test]
    fn test_canonical_query() {
        assert_eq!(canonical_query("?tags=table,,flow&foo=1"), "tags=table%2Cflow");
        assert_eq!(canonical_query("category=nope"), "");
    }

    #[tokio::test]
    async fn test_handle_show_missing_is_not_found() {
        let err = handle_show(&loader(), "missing-slug", false).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(handle_show(&loader(), "fill-table", true).await.is_ok());
    }

    #[tokio::test]
    async fn test_handle_validate() {
        assert!(handle_validate(&loader()).await.is_ok());

        let bad = ContentLoader::new(MemoryContentStore::new(vec![RawPrompt::from_text(
            "bad",
            "bad.mdx",
            "---\ntitle: Bad\n---\n",
        )]));
        assert!(handle_validate(&bad).await.is_err());
    }

    #[tokio::test]
    async fn test_handle_list_and_tags() {
        let loader = loader();
        let options = ListOptions {
            page: 1,
            json: true,
            ..Default::default()
        };
        assert!(handle_list(&loader, options).await.is_ok());
        assert!(handle_tags(&loader).await.is_ok());
        assert!(handle_categories(&loader).await.is_ok());
    }
}
