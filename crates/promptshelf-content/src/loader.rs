//! Content loading with graceful degradation.
//!
//! [`ContentLoader`] is what pages and commands call. Its two primary
//! operations never fail outward:
//!
//! - [`ContentLoader::load_all`] returns an empty list when the store cannot
//!   be read, and logs the failure
//! - [`ContentLoader::load_one`] returns `None` for missing, rejected, or
//!   unreadable entries
//!
//! [`ContentLoader::load_report`] exposes the full validation outcome for
//! tooling that needs to see why entries were dropped.

use promptshelf_core::Result;

use crate::model::{CategoryMeta, PromptEntry};
use crate::store::ContentStore;
use crate::validation::{ValidationReport, validate_record, validate_records};

/// Loads validated prompt entries from a [`ContentStore`].
#[derive(Clone, Debug)]
pub struct ContentLoader<S: ContentStore> {
    store: S,
}

impl<S: ContentStore> ContentLoader<S> {
    /// Create a loader over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and validate the whole collection.
    ///
    /// # Errors
    ///
    /// Returns the store error when the collection cannot be read.
    pub async fn load_report(&self) -> Result<ValidationReport> {
        let raws = self.store.all().await?;
        Ok(validate_records(&raws))
    }

    /// Load every valid entry in store order.
    ///
    /// Rejected entries are logged and skipped. A store failure yields an
    /// empty list.
    pub async fn load_all(&self) -> Vec<PromptEntry> {
        match self.load_report().await {
            Ok(report) => {
                for issue in &report.errors {
                    log::warn!(
                        "skipping prompt '{}' ({}): [{}] {}",
                        issue.slug,
                        issue.origin,
                        issue.code,
                        issue.message
                    );
                }
                log::debug!("loaded {} prompts", report.entries.len());
                report.entries
            }
            Err(e) => {
                log::error!("error loading prompts: {e}");
                Vec::new()
            }
        }
    }

    /// Load a single entry by slug.
    ///
    /// Returns `None` when the slug does not resolve, the entry fails
    /// validation, or the store errors.
    pub async fn load_one(&self, slug: &str) -> Option<PromptEntry> {
        match self.store.read(slug).await {
            Ok(Some(raw)) => match validate_record(&raw) {
                Ok(entry) => Some(entry),
                Err(issue) => {
                    log::warn!(
                        "prompt '{slug}' failed validation: [{}] {}",
                        issue.code,
                        issue.message
                    );
                    None
                }
            },
            Ok(None) => {
                log::debug!("no prompt found for slug: {slug}");
                None
            }
            Err(e) => {
                log::error!("error loading prompt '{slug}': {e}");
                None
            }
        }
    }

    /// Load category metadata; empty on failure.
    pub async fn load_categories(&self) -> Vec<CategoryMeta> {
        self.store.categories().await.unwrap_or_else(|e| {
            log::warn!("error loading category metadata: {e}");
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Language};
    use crate::store::{FsContentStore, MemoryContentStore, RawPrompt};

    fn entry(slug: &str, category: Category) -> PromptEntry {
        PromptEntry {
            slug: slug.to_string(),
            title: slug.replace('-', " "),
            category,
            language: Language::English,
            tags: vec![],
            content: "# Prompt\nbody".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_all_in_store_order() {
        let entries = vec![
            entry("zeta", Category::Annotation),
            entry("alpha", Category::Connectors),
        ];
        let loader = ContentLoader::new(MemoryContentStore::from_entries(&entries));
        assert_eq!(loader.load_all().await, entries);
    }

    #[tokio::test]
    async fn test_load_all_store_failure_is_empty() {
        let loader = ContentLoader::new(MemoryContentStore::failing("unreachable"));
        assert!(loader.load_all().await.is_empty());
        assert!(loader.load_report().await.is_err());
    }

    #[tokio::test]
    async fn test_load_all_skips_invalid() {
        let mut raws: Vec<RawPrompt> = vec![RawPrompt::from(&entry("good", Category::Overrides))];
        raws.push(RawPrompt::from_text(
            "bad",
            "bad.mdx",
            "---\ntitle: Bad\ncategory: layout\n---\n# Prompt\nx",
        ));
        let loader = ContentLoader::new(MemoryContentStore::new(raws));

        let all = loader.load_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].slug, "good");

        let report = loader.load_report().await.unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "unknown_category");
    }

    #[tokio::test]
    async fn test_load_one_missing_slug_is_none() {
        let loader = ContentLoader::new(MemoryContentStore::from_entries(&[entry(
            "present",
            Category::Annotation,
        )]));
        assert!(loader.load_one("missing-slug").await.is_none());
        assert_eq!(
            loader.load_one("present").await.unwrap().category,
            Category::Annotation
        );
    }

    #[tokio::test]
    async fn test_load_one_store_failure_is_none() {
        let loader = ContentLoader::new(MemoryContentStore::failing("unreachable"));
        assert!(loader.load_one("anything").await.is_none());
        assert!(loader.load_categories().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_one_invalid_is_none() {
        let raw = RawPrompt::from_text(
            "bad",
            "bad.mdx",
            "---\ntitle: Bad\ncategory: annotation\nlanguage: Esperanto\n---\n",
        );
        let loader = ContentLoader::new(MemoryContentStore::new(vec![raw]));
        assert!(loader.load_one("bad").await.is_none());
    }

    #[tokio::test]
    async fn test_fs_loader_missing_directory_degrades() {
        let temp = tempfile::TempDir::new().unwrap();
        let loader = ContentLoader::new(FsContentStore::new(temp.path().join("nope")));
        assert!(loader.load_all().await.is_empty());
        assert!(loader.load_one("x").await.is_none());
    }

    #[tokio::test]
    async fn test_fs_loader_non_utf8_file_skipped() {
        let temp = tempfile::TempDir::new().unwrap();
        tokio::fs::write(
            temp.path().join("good.mdx"),
            "---\ntitle: Good\ncategory: annotation\n---\n# Prompt\nx\n",
        )
        .await
        .unwrap();
        tokio::fs::write(temp.path().join("broken.mdx"), [0xff_u8, 0xfe])
            .await
            .unwrap();

        let loader = ContentLoader::new(FsContentStore::new(temp.path()));
        let all = loader.load_all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].slug, "good");
        assert!(loader.load_one("broken").await.is_none());

        let report = loader.load_report().await.unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].code, "unreadable_file");
    }

    #[tokio::test]
    async fn test_fs_loader_list_and_detail_agree() {
        let temp = tempfile::TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        tokio::fs::write(
            nested.join("good.mdx"),
            "---\ntitle: Good\ncategory: annotation\n---\n# Prompt\nx\n",
        )
        .await
        .unwrap();
        tokio::fs::write(
            temp.path().join("dup.md"),
            "---\ntitle: Dup\ncategory: annotation\n---\n# Prompt\nmd\n",
        )
        .await
        .unwrap();
        tokio::fs::write(
            temp.path().join("dup.mdx"),
            "---\ntitle: Dup\ncategory: connectors\n---\n# Prompt\nmdx\n",
        )
        .await
        .unwrap();

        let loader = ContentLoader::new(FsContentStore::new(temp.path()));
        let all = loader.load_all().await;
        for listed in &all {
            assert_eq!(loader.load_one(&listed.slug).await.as_ref(), Some(listed));
        }
        let dup = all.iter().find(|e| e.slug == "dup").unwrap();
        assert_eq!(dup.category, Category::Annotation);
        assert!(all.iter().any(|e| e.slug == "good"));
    }

    #[tokio::test]
    async fn test_fs_loader_missing_category_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        tokio::fs::write(temp.path().join("nocat.mdx"), "---\ntitle: Nocat\n---\n")
            .await
            .unwrap();

        let loader = ContentLoader::new(FsContentStore::new(temp.path()));
        let entry = loader.load_one("nocat").await.unwrap();
        assert_eq!(entry.category, Category::VibeDesign);
        assert_eq!(entry.language, Language::English);
    }

    #[tokio::test]
    async fn test_fs_loader_without_how_to() {
        let temp = tempfile::TempDir::new().unwrap();
        tokio::fs::write(
            temp.path().join("plain.mdx"),
            "---\ntitle: Plain\ncategory: vibe-design\n---\n# Prompt\nMake it pop.\n",
        )
        .await
        .unwrap();

        let loader = ContentLoader::new(FsContentStore::new(temp.path()));
        let entry = loader.load_one("plain").await.unwrap();
        let sections = entry.sections();
        assert_eq!(sections.prompt, "Make it pop.");
        assert!(!sections.has_how_to());
        assert_eq!(entry.language, Language::English);
    }
}
