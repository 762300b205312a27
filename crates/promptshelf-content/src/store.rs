//! Content store abstraction.
//!
//! The store is the external collaborator that holds prompt files. It hands
//! out *raw* records: fields exactly as written, not yet checked against the
//! category/language schema. Validation happens in [`crate::validation`].
//!
//! Two implementations ship with this crate:
//!
//! - [`FsContentStore`]: a directory of `*.md`/`*.mdx` files with YAML
//!   frontmatter, plus an optional directory of category metadata files
//! - [`MemoryContentStore`]: an in-memory store, used for tests and for
//!   embedding fixed collections

use async_trait::async_trait;
use promptshelf_core::traits::ConfigProvider;
use promptshelf_core::util::files::{self, FindOptions};
use promptshelf_core::{Error, Result, id_from_path};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::frontmatter;
use crate::model::{CategoryMeta, PromptEntry};

// ============================================================================
// Raw records
// ============================================================================

/// Frontmatter fields as written in a content file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawFields {
    /// Display title.
    pub title: Option<String>,
    /// Category wire value.
    pub category: Option<String>,
    /// Language wire value.
    pub language: Option<String>,
    /// Tags, possibly absent.
    pub tags: Option<Vec<String>>,
}

/// Why a raw record carries no usable fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawDefect {
    /// The file could not be read, e.g. an I/O error or invalid UTF-8.
    Unreadable(String),
    /// The frontmatter block is missing or is not valid YAML.
    Frontmatter(String),
}

impl RawDefect {
    /// Validation issue code for this defect.
    pub fn code(&self) -> &'static str {
        match self {
            RawDefect::Unreadable(_) => "unreadable_file",
            RawDefect::Frontmatter(_) => "malformed_frontmatter",
        }
    }

    /// Detail message.
    pub fn message(&self) -> &str {
        match self {
            RawDefect::Unreadable(msg) | RawDefect::Frontmatter(msg) => msg,
        }
    }
}

/// An unvalidated record read from a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPrompt {
    /// Store-assigned identifier.
    pub slug: String,
    /// Where the record came from (a path for file stores).
    pub origin: String,
    /// Parsed frontmatter, or the reason there is none.
    pub fields: std::result::Result<RawFields, RawDefect>,
    /// Markdown body after the frontmatter.
    pub body: String,
}

impl RawPrompt {
    /// Build a raw record from the full text of a content file.
    pub fn from_text(slug: impl Into<String>, origin: impl Into<String>, text: &str) -> Self {
        let (fields, body) = match frontmatter::extract(text) {
            Ok(doc) => {
                let fields = match doc.frontmatter {
                    Some(yaml) => frontmatter::parse::<RawFields>(yaml)
                        .map_err(|e| RawDefect::Frontmatter(e.to_string())),
                    None => Err(RawDefect::Frontmatter("missing frontmatter block".to_string())),
                };
                (fields, doc.body.to_string())
            }
            Err(e) => (Err(RawDefect::Frontmatter(e.to_string())), String::new()),
        };

        Self {
            slug: slug.into(),
            origin: origin.into(),
            fields,
            body,
        }
    }

    /// A record for a file that exists but could not be read.
    pub fn unreadable(
        slug: impl Into<String>,
        origin: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            origin: origin.into(),
            fields: Err(RawDefect::Unreadable(reason.into())),
            body: String::new(),
        }
    }
}

impl From<&PromptEntry> for RawPrompt {
    fn from(entry: &PromptEntry) -> Self {
        Self {
            slug: entry.slug.clone(),
            origin: "memory".to_string(),
            fields: Ok(RawFields {
                title: Some(entry.title.clone()),
                category: Some(entry.category.to_string()),
                language: Some(entry.language.to_string()),
                tags: Some(entry.tags.clone()),
            }),
            body: entry.content.clone(),
        }
    }
}

// ============================================================================
// ContentStore trait
// ============================================================================

/// Trait for reading prompt records from a backing store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Read every record, in the store's native order.
    async fn all(&self) -> Result<Vec<RawPrompt>>;

    /// Read a single record. `Ok(None)` means the slug does not exist.
    async fn read(&self, slug: &str) -> Result<Option<RawPrompt>>;

    /// Read optional category metadata.
    async fn categories(&self) -> Result<Vec<CategoryMeta>> {
        Ok(Vec::new())
    }
}

// ============================================================================
// FsContentStore
// ============================================================================

/// File-backed store: one markdown/MDX file per prompt.
///
/// Both [`ContentStore::all`] and [`ContentStore::read`] go through the same
/// discovery pass: every `*.md`/`*.mdx` file below the prompts directory, in
/// relative-path order, keyed by [`id_from_path`]. When two files share a
/// slug the first one in that order is the entry.
#[derive(Clone, Debug)]
pub struct FsContentStore {
    prompts_dir: PathBuf,
    categories_dir: Option<PathBuf>,
}

impl FsContentStore {
    /// Create a store reading prompts from `prompts_dir`.
    pub fn new(prompts_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompts_dir: prompts_dir.into(),
            categories_dir: None,
        }
    }

    /// Also read category metadata from `dir`.
    pub fn with_categories_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.categories_dir = Some(dir.into());
        self
    }

    /// Create a store from configuration (`prompts` and `categories`
    /// collections).
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(config.content_path("prompts")?)
            .with_categories_dir(config.content_path("categories")?))
    }

    /// Directory holding prompt files.
    pub fn prompts_dir(&self) -> &Path {
        &self.prompts_dir
    }

    async fn discover(&self) -> Result<Vec<(String, PathBuf)>> {
        let found = files::find_all_files(&self.prompts_dir, FindOptions::markdown()).await?;
        Ok(found
            .into_iter()
            .filter_map(|info| match id_from_path(&info.path) {
                Some(slug) => Some((slug, info.path)),
                None => {
                    log::warn!("ignoring prompt file without a stem: {}", info.path.display());
                    None
                }
            })
            .collect())
    }
}

async fn read_path(slug: String, path: &Path) -> RawPrompt {
    let origin = path.display().to_string();
    match files::read_file(path).await {
        Ok(text) => RawPrompt::from_text(slug, origin, &text),
        Err(e) => RawPrompt::unreadable(slug, origin, e.to_string()),
    }
}

/// Slugs are single path segments; anything else can never name an entry.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn all(&self) -> Result<Vec<RawPrompt>> {
        let found = self.discover().await?;
        let mut records = Vec::with_capacity(found.len());
        for (slug, path) in found {
            records.push(read_path(slug, &path).await);
        }
        Ok(records)
    }

    async fn read(&self, slug: &str) -> Result<Option<RawPrompt>> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }

        let found = match self.discover().await {
            Ok(found) => found,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => return Err(e),
        };
        match found.into_iter().find(|(id, _)| id == slug) {
            Some((id, path)) => Ok(Some(read_path(id, &path).await)),
            None => Ok(None),
        }
    }

    async fn categories(&self) -> Result<Vec<CategoryMeta>> {
        let Some(dir) = &self.categories_dir else {
            return Ok(Vec::new());
        };
        if !files::exists(dir).await {
            return Ok(Vec::new());
        }

        let mut metas = Vec::new();
        for info in files::find_all_files(dir, FindOptions::yaml()).await? {
            let text = files::read_file(&info.path).await?;
            let mut meta: CategoryMeta = frontmatter::parse(&text)
                .map_err(|e| Error::parse(format!("{}: {e}", info.path.display())))?;
            meta.slug = info.stem;
            metas.push(meta);
        }
        Ok(metas)
    }
}

// ============================================================================
// MemoryContentStore
// ============================================================================

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryContentStore {
    prompts: Vec<RawPrompt>,
    categories: Vec<CategoryMeta>,
    failure: Option<String>,
}

impl MemoryContentStore {
    /// Create a store holding `prompts`.
    pub fn new(prompts: Vec<RawPrompt>) -> Self {
        Self {
            prompts,
            ..Default::default()
        }
    }

    /// Create a store from already-validated entries.
    pub fn from_entries(entries: &[PromptEntry]) -> Self {
        Self::new(entries.iter().map(RawPrompt::from).collect())
    }

    /// Attach category metadata.
    pub fn with_categories(mut self, categories: Vec<CategoryMeta>) -> Self {
        self.categories = categories;
        self
    }

    /// A store whose every read fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(msg) => Err(Error::invalid_data(msg.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn all(&self) -> Result<Vec<RawPrompt>> {
        self.check()?;
        Ok(self.prompts.clone())
    }

    async fn read(&self, slug: &str) -> Result<Option<RawPrompt>> {
        self.check()?;
        Ok(self.prompts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn categories(&self) -> Result<Vec<CategoryMeta>> {
        self.check()?;
        Ok(self.categories.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FILL: &str = "---\ntitle: Fill Table\ncategory: auto-populate\nlanguage: English\ntags:\n  - table\n---\n# Prompt\nFill it.\n";

    async fn write(dir: &Path, name: &str, text: &str) {
        tokio::fs::write(dir.join(name), text).await.unwrap();
    }

    #[test]
    fn test_raw_from_text() {
        let raw = RawPrompt::from_text("fill-table", "mem", FILL);
        let fields = raw.fields.unwrap();
        assert_eq!(fields.title.as_deref(), Some("Fill Table"));
        assert_eq!(fields.category.as_deref(), Some("auto-populate"));
        assert_eq!(fields.tags, Some(vec!["table".to_string()]));
        assert_eq!(raw.body, "# Prompt\nFill it.\n");
    }

    #[test]
    fn test_raw_from_text_missing_frontmatter() {
        let raw = RawPrompt::from_text("x", "mem", "# Prompt\nno fields");
        let defect = raw.fields.unwrap_err();
        assert_eq!(defect.code(), "malformed_frontmatter");
        assert!(defect.message().contains("missing frontmatter"));
        assert_eq!(raw.body, "# Prompt\nno fields");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("fill-table"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug(".."));
        assert!(!is_valid_slug("../secret"));
        assert!(!is_valid_slug("a\\b"));
    }

    #[tokio::test]
    async fn test_fs_store_all_and_read() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "fill-table.mdx", FILL).await;
        write(temp.path(), "notes.txt", "ignored").await;

        let store = FsContentStore::new(temp.path());
        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].slug, "fill-table");

        let one = store.read("fill-table").await.unwrap().unwrap();
        assert_eq!(one.slug, "fill-table");
        assert!(store.read("missing-slug").await.unwrap().is_none());
        assert!(store.read("../fill-table").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_store_index_layout() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("connect-flows");
        tokio::fs::create_dir(&dir).await.unwrap();
        write(&dir, "index.mdx", FILL).await;

        let store = FsContentStore::new(temp.path());
        let raw = store.read("connect-flows").await.unwrap().unwrap();
        assert_eq!(raw.slug, "connect-flows");
    }

    #[tokio::test]
    async fn test_fs_store_unreadable_file_is_one_record() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "fill-table.mdx", FILL).await;
        tokio::fs::write(temp.path().join("broken.mdx"), [0xff_u8, 0xfe])
            .await
            .unwrap();

        let store = FsContentStore::new(temp.path());
        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        let broken = all.iter().find(|r| r.slug == "broken").unwrap();
        assert_eq!(broken.fields.as_ref().unwrap_err().code(), "unreadable_file");
        assert!(all.iter().any(|r| r.slug == "fill-table" && r.fields.is_ok()));

        let one = store.read("broken").await.unwrap().unwrap();
        assert!(matches!(one.fields, Err(RawDefect::Unreadable(_))));
    }

    #[tokio::test]
    async fn test_fs_store_read_finds_nested_listed_files() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("archive").join("2024");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        write(&nested, "fill-table.mdx", FILL).await;

        let store = FsContentStore::new(temp.path());
        let listed: Vec<_> = store.all().await.unwrap().into_iter().map(|r| r.slug).collect();
        assert_eq!(listed, vec!["fill-table"]);
        assert!(store.read("fill-table").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_fs_store_same_stem_resolves_like_listing() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "fill-table.md", FILL).await;
        write(
            temp.path(),
            "fill-table.mdx",
            &FILL.replace("auto-populate", "connectors"),
        )
        .await;

        let store = FsContentStore::new(temp.path());
        let all = store.all().await.unwrap();
        let one = store.read("fill-table").await.unwrap().unwrap();
        assert_eq!(one, all[0]);
        assert!(one.origin.ends_with("fill-table.md"));
    }

    #[tokio::test]
    async fn test_fs_store_read_missing_directory_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FsContentStore::new(temp.path().join("absent"));
        assert!(store.read("fill-table").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fs_store_missing_directory_is_error() {
        let temp = TempDir::new().unwrap();
        let store = FsContentStore::new(temp.path().join("absent"));
        assert!(store.all().await.is_err());
    }

    #[tokio::test]
    async fn test_fs_store_categories() {
        let temp = TempDir::new().unwrap();
        let cats = temp.path().join("categories");
        tokio::fs::create_dir(&cats).await.unwrap();
        write(
            &cats,
            "annotation.yaml",
            "name: Annotation\ndescription: Notes on designs\nicon: \"📝\"\n",
        )
        .await;

        let store = FsContentStore::new(temp.path().join("prompts")).with_categories_dir(&cats);
        let metas = store.categories().await.unwrap();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].slug, "annotation");
        assert_eq!(metas[0].name, "Annotation");
        assert_eq!(metas[0].icon.as_deref(), Some("📝"));

        let none = FsContentStore::new(temp.path()).with_categories_dir(temp.path().join("x"));
        assert!(none.categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_failing() {
        let store = MemoryContentStore::failing("offline");
        assert!(store.all().await.is_err());
        assert!(store.read("x").await.is_err());
    }
}
