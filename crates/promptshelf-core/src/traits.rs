//! Core traits for Promptshelf configuration abstraction.
//!
//! The primary trait is [`ConfigProvider`], which lets the content and
//! server layers resolve paths without depending on a concrete config type.

use std::path::PathBuf;

use crate::Result;

/// Trait for application configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use promptshelf_core::traits::ConfigProvider;
/// use promptshelf_core::Result;
///
/// #[derive(Clone)]
/// struct SiteConfig {
///     data_dir: PathBuf,
/// }
///
/// impl ConfigProvider for SiteConfig {
///     fn project_name(&self) -> &str {
///         "promptshelf"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.clone())
///     }
///
///     fn content_path(&self, content_type: &str) -> Result<PathBuf> {
///         Ok(self.data_dir.join("content").join(content_type))
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path for a specific content collection.
    ///
    /// `content_type` is a collection key such as `"prompts"` or
    /// `"categories"`.
    fn content_path(&self, content_type: &str) -> Result<PathBuf>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig {
        base: PathBuf,
    }

    impl ConfigProvider for TestConfig {
        fn project_name(&self) -> &str {
            "test-project"
        }

        fn base_path(&self) -> Result<PathBuf> {
            Ok(self.base.clone())
        }

        fn content_path(&self, content_type: &str) -> Result<PathBuf> {
            Ok(self.base.join("content").join(content_type))
        }
    }

    #[test]
    fn test_config_provider_paths() {
        let config = TestConfig {
            base: PathBuf::from("/site"),
        };
        assert_eq!(config.project_name(), "test-project");
        assert_eq!(config.base_path().unwrap(), PathBuf::from("/site"));
        assert_eq!(
            config.content_path("prompts").unwrap(),
            PathBuf::from("/site/content/prompts")
        );
    }

    #[test]
    fn test_config_provider_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TestConfig>();
    }
}
