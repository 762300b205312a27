//! Path resolution utilities.

use std::path::{Path, PathBuf};

/// Maximum number of parent directories to walk when searching for a marker.
pub const MAX_WALK_LEVELS: usize = 10;

/// Walks up the directory tree from `start` looking for a directory containing `marker`.
///
/// Returns the directory containing the marker file/directory, or None if not found
/// within [`MAX_WALK_LEVELS`] iterations.
///
/// # Example
///
/// ```no_run
/// use promptshelf_core::util::paths::find_dir_with_marker;
///
/// // Find the site root by looking for the content directory
/// if let Some(root) = find_dir_with_marker(".", "content/prompts") {
///     println!("Site root: {:?}", root);
/// }
/// ```
pub fn find_dir_with_marker<P: AsRef<Path>>(start: P, marker: &str) -> Option<PathBuf> {
    let mut current = start.as_ref().to_path_buf();

    for _ in 0..MAX_WALK_LEVELS {
        if current.join(marker).exists() {
            return Some(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    None
}

/// Expands `~` to the user's home directory.
///
/// ```
/// use promptshelf_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/content");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    path.to_path_buf()
}
