//! Slug helpers.
//!
//! Slugs are the stable identifiers of content entries: derived from the
//! entry title and used as file stems and URL segments.

use std::path::Path;

/// Derive a slug from a display title.
///
/// Lowercases, keeps alphanumeric characters (including non-Latin scripts),
/// and collapses every other run of characters into a single `-`.
///
/// ```
/// use promptshelf_core::slugify;
///
/// assert_eq!(slugify("Auto Populate: Tables!"), "auto-populate-tables");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Extract an entry ID (the file stem) from a path.
///
/// `index.*` files take the name of their parent directory, matching the
/// `{slug}/index.mdx` layout.
pub fn id_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem == "index" {
        return path
            .parent()?
            .file_name()?
            .to_str()
            .map(ToString::to_string);
    }
    Some(stem.to_string())
}
