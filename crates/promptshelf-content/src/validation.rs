//! Schema validation at the load boundary.
//!
//! Raw records are turned into [`PromptEntry`] values here or rejected.
//! Rejections are errors. Recoverable oddities are warnings: a defaulted
//! category or language, blank or repeated tags, a tag containing `,`, a
//! slug that does not match its title.

use promptshelf_core::slugify;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::{Category, Language, PromptEntry};
use crate::store::RawPrompt;

// ============================================================================
// Types
// ============================================================================

/// A problem found while validating one record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue code, e.g. `unknown_category`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Slug of the affected record.
    pub slug: String,
    /// Origin of the affected record (file path for file stores).
    pub origin: String,
}

impl ValidationIssue {
    fn new(raw: &RawPrompt, code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            slug: raw.slug.clone(),
            origin: raw.origin.clone(),
        }
    }
}

/// Result of validating a whole collection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Accepted entries, in store order.
    pub entries: Vec<PromptEntry>,
    /// Rejected records.
    pub errors: Vec<ValidationIssue>,
    /// Accepted records with recoverable problems.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when no record was rejected.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total issue count (errors + warnings).
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate one raw record into an entry, collecting warnings.
fn check_record(
    raw: &RawPrompt,
    warnings: &mut Vec<ValidationIssue>,
) -> Result<PromptEntry, ValidationIssue> {
    let fields = raw
        .fields
        .as_ref()
        .map_err(|defect| ValidationIssue::new(raw, defect.code(), defect.message()))?;

    let title = fields
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ValidationIssue::new(raw, "missing_title", "title is required"))?;

    let category = match fields.category.as_deref().map(str::trim) {
        None | Some("") => {
            warnings.push(ValidationIssue::new(
                raw,
                "default_category",
                "category missing, defaulting to vibe-design",
            ));
            Category::default()
        }
        Some(value) => value.parse::<Category>().map_err(|_| {
            ValidationIssue::new(
                raw,
                "unknown_category",
                format!("category '{value}' is not one of the supported categories"),
            )
        })?,
    };

    let language = match fields.language.as_deref().map(str::trim) {
        None | Some("") => {
            warnings.push(ValidationIssue::new(
                raw,
                "default_language",
                "language missing, defaulting to English",
            ));
            Language::default()
        }
        Some(value) => value.parse::<Language>().map_err(|_| {
            ValidationIssue::new(
                raw,
                "unknown_language",
                format!("language '{value}' is not one of the supported languages"),
            )
        })?,
    };

    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for tag in fields.tags.iter().flatten() {
        let tag = tag.trim();
        if tag.is_empty() {
            warnings.push(ValidationIssue::new(raw, "empty_tag", "blank tag dropped"));
        } else if !seen.insert(tag.to_string()) {
            warnings.push(ValidationIssue::new(
                raw,
                "duplicate_tag",
                format!("tag '{tag}' listed more than once"),
            ));
        } else {
            if tag.contains(',') {
                warnings.push(ValidationIssue::new(
                    raw,
                    "comma_in_tag",
                    format!("tag '{tag}' contains ',' and splits in filter links"),
                ));
            }
            tags.push(tag.to_string());
        }
    }

    if slugify(title) != raw.slug {
        warnings.push(ValidationIssue::new(
            raw,
            "slug_title_mismatch",
            format!("slug does not match title '{title}'"),
        ));
    }

    Ok(PromptEntry {
        slug: raw.slug.clone(),
        title: title.to_string(),
        category,
        language,
        tags,
        content: raw.body.clone(),
    })
}

/// Validate a single raw record.
pub fn validate_record(raw: &RawPrompt) -> Result<PromptEntry, ValidationIssue> {
    check_record(raw, &mut Vec::new())
}

/// Validate a collection, rejecting malformed records and duplicate slugs.
///
/// When two records share a slug the first one is kept.
pub fn validate_records(raws: &[RawPrompt]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut slugs = HashSet::new();

    for raw in raws {
        if slugs.contains(raw.slug.as_str()) {
            report.errors.push(ValidationIssue::new(
                raw,
                "duplicate_slug",
                format!("slug '{}' is already used by another entry", raw.slug),
            ));
            continue;
        }

        match check_record(raw, &mut report.warnings) {
            Ok(entry) => {
                slugs.insert(entry.slug.clone());
                report.entries.push(entry);
            }
            Err(issue) => report.errors.push(issue),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{RawDefect, RawFields};

    fn raw(slug: &str, fields: RawFields) -> RawPrompt {
        RawPrompt {
            slug: slug.to_string(),
            origin: format!("{slug}.mdx"),
            fields: Ok(fields),
            body: "# Prompt\nDo it.".to_string(),
        }
    }

    fn fields(title: &str, category: &str, language: Option<&str>) -> RawFields {
        RawFields {
            title: Some(title.to_string()),
            category: Some(category.to_string()),
            language: language.map(ToString::to_string),
            tags: Some(vec!["table".to_string()]),
        }
    }

    #[test]
    fn test_valid_record() {
        let entry = validate_record(&raw(
            "fill-table",
            fields("Fill Table", "auto-populate", Some("English")),
        ))
        .unwrap();
        assert_eq!(entry.category, Category::AutoPopulate);
        assert_eq!(entry.language, Language::English);
        assert_eq!(entry.tags, vec!["table"]);
        assert_eq!(entry.content, "# Prompt\nDo it.");
    }

    #[test]
    fn test_unknown_category_rejected() {
        let issue = validate_record(&raw("x", fields("X", "layout", Some("English")))).unwrap_err();
        assert_eq!(issue.code, "unknown_category");
        assert_eq!(issue.slug, "x");
    }

    #[test]
    fn test_unknown_language_rejected() {
        let issue =
            validate_record(&raw("x", fields("X", "annotation", Some("Deutsch")))).unwrap_err();
        assert_eq!(issue.code, "unknown_language");
    }

    #[test]
    fn test_missing_title_rejected() {
        let mut f = fields("X", "annotation", None);
        f.title = Some("   ".into());
        assert_eq!(validate_record(&raw("x", f)).unwrap_err().code, "missing_title");
    }

    #[test]
    fn test_malformed_frontmatter_rejected() {
        let mut r = raw("x", RawFields::default());
        r.fields = Err(RawDefect::Frontmatter("invalid frontmatter".into()));
        assert_eq!(
            validate_record(&r).unwrap_err().code,
            "malformed_frontmatter"
        );
    }

    #[test]
    fn test_unreadable_record_rejected_alone() {
        let mut broken = raw("broken", RawFields::default());
        broken.fields = Err(RawDefect::Unreadable("stream did not contain valid UTF-8".into()));
        let report = validate_records(&[
            broken,
            raw("fill-table", fields("Fill Table", "auto-populate", Some("English"))),
        ]);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].slug, "fill-table");
        assert_eq!(report.errors[0].code, "unreadable_file");
        assert_eq!(report.errors[0].slug, "broken");
    }

    #[test]
    fn test_missing_category_defaults_with_warning() {
        let f = RawFields {
            title: Some("Nocat".into()),
            ..Default::default()
        };
        let report = validate_records(&[raw("nocat", f)]);
        assert!(report.is_valid());
        assert_eq!(report.entries[0].category, Category::VibeDesign);
        assert_eq!(report.entries[0].language, Language::English);
        let codes: Vec<_> = report.warnings.iter().map(|w| w.code.as_str()).collect();
        assert!(codes.contains(&"default_category"));
        assert!(codes.contains(&"default_language"));
    }

    #[test]
    fn test_comma_in_tag_is_warning() {
        let mut f = fields("X", "annotation", Some("English"));
        f.tags = Some(vec!["a,b".into()]);
        let report = validate_records(&[raw("x", f)]);
        assert_eq!(report.entries[0].tags, vec!["a,b"]);
        assert!(report.warnings.iter().any(|w| w.code == "comma_in_tag"));
    }

    #[test]
    fn test_missing_language_defaults_with_warning() {
        let report = validate_records(&[raw("x", fields("X", "annotation", None))]);
        assert!(report.is_valid());
        assert_eq!(report.entries[0].language, Language::English);
        assert!(report.warnings.iter().any(|w| w.code == "default_language"));
    }

    #[test]
    fn test_tags_cleaned() {
        let mut f = fields("X", "annotation", Some("English"));
        f.tags = Some(vec![" a ".into(), "".into(), "a".into(), "b".into()]);
        let report = validate_records(&[raw("x", f)]);
        assert_eq!(report.entries[0].tags, vec!["a", "b"]);
        let codes: Vec<_> = report.warnings.iter().map(|w| w.code.as_str()).collect();
        assert!(codes.contains(&"empty_tag"));
        assert!(codes.contains(&"duplicate_tag"));
    }

    #[test]
    fn test_duplicate_slug_first_kept() {
        let report = validate_records(&[
            raw("x", fields("X", "annotation", Some("English"))),
            raw("x", fields("X", "connectors", Some("English"))),
        ]);
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].category, Category::Annotation);
        assert_eq!(report.errors[0].code, "duplicate_slug");
        assert!(!report.is_valid());
    }

    #[test]
    fn test_slug_title_mismatch_is_warning() {
        let report = validate_records(&[raw(
            "renamed",
            fields("Original Title", "annotation", Some("English")),
        )]);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].code, "slug_title_mismatch");
        assert_eq!(report.total_issues(), 1);
    }
}
