//! Frontmatter extraction.
//!
//! Content files carry their structured fields as a YAML block delimited by
//! `---` lines at the very top of the file:
//!
//! ```text
//! ---
//! title: Fill Table With Sample Data
//! category: auto-populate
//! language: English
//! tags:
//!   - table
//! ---
//! # Prompt
//! ...
//! ```

use promptshelf_core::{Error, Result};
use serde::de::DeserializeOwned;

const DELIMITER: &str = "---";

/// A file split into its frontmatter and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    /// Raw YAML between the delimiters, if the file has a frontmatter block.
    pub frontmatter: Option<&'a str>,
    /// Everything after the closing delimiter.
    pub body: &'a str,
}

/// Split `text` into frontmatter and body.
///
/// A file that does not begin with `---` has no frontmatter and is returned
/// whole as the body. An opening delimiter without a closing one is an error.
pub fn extract(text: &str) -> Result<Document<'_>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = strip_delimiter_line(text) else {
        return Ok(Document {
            frontmatter: None,
            body: text,
        });
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            let frontmatter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok(Document {
                frontmatter: Some(frontmatter),
                body,
            });
        }
        offset += line.len();
    }

    Err(Error::parse("unterminated frontmatter block"))
}

fn strip_delimiter_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(DELIMITER)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

/// Deserialize a YAML frontmatter block into `T`.
///
/// An empty block deserializes from an empty mapping so that types whose
/// fields are all optional still load.
pub fn parse<T: DeserializeOwned>(yaml: &str) -> Result<T> {
    if yaml.trim().is_empty() {
        return serde_yaml::from_str("{}").map_err(|e| Error::parse(e.to_string()));
    }
    serde_yaml::from_str(yaml).map_err(|e| Error::parse(format!("invalid frontmatter: {e}")))
}
