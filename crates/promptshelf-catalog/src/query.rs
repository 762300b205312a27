//! Query-string codec for [`FilterState`].
//!
//! Keys are `category`, `language`, `tags` (comma-joined lists) and
//! `search` (raw text). Empty fields are omitted. The page index is never
//! written; the address encodes filters only.

use promptshelf_content::{Category, Language};
use url::form_urlencoded;

use crate::filter::FilterState;

/// Query key for selected categories.
pub const CATEGORY_KEY: &str = "category";
/// Query key for selected languages.
pub const LANGUAGE_KEY: &str = "language";
/// Query key for selected tags.
pub const TAGS_KEY: &str = "tags";
/// Query key for the search text.
pub const SEARCH_KEY: &str = "search";

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').filter(|part| !part.is_empty())
}

/// Build a [`FilterState`] from a query string (with or without a leading
/// `?`). Unknown keys and unrecognized category or language values are
/// ignored. The result is on page 1.
pub fn parse(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut categories = Vec::new();
    let mut languages = Vec::new();
    let mut tags = Vec::new();
    let mut search = String::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            CATEGORY_KEY => {
                for part in split_list(&value) {
                    match part.parse::<Category>() {
                        Ok(category) => categories.push(category),
                        Err(_) => log::debug!("ignoring unknown category in query: {part}"),
                    }
                }
            }
            LANGUAGE_KEY => {
                for part in split_list(&value) {
                    match part.parse::<Language>() {
                        Ok(language) => languages.push(language),
                        Err(_) => log::debug!("ignoring unknown language in query: {part}"),
                    }
                }
            }
            TAGS_KEY => tags.extend(split_list(&value).map(str::to_string)),
            SEARCH_KEY => search = value.into_owned(),
            _ => {}
        }
    }

    FilterState::from_parts(categories, languages, tags, search)
}

/// Encode the filter fields of `state` as a query string (no leading `?`).
///
/// Returns an empty string for an unrestricted state. Tags are joined with
/// `,` before encoding, so a tag that itself contains `,` parses back as two tags.
pub fn serialize(state: &FilterState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if !state.categories().is_empty() {
        let joined: Vec<&str> = state.categories().iter().map(Category::as_str).collect();
        out.append_pair(CATEGORY_KEY, &joined.join(","));
    }
    if !state.languages().is_empty() {
        let joined: Vec<&str> = state.languages().iter().map(Language::as_str).collect();
        out.append_pair(LANGUAGE_KEY, &joined.join(","));
    }
    if !state.tags().is_empty() {
        out.append_pair(TAGS_KEY, &state.tags().join(","));
    }
    if !state.search().is_empty() {
        out.append_pair(SEARCH_KEY, state.search());
    }

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(""), FilterState::new());
        assert_eq!(parse("?"), FilterState::new());
    }

    #[test]
    fn test_parse_lists_and_search() {
        let state = parse("?category=annotation,connectors&tags=table,,flow&search=Design%20Auto");
        assert_eq!(state.categories(), [Category::Annotation, Category::Connectors]);
        assert_eq!(state.tags(), ["table", "flow"]);
        assert_eq!(state.search(), "Design Auto");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_parse_encoded_language() {
        let state = parse("language=%ED%95%9C%EA%B5%AD%EC%96%B4%2CEnglish");
        assert_eq!(state.languages(), [Language::Korean, Language::English]);
    }

    #[test]
    fn test_parse_ignores_unknown_values_and_keys() {
        let state = parse("category=layout,overrides&language=Klingon&page=4&foo=bar");
        assert_eq!(state.categories(), [Category::Overrides]);
        assert!(state.languages().is_empty());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serialize(&FilterState::new()), "");
    }

    #[test]
    fn test_serialize_omits_empty_fields_and_page() {
        let state = FilterState::new().with_tag("table", true).with_page(3);
        assert_eq!(serialize(&state), "tags=table");
    }

    #[test]
    fn test_serialize_key_order_and_encoding() {
        let state = FilterState::new()
            .with_search("a b")
            .with_tag("x", true)
            .with_tag("y", true)
            .with_language(Language::English, true)
            .with_category(Category::VibeDesign, true);
        assert_eq!(
            serialize(&state),
            "category=vibe-design&language=English&tags=x%2Cy&search=a+b"
        );
    }

    #[test]
    fn test_round_trip_preserves_filters() {
        let state = FilterState::new()
            .with_category(Category::AutoPopulate, true)
            .with_language(Language::Chinese, true)
            .with_tag("data", true)
            .with_search("表格 & more");
        assert_eq!(parse(&serialize(&state)), state);
    }

    #[test]
    fn test_comma_in_tag_splits_on_parse() {
        let state = FilterState::new().with_tag("a,b", true);
        let parsed = parse(&serialize(&state));
        assert_eq!(parsed.tags().to_vec(), vec!["a".to_string(), "b".to_string()]);
    }
}
