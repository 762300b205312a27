//! Section extraction from prompt bodies.
//!
//! A prompt body is split on top-level headers (`# ` at the start of a
//! line). Header text is normalized by lowercasing and removing whitespace,
//! and two sections are recognized:
//!
//! - `prompt`
//! - `howtouse` / `howto`
//!
//! Any other section is dropped. When the same header appears more than
//! once the last occurrence wins. A non-empty `How to Use` section takes
//! precedence over a `HowTo` section wherever the two appear. Lines inside
//! fenced code blocks are never treated as headers.

use serde::Serialize;

/// The two recognized sections of a prompt body. Missing sections are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PromptSections {
    /// Body of the `# Prompt` section.
    pub prompt: String,
    /// Body of the `# How to Use` section.
    pub how_to: String,
}

impl PromptSections {
    /// Whether the how-to section should be rendered at all.
    pub fn has_how_to(&self) -> bool {
        !self.how_to.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Slot {
    Prompt,
    HowToUse,
    HowTo,
    Ignored,
}

fn slot_for(header: &str) -> Slot {
    match normalize_header(header).as_str() {
        "prompt" => Slot::Prompt,
        "howtouse" => Slot::HowToUse,
        "howto" => Slot::HowTo,
        _ => Slot::Ignored,
    }
}

#[derive(Default)]
struct Collected {
    prompt: String,
    how_to_use: String,
    how_to: String,
}

/// Lowercase `header` and strip all whitespace.
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn flush(current: Option<(Slot, Vec<&str>)>, collected: &mut Collected) {
    if let Some((slot, lines)) = current {
        let text = lines.join("\n").trim().to_string();
        match slot {
            Slot::Prompt => collected.prompt = text,
            Slot::HowToUse => collected.how_to_use = text,
            Slot::HowTo => collected.how_to = text,
            Slot::Ignored => {}
        }
    }
}

/// Parse a prompt body into its sections.
///
/// Text before the first header belongs to no section and is dropped.
pub fn parse_sections(body: &str) -> PromptSections {
    let mut collected = Collected::default();
    let mut current: Option<(Slot, Vec<&str>)> = None;
    let mut in_fence = false;

    for line in body.lines() {
        if is_fence(line) {
            in_fence = !in_fence;
        } else if !in_fence && let Some(header) = line.strip_prefix("# ") {
            flush(current.take(), &mut collected);
            current = Some((slot_for(header), Vec::new()));
            continue;
        }

        if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    flush(current, &mut collected);

    let how_to = if collected.how_to_use.is_empty() {
        collected.how_to
    } else {
        collected.how_to_use
    };
    PromptSections {
        prompt: collected.prompt,
        how_to,
    }
}

/// Shorten `text` to at most `max_chars` characters, appending `...` when
/// anything was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_sections() {
        let body = "# Prompt\nDraw connectors between frames.\n\n# How to Use\n1. Select frames\n2. Run";
        let sections = parse_sections(body);
        assert_eq!(sections.prompt, "Draw connectors between frames.");
        assert_eq!(sections.how_to, "1. Select frames\n2. Run");
        assert!(sections.has_how_to());
    }

    #[test]
    fn test_missing_how_to_keeps_prompt_unchanged() {
        let body = "# Prompt\nLine one\n\n## Details\nLine two";
        let sections = parse_sections(body);
        assert_eq!(sections.prompt, "Line one\n\n## Details\nLine two");
        assert_eq!(sections.how_to, "");
        assert!(!sections.has_how_to());
    }

    #[test]
    fn test_header_normalization() {
        let body = "# PROMPT\nA\n# how  to   USE\nB";
        let sections = parse_sections(body);
        assert_eq!(sections.prompt, "A");
        assert_eq!(sections.how_to, "B");

        let sections = parse_sections("# HowTo\nC");
        assert_eq!(sections.how_to, "C");
    }

    #[test]
    fn test_unrecognized_headers_dropped() {
        let body = "preamble\n# Notes\nignored\n# Prompt\nkept\n# Changelog\nalso ignored";
        let sections = parse_sections(body);
        assert_eq!(sections.prompt, "kept");
        assert_eq!(sections.how_to, "");
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let body = "# Prompt\nfirst\n# How to Use\nsteps\n# Prompt\nsecond";
        let sections = parse_sections(body);
        assert_eq!(sections.prompt, "second");
        assert_eq!(sections.how_to, "steps");

        let sections = parse_sections("# How to use\nold\n# How to use\nnew");
        assert_eq!(sections.how_to, "new");
    }

    #[test]
    fn test_how_to_use_preferred_over_howto() {
        let sections = parse_sections("# How to use\nlong form\n# Howto\nshort form");
        assert_eq!(sections.how_to, "long form");

        let sections = parse_sections("# HowTo\nshort form\n# How to Use\nlong form");
        assert_eq!(sections.how_to, "long form");

        let sections = parse_sections("# How to Use\n\n# HowTo\nshort form");
        assert_eq!(sections.how_to, "short form");
    }

    #[test]
    fn test_fenced_code_not_split() {
        let body = "# Prompt\n```bash\n# not a header\necho hi\n```\n# How to Use\nrun it";
        let sections = parse_sections(body);
        assert_eq!(sections.prompt, "```bash\n# not a header\necho hi\n```");
        assert_eq!(sections.how_to, "run it");
    }

    #[test]
    fn test_subheaders_and_hash_without_space_stay_in_section() {
        let body = "# Prompt\n#hashtag\n## Step";
        assert_eq!(parse_sections(body).prompt, "#hashtag\n## Step");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(parse_sections(""), PromptSections::default());
        assert_eq!(parse_sections("no headers at all"), PromptSections::default());
    }

    #[test]
    fn test_crlf_body() {
        let sections = parse_sections("# Prompt\r\nA\r\n# How to Use\r\nB\r\n");
        assert_eq!(sections.prompt, "A");
        assert_eq!(sections.how_to, "B");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 150), "short");
        let long = "a".repeat(200);
        let p = preview(&long, 150);
        assert_eq!(p.len(), 153);
        assert!(p.ends_with("..."));
        assert_eq!(preview("한국어 텍스트", 3), "한국어...");
    }
}
