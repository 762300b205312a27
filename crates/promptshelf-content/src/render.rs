//! HTML rendering of prompt sections.
//!
//! The prompt text is shown verbatim (it is meant to be copied), so it is
//! escaped into a `<pre>` block. The how-to text is GitHub-flavored
//! markdown, rendered with a few element mappings:
//!
//! - links open in a new tab
//! - `ul`/`ol`/`li` carry list styling classes
//! - a paragraph holding only images becomes a `<div>`

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use serde::Serialize;

use crate::sections::PromptSections;

const UL_CLASS: &str = "list-disc list-inside space-y-2 my-4";
const OL_CLASS: &str = "list-decimal list-inside space-y-2 my-4";
const LI_CLASS: &str = "leading-relaxed";
const IMAGE_BLOCK_CLASS: &str = "my-4";

/// Both sections of a prompt, rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    /// The prompt block.
    pub prompt_html: String,
    /// The how-to block; `None` when the section is missing or empty.
    pub how_to_html: Option<String>,
}

impl RenderedPrompt {
    /// Render parsed sections.
    pub fn from_sections(sections: &PromptSections) -> Self {
        Self {
            prompt_html: render_prompt_html(&sections.prompt),
            how_to_html: sections
                .has_how_to()
                .then(|| render_markdown_html(&sections.how_to)),
        }
    }
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the prompt text as an escaped preformatted block.
pub fn render_prompt_html(prompt: &str) -> String {
    format!(
        "<pre class=\"whitespace-pre-wrap\">{}</pre>",
        escape_html(prompt)
    )
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Whether the paragraph starting at `events[start]` contains only images.
///
/// Returns the index of the matching paragraph end when it does.
fn image_only_paragraph(events: &[Event<'_>], start: usize) -> Option<usize> {
    let mut saw_image = false;
    let mut image_depth = 0usize;

    for (offset, event) in events[start + 1..].iter().enumerate() {
        match event {
            Event::End(TagEnd::Paragraph) if image_depth == 0 => {
                return saw_image.then_some(start + 1 + offset);
            }
            Event::Start(Tag::Image { .. }) => {
                saw_image = true;
                image_depth += 1;
            }
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            // alt text inside an image
            _ if image_depth > 0 => {}
            Event::SoftBreak | Event::HardBreak => {}
            Event::Text(text) if text.trim().is_empty() => {}
            _ => return None,
        }
    }
    None
}

fn map_events<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    let mut image_block_ends = Vec::new();
    let mut mapped = Vec::with_capacity(events.len());

    for (idx, event) in events.iter().enumerate() {
        let replacement = match event {
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => {
                let title_attr = if title.is_empty() {
                    String::new()
                } else {
                    format!(" title=\"{}\"", escape_html(title))
                };
                Event::Html(
                    format!(
                        "<a href=\"{}\"{} target=\"_blank\" rel=\"noopener noreferrer\">",
                        escape_html(dest_url),
                        title_attr
                    )
                    .into(),
                )
            }
            Event::End(TagEnd::Link) => Event::Html("</a>".into()),
            Event::Start(Tag::List(None)) => Event::Html(format!("<ul class=\"{UL_CLASS}\">\n").into()),
            Event::Start(Tag::List(Some(1))) => {
                Event::Html(format!("<ol class=\"{OL_CLASS}\">\n").into())
            }
            Event::Start(Tag::List(Some(start))) => {
                Event::Html(format!("<ol class=\"{OL_CLASS}\" start=\"{start}\">\n").into())
            }
            Event::End(TagEnd::List(false)) => Event::Html("</ul>\n".into()),
            Event::End(TagEnd::List(true)) => Event::Html("</ol>\n".into()),
            Event::Start(Tag::Item) => Event::Html(format!("<li class=\"{LI_CLASS}\">").into()),
            Event::End(TagEnd::Item) => Event::Html("</li>\n".into()),
            Event::Start(Tag::Paragraph) => match image_only_paragraph(&events, idx) {
                Some(end) => {
                    image_block_ends.push(end);
                    Event::Html(format!("<div class=\"{IMAGE_BLOCK_CLASS}\">").into())
                }
                None => event.clone(),
            },
            Event::End(TagEnd::Paragraph) if image_block_ends.last() == Some(&idx) => {
                image_block_ends.pop();
                Event::Html("</div>\n".into())
            }
            _ => event.clone(),
        };
        mapped.push(replacement);
    }

    mapped
}

/// Render GitHub-flavored markdown to HTML with the element mappings above.
///
/// Raw HTML in the source is passed through unchanged.
pub fn render_markdown_html(markdown: &str) -> String {
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, markdown_options()).collect();
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, map_events(events).into_iter());
    out
}
