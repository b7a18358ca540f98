//! # Display formatting and the plain-text projection
//!
//! Reconciles the three representations of a memo body:
//!
//! | Function | From | To |
//! |----------|------|----|
//! | [`format_for_display`] | raw editor markup or plain text | sanitized, block-structured markup |
//! | [`strip_to_plain_text`] | any markup | plain text for length validation |
//! | [`truncate_for_preview`] | any markup | a bounded plain-text list preview |
//!
//! `format_for_display` is idempotent: feeding its output back through it
//! yields the same markup, since sanitized content with block structure
//! passes through unchanged.

use std::sync::LazyLock;

use regex::Regex;

use super::sanitize::sanitize;

/// Plain-text preview length used by list views.
pub const DEFAULT_PREVIEW_LEN: usize = 150;

/// Stored as Option to handle compilation failures gracefully (they never
/// fail for these static patterns).
static MARKUP_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Any element: "<" + letter, through a closing ">"
    Regex::new(r"(?is)<[a-z].*>").ok()
});

static PARAGRAPH_BREAK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Blank-line boundary between plain-text paragraphs
    Regex::new(r"\n\s*\n").ok()
});

static ANY_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

/// Convert memo content into sanitized markup ready to render.
///
/// Content that already contains markup is sanitized and, when it has no
/// block-level structure (no `<p>`, `<div>`, or `<br>`), wrapped in a single
/// paragraph. Plain text is split on blank lines into paragraphs, with the
/// remaining single line breaks becoming `<br>`. A completely blank input
/// still yields one (possibly empty) paragraph element.
pub fn format_for_display(content: &str) -> String {
    let has_markup = MARKUP_TAG
        .as_ref()
        .is_some_and(|re| re.is_match(content));

    if has_markup {
        let sanitized = sanitize(content);
        if has_block_structure(&sanitized) {
            return sanitized;
        }
        return format!("<p>{sanitized}</p>");
    }

    let chunks: Vec<&str> = match PARAGRAPH_BREAK.as_ref() {
        Some(re) => re.split(content).collect(),
        None => vec![content],
    };
    let paragraphs: Vec<String> = chunks
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| format!("<p>{}</p>", chunk.replace('\n', "<br>")))
        .collect();

    if paragraphs.is_empty() {
        // Blank input still renders as one paragraph
        return format!("<p>{}</p>", content.replace('\n', "<br>"));
    }
    paragraphs.join("")
}

fn has_block_structure(markup: &str) -> bool {
    markup.contains("<p>") || markup.contains("<div>") || markup.contains("<br>")
}

/// Strip all tags, decode the five entities the editor emits
/// (`&nbsp; &amp; &lt; &gt; &quot;`), and trim surrounding whitespace.
pub fn strip_to_plain_text(markup: &str) -> String {
    let text = match ANY_TAG.as_ref() {
        Some(re) => re.replace_all(markup, "").into_owned(),
        None => markup.to_string(),
    };
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .trim()
        .to_string()
}

/// Plain-text preview bounded to `max_len` characters, with an ellipsis
/// marker appended when the content was cut.
pub fn truncate_for_preview(markup: &str, max_len: usize) -> String {
    let plain = strip_to_plain_text(markup);
    if plain.chars().count() <= max_len {
        return plain;
    }
    let cut: String = plain.chars().take(max_len).collect();
    format!("{}...", cut.trim_end())
}
