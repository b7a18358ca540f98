//! # Denylist HTML sanitizer
//!
//! Removes the elements and attributes that could execute script from
//! rich-text markup before it is rendered or stored: `script`, `iframe`, and
//! `object` elements with their content down to the matching close tag,
//! `embed` and `link` void elements, `javascript:` URI schemes, inline
//! event-handler attributes (`on*="…"` / `on*='…'`), and inline `style`
//! attributes. Matching is case-insensitive and the element patterns run
//! across newlines.
//!
//! ## Trust model
//!
//! This is a pattern filter, not a markup parser. It applies each denylist
//! pattern in sequence over the raw string and does not validate that the
//! markup is well formed. The input it sees comes from the app's own editing
//! widget, which emits plain nested tags; adversarial markup crafted to
//! defeat sequential pattern removal is outside what this filter defends
//! against.

use std::sync::LazyLock;

use regex::Regex;

/// Denylist patterns.
/// Stored as Option to handle compilation failures gracefully (they never
/// fail for these static patterns).
static SCRIPT_ELEMENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // <script ...>content</script>, across newlines
    Regex::new(r"(?is)<script[^>]*>.*?</script>").ok()
});

static IFRAME_ELEMENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?is)<iframe[^>]*>.*?</iframe>").ok()
});

static OBJECT_ELEMENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?is)<object[^>]*>.*?</object>").ok()
});

static EMBED_ELEMENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Void element, no close tag
    Regex::new(r"(?i)<embed[^>]*>").ok()
});

static LINK_ELEMENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)<link[^>]*>").ok()
});

static JAVASCRIPT_SCHEME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").ok());

static EVENT_HANDLER_ATTR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // onclick="..." / onerror='...'
    Regex::new(r#"(?i)on\w+="[^"]*"|on\w+='[^']*'"#).ok()
});

static STYLE_ATTR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?i)style="[^"]*"|style='[^']*'"#).ok()
});

/// Remove dangerous elements and attributes from rich-text markup,
/// preserving the surrounding safe formatting.
pub fn sanitize(markup: &str) -> String {
    let mut sanitized = markup.to_string();
    for pattern in [
        &SCRIPT_ELEMENT,
        &IFRAME_ELEMENT,
        &OBJECT_ELEMENT,
        &EMBED_ELEMENT,
        &LINK_ELEMENT,
        &JAVASCRIPT_SCHEME,
        &EVENT_HANDLER_ATTR,
        &STYLE_ATTR,
    ] {
        if let Some(re) = pattern.as_ref() {
            sanitized = re.replace_all(&sanitized, "").into_owned();
        }
    }
    sanitized
}
