//! # Content pipeline
//!
//! Everything between the memo editor and the page: a denylist sanitizer for
//! untrusted markup and the formatting helpers that turn stored content into
//! renderable blocks, plain text, or a bounded preview.

mod format;
mod sanitize;

pub use format::{
    format_for_display, strip_to_plain_text, truncate_for_preview, DEFAULT_PREVIEW_LEN,
};
pub use sanitize::sanitize;
