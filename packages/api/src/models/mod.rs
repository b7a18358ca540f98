//! Data models for the memo client.

mod memo;

pub use memo::{ApiResponse, Memo, MemoDraft, MAX_BODY_LEN, MAX_TITLE_LEN};
