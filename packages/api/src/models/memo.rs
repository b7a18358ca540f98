//! # Memo wire models and the storage-API response envelope
//!
//! Defines the three shapes that cross the HTTP boundary:
//!
//! ## [`Memo`]
//!
//! A memo as the storage API returns it. The server owns the record: `id` is
//! assigned on create and immutable, and `createdDate` / `lastModifiedDate`
//! are server-maintained timestamps the client never sends back. The client
//! only ever holds transient copies. Wire field names are camelCase.
//!
//! ## [`MemoDraft`]
//!
//! What create and update submit: title, rich-text body, and an optional
//! action timestamp. [`MemoDraft::validate`] applies the local form
//! constraints — non-empty title, non-empty stripped body, stripped body
//! within [`MAX_BODY_LEN`] characters — before any network call. The
//! [`MAX_TITLE_LEN`] cap is an input-level constraint for the form layer,
//! not a post-hoc validation.
//!
//! ## [`ApiResponse`]
//!
//! The `{success, data, message}` wrapper every storage-API response
//! carries. `success` must be checked independently of the HTTP status;
//! [`ApiResponse::into_result`] and [`ApiResponse::into_ack`] do that and
//! surface the server message on failure.

use serde::{Deserialize, Serialize};

use crate::content::strip_to_plain_text;
use crate::error::{ApiError, ValidationError};

/// Hard input cap for the memo title, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Maximum memo body length, counted on the stripped plain text.
pub const MAX_BODY_LEN: usize = 5000;

/// A memo as returned by the storage API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    /// Opaque server-assigned identifier, immutable.
    pub id: String,
    /// Title: "Standup notes"
    pub name: String,
    /// Rich-text body markup.
    #[serde(default)]
    pub description: String,
    /// Optional action instant, an ISO-8601 string on the wire.
    #[serde(default)]
    pub action_date_time: Option<String>,
    /// Server-assigned creation timestamp, opaque to the client.
    #[serde(default)]
    pub created_date: Option<String>,
    /// Server-assigned modification timestamp, opaque to the client.
    #[serde(default)]
    pub last_modified_date: Option<String>,
}

/// A memo submission: the body of create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemoDraft {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_date_time: Option<String>,
}

impl MemoDraft {
    /// Create a draft with the given title and body.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            action_date_time: None,
        }
    }

    /// Builder method to set the action instant.
    pub fn with_action_date_time(mut self, value: impl Into<String>) -> Self {
        self.action_date_time = Some(value.into());
        self
    }

    /// Check the local form constraints. Never touches the network.
    ///
    /// The body limit is applied to the stripped plain text, so markup does
    /// not count against the user; the title is checked on its raw text.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::TitleEmpty);
        }
        let body = strip_to_plain_text(&self.description);
        if body.is_empty() {
            return Err(ValidationError::BodyEmpty);
        }
        let len = body.chars().count();
        if len > MAX_BODY_LEN {
            return Err(ValidationError::BodyTooLong { len });
        }
        Ok(())
    }
}

/// The `{success, data, message}` envelope around every storage-API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the envelope into its payload.
    ///
    /// A `success=false` envelope surfaces the server message when present;
    /// a success envelope without a payload is treated as malformed.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Api(failure_message(self.message)));
        }
        self.data
            .ok_or_else(|| ApiError::Api("success response carried no data".to_string()))
    }

    /// Unwrap an envelope whose success shape carries no payload (delete).
    pub fn into_ack(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Api(failure_message(self.message)))
        }
    }
}

fn failure_message(message: Option<String>) -> String {
    message.unwrap_or_else(|| "memo request failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_decodes_camel_case_fields() {
        let memo: Memo = serde_json::from_str(
            r#"{
                "id": "a0B5g00000G1h2i",
                "name": "Standup notes",
                "description": "<p>ship it</p>",
                "actionDateTime": "2025-07-01T00:00:00.000Z",
                "createdDate": "2025-06-30T12:34:56.000+0000",
                "lastModifiedDate": "2025-06-30T12:34:56.000+0000"
            }"#,
        )
        .unwrap();

        assert_eq!(memo.id, "a0B5g00000G1h2i");
        assert_eq!(memo.description, "<p>ship it</p>");
        assert_eq!(
            memo.action_date_time.as_deref(),
            Some("2025-07-01T00:00:00.000Z")
        );
        assert_eq!(
            memo.last_modified_date.as_deref(),
            Some("2025-06-30T12:34:56.000+0000")
        );
    }

    #[test]
    fn test_memo_tolerates_missing_optional_fields() {
        let memo: Memo =
            serde_json::from_str(r#"{"id": "1", "name": "bare"}"#).unwrap();
        assert_eq!(memo.description, "");
        assert!(memo.action_date_time.is_none());
        assert!(memo.created_date.is_none());
    }

    #[test]
    fn test_draft_serializes_camel_case_and_skips_absent_action() {
        let draft = MemoDraft::new("Title", "<p>body</p>");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Title", "description": "<p>body</p>"})
        );

        let dated = draft.with_action_date_time("2025-07-01T00:00:00.000Z");
        let json = serde_json::to_value(&dated).unwrap();
        assert_eq!(json["actionDateTime"], "2025-07-01T00:00:00.000Z");
    }

    #[test]
    fn test_validate_rejects_blank_title_and_body() {
        assert_eq!(
            MemoDraft::new("   ", "body").validate(),
            Err(ValidationError::TitleEmpty)
        );
        assert_eq!(
            MemoDraft::new("Title", "  \n ").validate(),
            Err(ValidationError::BodyEmpty)
        );
        // Markup-only body strips to nothing
        assert_eq!(
            MemoDraft::new("Title", "<p> </p>").validate(),
            Err(ValidationError::BodyEmpty)
        );
    }

    #[test]
    fn test_validate_counts_stripped_body_length() {
        // Exactly at the limit: accepted, markup not counted
        let body = format!("<p>{}</p>", "a".repeat(MAX_BODY_LEN));
        assert_eq!(MemoDraft::new("Title", body).validate(), Ok(()));

        // One over: rejected with the stripped length
        let body = format!("<p>{}</p>", "a".repeat(MAX_BODY_LEN + 1));
        assert_eq!(
            MemoDraft::new("Title", body).validate(),
            Err(ValidationError::BodyTooLong {
                len: MAX_BODY_LEN + 1
            })
        );
    }

    #[test]
    fn test_envelope_success_yields_payload() {
        let envelope: ApiResponse<Vec<Memo>> = serde_json::from_str(
            r#"{"success": true, "data": [{"id": "1", "name": "n"}], "message": null}"#,
        )
        .unwrap();
        let memos = envelope.into_result().unwrap();
        assert_eq!(memos.len(), 1);
    }

    #[test]
    fn test_envelope_failure_surfaces_server_message() {
        let envelope: ApiResponse<Memo> =
            serde_json::from_str(r#"{"success": false, "message": "Memo not found"}"#).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Memo not found");
    }

    #[test]
    fn test_envelope_failure_without_message_is_generic() {
        let envelope: ApiResponse<Memo> =
            serde_json::from_str(r#"{"success": false}"#).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.to_string(), "memo request failed");
    }

    #[test]
    fn test_envelope_ack_ignores_missing_data() {
        let envelope: ApiResponse<()> =
            serde_json::from_str(r#"{"success": true, "message": "Deleted"}"#).unwrap();
        assert!(envelope.into_ack().is_ok());
    }
}
