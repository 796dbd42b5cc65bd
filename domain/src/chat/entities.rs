//! Conversation entities
//!
//! A conversation is an ordered sequence of [`Turn`]s owned by the caller.
//! The gateway only reads and transforms it per request; persistence lives
//! outside this crate.

use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a conversation (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A media attachment for the newest user turn of a request.
///
/// Never part of stored history; at most one per request. Whether it may be
/// sent at all is gated by the target model's capability flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    /// Base64-encoded payload
    pub data: String,
    /// MIME type (e.g. "image/png", "video/mp4")
    pub mime_type: String,
}

impl Media {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.mime_type.starts_with("video/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let turn = Turn::user("hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "hello");

        let turn = Turn::assistant("hi");
        assert_eq!(turn.role, Role::Assistant);
    }

    #[test]
    fn test_media_kind_detection() {
        let image = Media::new("aGVsbG8=", "image/png");
        assert!(image.is_image());
        assert!(!image.is_video());

        let video = Media::new("aGVsbG8=", "video/mp4");
        assert!(video.is_video());
        assert!(!video.is_image());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Turn::user("x")).unwrap();
        assert!(json.contains(r#""role":"user""#));
    }
}
