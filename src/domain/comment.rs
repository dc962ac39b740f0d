//! Comment Context - Value Objects

use super::shared::required_text;

/// 评论内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMessage(String);

impl CommentMessage {
    pub fn new(message: impl AsRef<str>) -> Result<Self, &'static str> {
        required_text(
            message.as_ref(),
            1000,
            "Message is required",
            "Message must not exceed 1000 characters",
        )
        .map(Self)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_required() {
        assert!(CommentMessage::new("").is_err());
        assert!(CommentMessage::new("y".repeat(1001)).is_err());
        assert_eq!(CommentMessage::new("nice").unwrap().into_inner(), "nice");
    }
}
