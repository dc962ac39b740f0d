//! SocialMedia Context - Value Objects

use super::shared::required_text;

pub use super::shared::ResourceUrl as SocialMediaUrl;

/// 社交媒体名称（如 "Instagram"）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialMediaName(String);

impl SocialMediaName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, &'static str> {
        required_text(
            name.as_ref(),
            100,
            "Name is required",
            "Name must not exceed 100 characters",
        )
        .map(Self)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
