//! Photo Context - Value Objects

use super::shared::required_text;

pub use super::shared::ResourceUrl as PhotoUrl;

/// 照片标题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoTitle(String);

impl PhotoTitle {
    pub fn new(title: impl AsRef<str>) -> Result<Self, &'static str> {
        required_text(
            title.as_ref(),
            200,
            "Title is required",
            "Title must not exceed 200 characters",
        )
        .map(Self)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 照片说明（可为空）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caption(String);

impl Caption {
    pub fn new(caption: Option<&str>) -> Result<Self, &'static str> {
        let caption = caption.map(str::trim).unwrap_or_default();
        if caption.chars().count() > 2000 {
            return Err("Caption must not exceed 2000 characters");
        }
        Ok(Self(caption.to_string()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
