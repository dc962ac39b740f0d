//! 跨上下文共享的值对象

use url::Url;

/// 外部资源链接（照片地址、社交主页等）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUrl(String);

impl ResourceUrl {
    pub fn new(url: impl AsRef<str>) -> Result<Self, &'static str> {
        let url = url.as_ref().trim();
        if url.is_empty() {
            return Err("URL is required");
        }
        if url.len() > 2048 {
            return Err("URL is too long");
        }

        let parsed = Url::parse(url).map_err(|_| "Invalid URL format")?;
        match parsed.scheme() {
            "http" | "https" => {}
            _ => return Err("URL must use http or https"),
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err("URL must include a host");
        }
        Ok(Self(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 校验必填文本字段，返回去除首尾空白后的内容
pub(crate) fn required_text(
    value: &str,
    max_chars: usize,
    missing: &'static str,
    too_long: &'static str,
) -> Result<String, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(missing);
    }
    if value.chars().count() > max_chars {
        return Err(too_long);
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url_requires_http_scheme() {
        assert!(ResourceUrl::new("").is_err());
        assert!(ResourceUrl::new("ftp://example.com/a.png").is_err());
        assert_eq!(
            ResourceUrl::new(" https://example.com/a.png ").unwrap().as_str(),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn test_resource_url_rejects_missing_host() {
        assert!(ResourceUrl::new("https://").is_err());
        assert!(ResourceUrl::new("http:// not a url").is_err());
        assert!(ResourceUrl::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_resource_url_rejects_space_in_host() {
        assert!(ResourceUrl::new("https://exa mple.com/a.png").is_err());
        assert!(ResourceUrl::new("https://exa mple.com/<>").is_err());
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("  hi ", 10, "missing", "long"), Ok("hi".to_string()));
        assert_eq!(required_text("   ", 10, "missing", "long"), Err("missing"));
        assert_eq!(required_text("abcdef", 3, "missing", "long"), Err("long"));
    }
}
