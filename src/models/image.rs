use serde::Serialize;

const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";
const DEFAULT_IMAGE_SIZE: &str = "original";

/// 把 TMDB 返回的图片相对路径拼成完整 URL
///
/// 数据库里只保存 `/abc.jpg` 形式的路径，URL 在输出时生成，
/// 这样 TMDB 图片服务地址变化时无需迁移数据。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrlBuilder {
    base_url: String,
    size: String,
}

impl ImageUrlBuilder {
    pub fn new(base_url: impl Into<String>, size: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            size: size.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    /// 生成图片 URL，空路径返回 None
    pub fn url(&self, path: Option<&str>) -> Option<String> {
        let path = path?.trim();
        if path.is_empty() {
            return None;
        }
        let path = path.trim_start_matches('/');
        Some(format!("{}{}/{}", self.base_url, self.size, path))
    }
}

impl Default for ImageUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL, DEFAULT_IMAGE_SIZE)
    }
}
