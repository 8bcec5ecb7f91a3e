use crate::config::OrdersConfig;

/// Builds CDN photo URLs from the identifier fields of a report row.
///
/// `{base}{B}/{A[:2]}/{B}_{A[:2]}_{C}{extension}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUrlTemplate {
    base_url: String,
    extension: String,
}

impl PhotoUrlTemplate {
    pub fn new(base_url: impl Into<String>, extension: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = format!("{}/", base_url.trim_end_matches('/'));
        Self {
            base_url,
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &OrdersConfig) -> Self {
        Self::new(&config.photo_base_url, &config.photo_extension)
    }

    /// Render the URL for fields A, B and C.
    ///
    /// A blank B yields an empty string. The A prefix is its first two
    /// characters, or all of A when it is shorter.
    pub fn render(&self, a: &str, b: &str, c: &str) -> String {
        if b.trim().is_empty() {
            return String::new();
        }
        let prefix: String = a.chars().take(2).collect();
        format!(
            "{}{b}/{prefix}/{b}_{prefix}_{c}{}",
            self.base_url, self.extension
        )
    }
}

impl Default for PhotoUrlTemplate {
    fn default() -> Self {
        Self::from_config(&OrdersConfig::default())
    }
}
