use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Remote movie API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// TMDB image CDN base URL
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.popcornpick.app".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Full CDN URL for a poster/backdrop path fragment at the given width
    /// (e.g. `w185`, `w500`, `original`).
    pub fn image_url(&self, width: &str, path_fragment: &str) -> String {
        format!("{}/{}{}", self.image_base_url, width, path_fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.popcornpick.app");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_image_url_joins_width_and_fragment() {
        let config = Config::default();
        assert_eq!(
            config.image_url("w185", "/abc123.jpg"),
            "https://image.tmdb.org/t/p/w185/abc123.jpg"
        );
    }
}
