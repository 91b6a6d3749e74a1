use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("BALCAO_API_URL") {
            if let Some(url) = normalize_base_url(&v) {
                self.api.base_url = url;
            }
        }
        self
    }

    fn defaults() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3001".to_string(),
            },
        }
    }
}

/// Trim whitespace and any trailing slash; blank values are ignored.
fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.trim_end_matches('/').to_string())
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::defaults();
        assert_eq!(config.api.base_url, "http://localhost:3001");
    }

    #[test]
    fn test_base_url_normalization() {
        assert_eq!(
            normalize_base_url("http://api.example.com/").as_deref(),
            Some("http://api.example.com")
        );
        assert_eq!(
            normalize_base_url("  http://api.example.com  ").as_deref(),
            Some("http://api.example.com")
        );
        assert_eq!(normalize_base_url("   "), None);
    }
}
