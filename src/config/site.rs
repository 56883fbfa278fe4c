//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub tagline: String,
    pub author: String,

    // URL
    pub url: String,

    // Directory
    /// Directory holding the markdown posts, relative to the base directory
    pub source_dir: String,
    /// Output directory for generated pages, also served for static assets
    pub public_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Preview images
    #[serde(default)]
    pub og: OgConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Code Insights".to_string(),
            description: "Code Insights | Unveiling the secrets of Web Development".to_string(),
            tagline: "// Unveiling the secrets of Web Development".to_string(),
            author: String::new(),

            url: "https://www.code-insights.dev".to_string(),

            source_dir: "_posts".to_string(),
            public_dir: "public".to_string(),

            highlight: HighlightConfig::default(),
            og: OgConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Absolute URL for a site-relative path
    pub fn absolute_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name used for fenced code blocks
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

/// Open Graph image configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OgConfig {
    /// Title used when a request carries none
    pub default_title: String,
    /// Background used when a request carries none
    pub default_background: String,
    /// Byline drawn by the branded template
    pub site_name: String,
    /// Upper bound for fetching a remote background
    pub fetch_timeout_secs: u64,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            default_title: "Unveiling the secrets of Web Development".to_string(),
            default_background: "/assets/blog/creative-ways-of-use-reducer/cover.png".to_string(),
            site_name: "// code-insights.dev".to_string(),
            fetch_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.source_dir, "_posts");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.og.site_name, "// code-insights.dev");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
url: https://blog.example.com/
source_dir: content
og:
  site_name: "// example.com"
  fetch_timeout_secs: 2
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.source_dir, "content");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.og.site_name, "// example.com");
        assert_eq!(config.og.fetch_timeout_secs, 2);
        assert_eq!(
            config.og.default_title,
            "Unveiling the secrets of Web Development"
        );
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_absolute_url() {
        let config = SiteConfig {
            url: "https://blog.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.absolute_url("/posts/hello"),
            "https://blog.example.com/posts/hello"
        );
    }
}
