//! Preview image requests and query parsing

use serde::Deserialize;

use super::{BackgroundSource, OgError};
use crate::config::OgConfig;

/// Longest title accepted from a query
pub const MAX_TITLE_CHARS: usize = 200;

const MAX_USERNAME_CHARS: usize = 64;

/// Visual composition of a preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Title on a neutral panel
    Generic,
    /// Title with the site byline, optionally crediting a user
    Branded { username: Option<String> },
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Template::Generic => "generic",
            Template::Branded { .. } => "branded",
        }
    }
}

/// Raw `/api/og` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OgQuery {
    pub title: Option<String>,
    pub bg_image: Option<String>,
    pub username: Option<String>,
    pub template: Option<String>,
}

/// A fully resolved preview request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub title: String,
    pub background_url: String,
    pub template: Template,
}

impl ImageRequest {
    /// Validate a query and apply the configured defaults
    ///
    /// Empty parameters count as absent. The template defaults to branded;
    /// `username` only matters for the branded template.
    pub fn from_query(query: &OgQuery, config: &OgConfig) -> Result<Self, OgError> {
        let title = match text(&query.title).as_deref() {
            Some(title) if title.chars().count() > MAX_TITLE_CHARS => {
                return Err(OgError::InvalidParameter {
                    name: "title",
                    expected: format!("a string of at most {} characters", MAX_TITLE_CHARS),
                });
            }
            Some(title) => title.to_string(),
            None => config.default_title.clone(),
        };

        let background_url = match present(&query.bg_image) {
            Some(url) if BackgroundSource::parse(url).is_none() => {
                return Err(OgError::InvalidParameter {
                    name: "bgImage",
                    expected: "an http(s) URL or a site path starting with `/`".to_string(),
                });
            }
            Some(url) => url.to_string(),
            None => config.default_background.clone(),
        };

        let username = text(&query.username);
        let username = username
            .as_deref()
            .map(|u| u.trim_start_matches('@'))
            .filter(|u| !u.is_empty())
            .map(|u| u.chars().take(MAX_USERNAME_CHARS).collect::<String>());

        let template = match present(&query.template) {
            None | Some("branded") => Template::Branded { username },
            Some("generic") => Template::Generic,
            Some(_) => {
                return Err(OgError::InvalidParameter {
                    name: "template",
                    expected: "one of `generic`, `branded`".to_string(),
                });
            }
        };

        Ok(Self {
            title,
            background_url,
            template,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A drawn text parameter with characters XML cannot carry turned into spaces
fn text(value: &Option<String>) -> Option<String> {
    let cleaned: String = present(value)?
        .chars()
        .map(|c| {
            if c.is_control() || c == '\u{fffe}' || c == '\u{ffff}' {
                ' '
            } else {
                c
            }
        })
        .collect();
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}
