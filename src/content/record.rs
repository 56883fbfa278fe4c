//! Post records and their typed views

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::frontmatter::{self, FrontMatter};
use super::ContentError;

/// A post as stored on disk: header, raw body and derived identity
#[derive(Debug, Clone)]
pub struct ContentRecord {
    slug: String,
    title: String,
    date: DateTime<FixedOffset>,
    front_matter: FrontMatter,
    body: String,
}

impl ContentRecord {
    /// Build a record from a source file's text
    ///
    /// `title` and `date` are required; a missing one, or a date that does
    /// not parse, makes the record malformed.
    pub fn parse(slug: &str, source: &str) -> Result<Self, ContentError> {
        let (front_matter, body) = FrontMatter::parse(source)
            .map_err(|e| ContentError::malformed(slug, format!("invalid header: {}", e)))?;

        let title = front_matter
            .get_str("title")
            .ok_or_else(|| ContentError::malformed(slug, "missing required field `title`"))?;

        let raw_date = front_matter
            .get_str("date")
            .ok_or_else(|| ContentError::malformed(slug, "missing required field `date`"))?;
        let date = frontmatter::parse_date(&raw_date).ok_or_else(|| {
            ContentError::malformed(slug, format!("unparseable `date`: {}", raw_date))
        })?;

        Ok(Self {
            slug: slug.to_string(),
            title,
            date,
            body: body.to_string(),
            front_matter,
        })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publication date, used for ordering
    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    /// Raw, unrendered markdown body
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Post author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Open Graph image reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OgImage {
    pub url: String,
}

/// Typed view over a projected post
///
/// Every field is optional because a projection only carries what was asked
/// for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub author: Option<Author>,
    pub cover_image: Option<String>,
    pub excerpt: Option<String>,
    pub og_image: Option<OgImage>,
    pub content: Option<String>,
}

impl Post {
    /// Image for link previews: `ogImage.url`, else the cover image
    pub fn og_image_url(&self) -> Option<&str> {
        self.og_image
            .as_ref()
            .map(|og| og.url.as_str())
            .or(self.cover_image.as_deref())
    }

    /// Publication date formatted for display
    pub fn display_date(&self) -> Option<String> {
        let date = self.date.as_deref()?;
        Some(
            frontmatter::parse_date(date)
                .map(|d| d.format("%B %-d, %Y").to_string())
                .unwrap_or_else(|| date.to_string()),
        )
    }
}
