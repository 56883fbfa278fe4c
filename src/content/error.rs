//! Content errors

use thiserror::Error;

/// Errors raised while resolving content records
#[derive(Debug, Error)]
pub enum ContentError {
    /// No record exists for the requested slug
    #[error("no post found for slug `{slug}`")]
    NotFound { slug: String },

    /// A record exists but its header is unusable
    #[error("post `{slug}` is malformed: {reason}")]
    Malformed { slug: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub(crate) fn malformed(slug: &str, reason: impl Into<String>) -> Self {
        ContentError::Malformed {
            slug: slug.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the slug does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
