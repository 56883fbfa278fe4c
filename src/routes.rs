//! Static route enumeration for pre-rendering `/posts/{slug}`

use serde::Serialize;

use crate::content::{ContentError, ContentStore};

/// Parameters of one pre-resolvable post route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    pub slug: String,
}

impl RouteParams {
    /// Site-relative path of the post page
    pub fn path(&self) -> String {
        format!("/posts/{}", self.slug)
    }
}

/// One entry per post known to the store
pub fn enumerate_routes(store: &ContentStore) -> Result<Vec<RouteParams>, ContentError> {
    Ok(store
        .list_slugs()?
        .into_iter()
        .map(|slug| RouteParams { slug })
        .collect())
}
