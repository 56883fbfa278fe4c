//! Page resolution: posts from the store, rendered into full HTML documents

use crate::content::{markdown, ContentError, Post, ProjectedRecord, RendererTable};
use crate::templates::{self, HOME_FIELDS, POST_FIELDS};
use crate::Blog;

fn typed(slug: &str, record: ProjectedRecord) -> Result<Post, ContentError> {
    record
        .into_typed()
        .map_err(|e| ContentError::malformed(slug, format!("unexpected field shape: {}", e)))
}

/// HTML of the home page
pub fn home_html(blog: &Blog) -> Result<String, ContentError> {
    let mut posts = Vec::new();
    for record in blog.store().load_all(&HOME_FIELDS)? {
        let slug = record.get_str("slug").unwrap_or_default().to_string();
        match typed(&slug, record) {
            Ok(post) => posts.push(post),
            Err(e) => tracing::warn!("Leaving {} off the home page: {}", slug, e),
        }
    }
    Ok(templates::home_page(&blog.config, &posts).into_string())
}

/// HTML of a post page
pub fn post_html(blog: &Blog, table: &RendererTable, slug: &str) -> Result<String, ContentError> {
    let record = blog.store().load_by_slug(slug, &POST_FIELDS)?;
    let post = typed(slug, record)?;
    let content = markdown::render_html(post.content.as_deref().unwrap_or_default(), table);
    Ok(templates::post_page(&blog.config, &post, &content).into_string())
}

/// HTML of the not-found page
pub fn not_found_html(blog: &Blog, slug: &str) -> String {
    templates::not_found_page(&blog.config, slug).into_string()
}
