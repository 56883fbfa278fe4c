//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create a post scaffold and return its path
///
/// The slug defaults to the slugified title.
pub fn run(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from {:?}", title);
    }

    fs::create_dir_all(&blog.source_dir)?;
    let file_path = blog.source_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\nexcerpt: \"\"\ndate: {}\nauthor:\n  name: {}\n---\n\n",
        serde_json::to_string(title)?,
        now.to_rfc3339(),
        serde_json::to_string(&blog.config.author)?,
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}
