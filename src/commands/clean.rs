//! Clean generated pages from the public directory

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Remove the generated home page and post pages
///
/// Everything else under the public dir is authored static content and stays.
pub fn run(blog: &Blog) -> Result<()> {
    let index = blog.public_dir.join("index.html");
    if index.exists() {
        fs::remove_file(&index)?;
        tracing::info!("Deleted: {:?}", index);
    }

    let posts = blog.public_dir.join("posts");
    if posts.exists() {
        fs::remove_dir_all(&posts)?;
        tracing::info!("Deleted: {:?}", posts);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_clean_keeps_assets() {
        let dir = TempDir::new().unwrap();
        let public = dir.path().join("public");
        fs::create_dir_all(public.join("posts/a")).unwrap();
        fs::create_dir_all(public.join("assets")).unwrap();
        fs::write(public.join("index.html"), "home").unwrap();
        fs::write(public.join("posts/a/index.html"), "a").unwrap();
        fs::write(public.join("assets/cover.png"), "png").unwrap();

        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        run(&blog).unwrap();

        assert!(!public.join("index.html").exists());
        assert!(!public.join("posts").exists());
        assert!(public.join("assets/cover.png").exists());

        // Nothing left to clean
        run(&blog).unwrap();
    }
}
