//! Render a preview image to disk

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::og::{ImageRequest, OgQuery};
use crate::Blog;

/// Render the preview described by `query` and write it to `output`
pub async fn run(blog: &Blog, query: &OgQuery, output: &Path) -> Result<()> {
    let request = ImageRequest::from_query(query, &blog.config.og)?;
    tracing::info!(
        "Rendering {} preview for {:?}",
        request.template.name(),
        request.title
    );

    let png = blog.og_synthesizer()?.synthesize(&request).await?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &png)?;

    println!("Wrote {} bytes to {:?}", png.len(), output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_png() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        let output = dir.path().join("out/preview.png");
        let query = OgQuery {
            title: Some("From the CLI".to_string()),
            template: Some("generic".to_string()),
            ..Default::default()
        };

        run(&blog, &query, &output).await.unwrap();

        let img = image::open(&output).unwrap();
        assert_eq!((img.width(), img.height()), (1200, 600));
    }

    #[tokio::test]
    async fn test_rejects_unknown_template() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        let query = OgQuery {
            template: Some("poster".to_string()),
            ..Default::default()
        };
        assert!(run(&blog, &query, &dir.path().join("x.png")).await.is_err());
    }
}
