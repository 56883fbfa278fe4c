//! List site content

use anyhow::Result;

use crate::content::ContentError;
use crate::routes::enumerate_routes;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let store = blog.store();

    match content_type {
        "post" | "posts" => {
            let slugs = store.list_slugs()?;
            println!("Posts ({}):", slugs.len());
            for slug in slugs {
                match store.record(&slug) {
                    Ok(record) => println!(
                        "  {} - {} [{}]",
                        record.date().format("%Y-%m-%d"),
                        record.title(),
                        slug
                    ),
                    Err(ContentError::Malformed { reason, .. }) => {
                        println!("  ---------- - (malformed: {}) [{}]", reason, slug)
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        "route" | "routes" => {
            let routes = enumerate_routes(&store)?;
            println!("Routes ({}):", routes.len() + 2);
            println!("  /");
            println!("  /api/og");
            for route in routes {
                println!("  {}", route.path());
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available types: post, route",
                content_type
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_list_rejects_unknown_type() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::with_config(dir.path(), SiteConfig::default());
        assert!(run(&blog, "post").is_ok());
        assert!(run(&blog, "route").is_ok());
        assert!(run(&blog, "tag").is_err());
    }
}
