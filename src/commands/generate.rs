//! Generate static files

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::ContentError;
use crate::routes::enumerate_routes;
use crate::{pages, Blog};

/// Summary of a generation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<String>,
}

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let report = generate(blog)?;
    println!(
        "Generated {} files ({} posts skipped)",
        report.written.len(),
        report.skipped.len()
    );
    Ok(())
}

/// Write the home page and every enumerated post page into the public dir
pub fn generate(blog: &Blog) -> Result<GenerateReport> {
    let start = std::time::Instant::now();
    let mut report = GenerateReport::default();
    let table = blog.renderer_table();

    fs::create_dir_all(&blog.public_dir)?;

    let index = blog.public_dir.join("index.html");
    write_file(&index, &pages::home_html(blog)?)?;
    report.written.push(index);

    let routes = enumerate_routes(&blog.store())?;
    tracing::info!("Enumerated {} post routes", routes.len());

    for route in routes {
        match pages::post_html(blog, &table, &route.slug) {
            Ok(html) => {
                let path = blog
                    .public_dir
                    .join(route.path().trim_start_matches('/'))
                    .join("index.html");
                write_file(&path, &html)?;
                tracing::debug!("Generated: {:?}", path);
                report.written.push(path);
            }
            Err(e @ ContentError::Malformed { .. }) => {
                tracing::warn!("Skipping {}: {}", route.path(), e);
                report.skipped.push(route.slug);
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        "Generated {} files in {:.2}s",
        report.written.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
