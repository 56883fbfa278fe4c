//! postpress: a markdown blog with server-rendered pages and Open Graph images
//!
//! Posts live as markdown files with a YAML header in a flat directory. The
//! crate resolves them into projected records, renders their bodies through a
//! renderer table and synthesizes preview images on request.

pub mod commands;
pub mod config;
pub mod content;
pub mod og;
pub mod pages;
pub mod routes;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

use content::{ContentStore, Highlighter, RendererTable};
use og::OgImageSynthesizer;

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Posts directory
    pub source_dir: std::path::PathBuf,
    /// Public (output and static asset) directory
    pub public_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        }
    }

    /// Handle over the posts directory
    pub fn store(&self) -> ContentStore {
        ContentStore::new(&self.source_dir)
    }

    /// Renderer table used for post bodies
    pub fn renderer_table(&self) -> RendererTable {
        RendererTable::site(Highlighter::new(&self.config.highlight.theme))
    }

    /// Preview image synthesizer reading local backgrounds from the public dir
    pub fn og_synthesizer(&self) -> Result<OgImageSynthesizer> {
        Ok(OgImageSynthesizer::new(&self.config.og, &self.public_dir)?)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory of generated pages
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<()> {
        commands::new::run(self, title, slug).map(|_| ())
    }
}
