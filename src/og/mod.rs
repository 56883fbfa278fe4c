//! Open Graph preview images
//!
//! A preview is a 1200×600 PNG: the post background scaled to fill the
//! canvas, a translucent panel, the title and (for the branded template) the
//! site byline. The overlay is laid out as SVG and rasterized with `resvg`.
//!
//! A background that cannot be fetched or decoded never fails the request;
//! the canvas is left blank instead.

mod background;
mod compose;
mod request;

use std::path::Path;
use thiserror::Error;

use crate::config::OgConfig;

pub use background::{BackgroundLoader, BackgroundSource};
pub use compose::{overlay_svg, render_png, HEIGHT, WIDTH};
pub use request::{ImageRequest, OgQuery, Template, MAX_TITLE_CHARS};

/// Errors raised while producing a preview image
#[derive(Debug, Error)]
pub enum OgError {
    /// A query parameter has the wrong shape
    #[error("invalid parameter `{name}`: expected {expected}")]
    InvalidParameter { name: &'static str, expected: String },

    /// The background could not be fetched or decoded
    #[error("background unavailable: {0}")]
    RemoteAssetUnavailable(String),

    #[error("failed to render preview: {0}")]
    Render(String),

    #[error("failed to encode preview: {0}")]
    Encode(#[from] image::ImageError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl OgError {
    /// Whether the caller sent a bad request
    pub fn is_client_error(&self) -> bool {
        matches!(self, OgError::InvalidParameter { .. })
    }
}

/// Produces preview images for requests
#[derive(Debug, Clone)]
pub struct OgImageSynthesizer {
    config: OgConfig,
    loader: BackgroundLoader,
}

impl OgImageSynthesizer {
    /// `assets_root` resolves site-relative backgrounds such as `/assets/x.png`
    pub fn new<P: AsRef<Path>>(config: &OgConfig, assets_root: P) -> Result<Self, OgError> {
        let loader = BackgroundLoader::new(assets_root, config.fetch_timeout_secs)?;
        Ok(Self {
            config: config.clone(),
            loader,
        })
    }

    pub fn config(&self) -> &OgConfig {
        &self.config
    }

    /// Render the PNG for a request
    pub async fn synthesize(&self, request: &ImageRequest) -> Result<Vec<u8>, OgError> {
        let background = match self.loader.load(&request.background_url).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!("Rendering preview without background: {}", e);
                None
            }
        };

        let request = request.clone();
        let site_name = self.config.site_name.clone();
        tokio::task::spawn_blocking(move || {
            render_png(&request, &site_name, background.as_deref())
        })
        .await?
    }
}
