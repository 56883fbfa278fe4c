//! Background image loading for previews

use reqwest::Url;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use super::OgError;

/// Backgrounds larger than this are refused
const MAX_BACKGROUND_BYTES: u64 = 16 * 1024 * 1024;

/// Where a background image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundSource {
    /// `http://` or `https://` URL
    Remote(Url),
    /// Site path such as `/assets/blog/cover.png`, relative to the assets root
    Local(PathBuf),
}

impl BackgroundSource {
    /// Classify a background reference, `None` when it is neither kind
    pub fn parse(reference: &str) -> Option<Self> {
        if reference.starts_with('/') && !reference.starts_with("//") {
            let path = reference.split(['?', '#']).next().unwrap_or_default();
            let relative = Path::new(path.trim_start_matches('/'));
            let safe = relative.components().count() > 0
                && relative
                    .components()
                    .all(|c| matches!(c, Component::Normal(_)));
            return safe.then(|| BackgroundSource::Local(relative.to_path_buf()));
        }

        let url = Url::parse(reference).ok()?;
        match url.scheme() {
            "http" | "https" => Some(BackgroundSource::Remote(url)),
            _ => None,
        }
    }
}

/// Fetches background bytes over HTTP or from the site's asset directory
#[derive(Debug, Clone)]
pub struct BackgroundLoader {
    client: reqwest::Client,
    assets_root: PathBuf,
    max_bytes: u64,
}

impl BackgroundLoader {
    pub fn new<P: AsRef<Path>>(assets_root: P, timeout_secs: u64) -> Result<Self, OgError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .user_agent(concat!("postpress/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            assets_root: assets_root.as_ref().to_path_buf(),
            max_bytes: MAX_BACKGROUND_BYTES,
        })
    }

    /// Raw bytes of the background; any failure is `RemoteAssetUnavailable`
    pub async fn load(&self, reference: &str) -> Result<Vec<u8>, OgError> {
        let source = BackgroundSource::parse(reference).ok_or_else(|| {
            OgError::RemoteAssetUnavailable(format!("unsupported background `{}`", reference))
        })?;

        match source {
            BackgroundSource::Remote(url) => self.fetch(url).await,
            BackgroundSource::Local(path) => {
                let full = self.assets_root.join(&path);
                tokio::fs::read(&full).await.map_err(|e| {
                    OgError::RemoteAssetUnavailable(format!("{}: {}", full.display(), e))
                })
            }
        }
    }

    async fn fetch(&self, url: Url) -> Result<Vec<u8>, OgError> {
        let unavailable = |e: reqwest::Error| OgError::RemoteAssetUnavailable(e.to_string());

        tracing::debug!("Fetching background {}", url);
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?;

        let too_large = || {
            OgError::RemoteAssetUnavailable(format!(
                "{} is larger than {} bytes",
                url, self.max_bytes
            ))
        };

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes)
        {
            return Err(too_large());
        }

        // Chunked bodies carry no length, so the cap is enforced while reading
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(unavailable)? {
            if (bytes.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(too_large());
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}
