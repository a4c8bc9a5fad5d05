use std::sync::Arc;

use thiserror::Error;

use crate::upstream::{FetchError, ImageFetcher};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
pub const DEFAULT_CACHE_CONTROL: &str = "public, s-maxage=86400, stale-while-revalidate=86400";

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProxyError {
    #[error("missing url")]
    MissingUrl,
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProxiedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub cache_control: String,
}

/// Relays images from arbitrary hosts.
///
/// There is no allow-list: any URL the caller passes is fetched.
pub struct ImageProxy {
    fetcher: Arc<dyn ImageFetcher>,
}

impl ImageProxy {
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        ImageProxy { fetcher }
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, url: Option<&str>) -> Result<ProxiedImage, ProxyError> {
        let url = url.filter(|u| !u.is_empty()).ok_or(ProxyError::MissingUrl)?;

        let image = self.fetcher.fetch_image(url).await.map_err(|err| {
            tracing::warn!(error = %err, "Fetching upstream image failed");
            err
        })?;

        Ok(ProxiedImage {
            bytes: image.bytes,
            content_type: image
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            cache_control: image
                .cache_control
                .unwrap_or_else(|| DEFAULT_CACHE_CONTROL.to_string()),
        })
    }
}
