use std::sync::Arc;

use thiserror::Error;

use crate::config::{FrameIoConfig, MissingConfig};
use crate::upstream::{Asset, AssetSource, FetchError};
use frame_gallery_api_structs::Photo;

pub const DEFAULT_ALT: &str = "Frame.io asset";

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ListError {
    #[error(transparent)]
    MissingConfig(#[from] MissingConfig),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Lists the photos of the configured Frame.io folder.
pub struct PhotoLister {
    source: Arc<dyn AssetSource>,
    config: Result<FrameIoConfig, MissingConfig>,
}

impl PhotoLister {
    pub fn new(
        source: Arc<dyn AssetSource>,
        config: Result<FrameIoConfig, MissingConfig>,
    ) -> Self {
        PhotoLister { source, config }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Photo>, ListError> {
        let config = self.config.as_ref().map_err(Clone::clone)?;

        let assets = self.source.folder_children(config).await.map_err(|err| {
            tracing::warn!(error = %err, "Listing Frame.io folder failed");
            err
        })?;

        let total = assets.len();
        let photos = photos_from_assets(assets);
        tracing::debug!(total, kept = photos.len(), "Listed Frame.io folder");

        Ok(photos)
    }
}

/// Drops assets without a download URL and projects the rest into photos.
pub fn photos_from_assets(assets: Vec<Asset>) -> Vec<Photo> {
    assets
        .into_iter()
        .filter_map(|asset| {
            let src = asset.download_url.filter(|url| !url.is_empty())?;
            let alt = asset
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_ALT.to_string());

            Some(Photo {
                id: asset.id,
                name: asset.name,
                src,
                alt,
            })
        })
        .collect()
}
