use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{Asset, AssetSource, FetchError, FetchedImage, ImageFetcher};
use crate::config::FrameIoConfig;

/// In-memory upstream that replays canned results and counts calls.
pub(crate) struct FakeUpstream {
    assets: Result<Vec<Asset>, FetchError>,
    image: Result<FetchedImage, FetchError>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeUpstream {
    pub(crate) fn new() -> Self {
        FakeUpstream {
            assets: Ok(Vec::new()),
            image: Err(FetchError::Transport("no image configured".to_string())),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_assets(mut self, assets: Result<Vec<Asset>, FetchError>) -> Self {
        self.assets = assets;
        self
    }

    pub(crate) fn with_image(mut self, image: Result<FetchedImage, FetchError>) -> Self {
        self.image = image;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Folder ids and image URLs seen so far, in call order.
    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn record(&self, target: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(target.to_string());
    }
}

#[async_trait::async_trait]
impl AssetSource for FakeUpstream {
    async fn folder_children(&self, config: &FrameIoConfig) -> Result<Vec<Asset>, FetchError> {
        self.record(&config.folder_id);
        self.assets.clone()
    }
}

#[async_trait::async_trait]
impl ImageFetcher for FakeUpstream {
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, FetchError> {
        self.record(url);
        self.image.clone()
    }
}

pub(crate) fn asset(id: &str, name: Option<&str>, download_url: Option<&str>) -> Asset {
    Asset {
        id: Some(id.to_string()),
        name: name.map(str::to_string),
        download_url: download_url.map(str::to_string),
    }
}
