use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::config::FrameIoConfig;

#[cfg(test)]
pub(crate) mod fake;
pub mod http;

/// Number of assets requested from a folder listing.
pub const PAGE_SIZE: u32 = 50;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FetchError {
    #[error("upstream responded with status {status}")]
    Upstream { status: u16, body: String },
    #[error("upstream request failed: {0}")]
    Transport(String),
}

/// A single file record from the Frame.io children listing.
///
/// Only the fields the gallery needs are kept. Values of an unexpected JSON
/// type are treated as absent instead of failing the whole listing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_url")]
    pub download_url: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
}

#[async_trait::async_trait]
pub trait AssetSource: Send + Sync {
    async fn folder_children(&self, config: &FrameIoConfig) -> Result<Vec<Asset>, FetchError>;
}

#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_frameio_items() {
        let items: Vec<Asset> = serde_json::from_str(
            r#"[
                {"id": "a1", "name": "sunset.jpg", "download_url": "https://cdn/a1", "type": "file"},
                {"id": "a2", "name": "notes.txt"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            items,
            vec![
                Asset {
                    id: Some("a1".to_string()),
                    name: Some("sunset.jpg".to_string()),
                    download_url: Some("https://cdn/a1".to_string()),
                },
                Asset {
                    id: Some("a2".to_string()),
                    name: Some("notes.txt".to_string()),
                    download_url: None,
                },
            ]
        );
    }

    #[test]
    fn unexpected_field_types_are_absent() {
        let items: Vec<Asset> = serde_json::from_str(
            r#"[{"id": 17, "name": null, "download_url": false}]"#,
        )
        .unwrap();

        assert_eq!(items[0].id.as_deref(), Some("17"));
        assert_eq!(items[0].name, None);
        assert_eq!(items[0].download_url, None);
    }
}
