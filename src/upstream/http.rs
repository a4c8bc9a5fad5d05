use std::convert::TryInto;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use surf::http::headers::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, LOCATION};
use surf::http::Method;
use surf::{RequestBuilder, StatusCode};
use url::Url;

use super::{Asset, AssetSource, FetchError, FetchedImage, ImageFetcher, PAGE_SIZE};
use crate::config::FrameIoConfig;

/// Redirect hops followed for proxied images.
const MAX_REDIRECTS: u8 = 20;

/// `surf`-backed client for the Frame.io API and arbitrary image hosts.
#[derive(Clone)]
pub struct HttpUpstream {
    client: surf::Client,
    api_url: Url,
}

impl HttpUpstream {
    pub fn new(api_url: Url, timeout: Duration) -> Result<Self> {
        if api_url.cannot_be_a_base() {
            return Err(anyhow!("Frame.io API URL cannot be a base: {}", api_url));
        }

        let client: surf::Client = surf::Config::new()
            .set_timeout(Some(timeout))
            .try_into()
            .context("Failed to build HTTP client")?;

        Ok(HttpUpstream { client, api_url })
    }

    pub(crate) fn children_url(&self, folder_id: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(&["assets", folder_id, "children"]);
        }
        url.query_pairs_mut()
            .append_pair("type", "file")
            .append_pair("per_page", &PAGE_SIZE.to_string());
        url
    }
}

fn transport(err: surf::Error) -> FetchError {
    FetchError::Transport(err.to_string())
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MovedPermanently
            | StatusCode::Found
            | StatusCode::SeeOther
            | StatusCode::TemporaryRedirect
            | StatusCode::PermanentRedirect
    )
}

fn header(res: &surf::Response, name: surf::http::headers::HeaderName) -> Option<String> {
    res.header(name).map(|values| values.last().as_str().to_string())
}

#[async_trait::async_trait]
impl AssetSource for HttpUpstream {
    #[tracing::instrument(skip(self, config), fields(folder_id = %config.folder_id))]
    async fn folder_children(&self, config: &FrameIoConfig) -> Result<Vec<Asset>, FetchError> {
        let url = self.children_url(&config.folder_id);
        let request = RequestBuilder::new(Method::Get, url)
            .header(AUTHORIZATION, format!("Bearer {}", config.token))
            .build();

        let mut res = self.client.send(request).await.map_err(transport)?;
        let status = res.status();
        tracing::debug!(status = %status, "Frame.io responded");

        if !status.is_success() {
            let body = res.body_bytes().await.map_err(transport)?;
            return Err(FetchError::Upstream {
                status: status.into(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        res.body_json::<Vec<Asset>>().await.map_err(transport)
    }
}

#[async_trait::async_trait]
impl ImageFetcher for HttpUpstream {
    #[tracing::instrument(skip(self))]
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let mut url = Url::parse(url).map_err(|err| FetchError::Transport(err.to_string()))?;
        let mut hops = 0;

        // One request per hop; the Frame.io listing never follows redirects.
        let mut res = loop {
            let request = RequestBuilder::new(Method::Get, url.clone()).build();
            let res = self.client.send(request).await.map_err(transport)?;

            let location = match header(&res, LOCATION) {
                Some(location) if is_redirect(res.status()) => location,
                _ => break res,
            };
            if hops == MAX_REDIRECTS {
                return Err(FetchError::Transport(format!(
                    "more than {} redirects",
                    MAX_REDIRECTS
                )));
            }
            hops += 1;

            url = url
                .join(&location)
                .map_err(|err| FetchError::Transport(err.to_string()))?;
            tracing::debug!(%url, hops, "Following image redirect");
        };
        let status = res.status();

        if !status.is_success() {
            return Err(FetchError::Upstream {
                status: status.into(),
                body: String::new(),
            });
        }

        let bytes = res.body_bytes().await.map_err(transport)?;
        Ok(FetchedImage {
            bytes,
            content_type: header(&res, CONTENT_TYPE),
            cache_control: header(&res, CACHE_CONTROL),
        })
    }
}
