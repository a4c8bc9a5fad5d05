use tide::http::StatusCode;
use tide::{Body, Request, Response};

use crate::lister::ListError;
use crate::upstream::FetchError;
use crate::web::api::utils::{error_response, upstream_status};
use frame_gallery_api_structs::PhotoList;

pub const MISSING_CONFIG_ERROR: &str = "Missing FRAME_IO_TOKEN or FRAME_IO_FOLDER_ID env vars";
pub const REQUEST_FAILED_ERROR: &str = "Frame.io request failed";
pub const UNREACHABLE_ERROR: &str = "Unable to reach Frame.io";

pub(super) async fn list_photos(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();

    match state.lister.list().await {
        Ok(photos) => Ok(Response::builder(StatusCode::Ok)
            .body(Body::from_json(&PhotoList { photos })?)
            .build()),
        Err(ListError::MissingConfig(err)) => {
            tracing::error!(error = %err, "Frame.io is not configured");
            error_response(StatusCode::InternalServerError, MISSING_CONFIG_ERROR)
        },
        Err(ListError::Fetch(FetchError::Upstream { status, body })) => {
            let error = if body.is_empty() {
                REQUEST_FAILED_ERROR.to_string()
            } else {
                body
            };
            error_response(upstream_status(status), error)
        },
        Err(ListError::Fetch(FetchError::Transport(_))) => {
            error_response(StatusCode::BadGateway, UNREACHABLE_ERROR)
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::FrameIoConfig;
    use crate::upstream::fake::{asset, FakeUpstream};
    use crate::web::tests::{app, configured, get};
    use frame_gallery_api_structs::{ErrorBody, Photo};

    #[async_std::test]
    async fn lists_photos_with_download_urls() {
        let upstream = Arc::new(FakeUpstream::new().with_assets(Ok(vec![
            asset("1", Some("first.jpg"), Some("https://cdn/1")),
            asset("2", Some("x"), None),
        ])));

        let mut res = get(&app(upstream, configured()), "/api/frameio/photos").await;

        assert_eq!(res.status(), StatusCode::Ok);
        let list: PhotoList = res.body_json().await.unwrap();
        assert_eq!(
            list.photos,
            vec![Photo {
                id: Some("1".to_string()),
                name: Some("first.jpg".to_string()),
                src: "https://cdn/1".to_string(),
                alt: "first.jpg".to_string(),
            }]
        );
    }

    #[async_std::test]
    async fn missing_config_is_a_server_error() {
        let upstream = Arc::new(FakeUpstream::new());
        let config = FrameIoConfig::from_parts(Some("tok".to_string()), None);

        let mut res = get(&app(upstream.clone(), config), "/api/frameio/photos").await;

        assert_eq!(res.status(), StatusCode::InternalServerError);
        let body: ErrorBody = res.body_json().await.unwrap();
        assert_eq!(body.error, MISSING_CONFIG_ERROR);
        assert_eq!(upstream.calls(), 0);
    }

    #[async_std::test]
    async fn upstream_rejection_keeps_status_and_body() {
        let upstream = Arc::new(FakeUpstream::new().with_assets(Err(FetchError::Upstream {
            status: 403,
            body: "forbidden".to_string(),
        })));

        let mut res = get(&app(upstream, configured()), "/api/frameio/photos").await;

        assert_eq!(res.status(), StatusCode::Forbidden);
        let body: ErrorBody = res.body_json().await.unwrap();
        assert_eq!(body.error, "forbidden");
    }

    #[async_std::test]
    async fn empty_rejection_body_gets_generic_message() {
        let upstream = Arc::new(FakeUpstream::new().with_assets(Err(FetchError::Upstream {
            status: 500,
            body: String::new(),
        })));

        let mut res = get(&app(upstream, configured()), "/api/frameio/photos").await;

        assert_eq!(res.status(), StatusCode::InternalServerError);
        let body: ErrorBody = res.body_json().await.unwrap();
        assert_eq!(body.error, REQUEST_FAILED_ERROR);
    }

    #[async_std::test]
    async fn transport_failure_is_bad_gateway() {
        let upstream = Arc::new(
            FakeUpstream::new()
                .with_assets(Err(FetchError::Transport("connection refused".to_string()))),
        );

        let mut res = get(&app(upstream, configured()), "/api/frameio/photos").await;

        assert_eq!(res.status(), StatusCode::BadGateway);
        let body: ErrorBody = res.body_json().await.unwrap();
        assert_eq!(body.error, UNREACHABLE_ERROR);
    }
}
