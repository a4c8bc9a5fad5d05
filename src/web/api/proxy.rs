use tide::http::headers::{CACHE_CONTROL, CONTENT_TYPE};
use tide::http::StatusCode;
use tide::{Request, Response};

use crate::proxy::ProxyError;
use crate::upstream::FetchError;
use crate::web::api::utils::{error_response, upstream_status};

pub const MISSING_URL_ERROR: &str = "Missing url";
pub const FETCH_FAILED_ERROR: &str = "Failed to fetch upstream image";

pub(super) async fn proxy_image(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();

    let url = req
        .url()
        .query_pairs()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned());

    match state.proxy.fetch(url.as_deref()).await {
        Ok(image) => Ok(Response::builder(StatusCode::Ok)
            .body(image.bytes)
            .header(CONTENT_TYPE, image.content_type)
            .header(CACHE_CONTROL, image.cache_control)
            .build()),
        Err(ProxyError::MissingUrl) => error_response(StatusCode::BadRequest, MISSING_URL_ERROR),
        Err(ProxyError::Fetch(FetchError::Upstream { status, .. })) => error_response(
            upstream_status(status),
            format!("Upstream error ({})", status),
        ),
        Err(ProxyError::Fetch(FetchError::Transport(_))) => {
            error_response(StatusCode::BadGateway, FETCH_FAILED_ERROR)
        },
    }
}
