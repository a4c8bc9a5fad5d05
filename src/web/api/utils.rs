use std::convert::TryFrom;

use tide::http::StatusCode;
use tide::{Body, Response};

use frame_gallery_api_structs::ErrorBody;

pub fn error_response(status: StatusCode, error: impl Into<String>) -> tide::Result<Response> {
    let body = ErrorBody {
        error: error.into(),
    };

    Ok(Response::builder(status)
        .body(Body::from_json(&body)?)
        .build())
}

/// `http_types::StatusCode` is a closed enum of registered codes, so an
/// unregistered upstream status (e.g. 599) can't be forwarded and is
/// reported as a bad gateway instead.
pub fn upstream_status(status: u16) -> StatusCode {
    StatusCode::try_from(status).unwrap_or(StatusCode::BadGateway)
}
