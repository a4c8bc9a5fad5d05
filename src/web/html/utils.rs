use html_minifier::HTMLMinifier;
use tera::Context;
use thiserror::Error;
use tide::http::{mime, StatusCode};
use tide::Response;

use crate::State;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("rendering error")]
    Tera(#[from] tera::Error),
}

fn minify(rendered: String) -> String {
    let mut html_minifier = HTMLMinifier::new();
    if let Err(err) = html_minifier.digest(&rendered) {
        tracing::warn!(error = %err, "Failed to minify HTML, serving it as rendered");
        return rendered;
    }

    match std::str::from_utf8(html_minifier.get_html()) {
        Ok(minified) => minified.to_string(),
        Err(err) => {
            tracing::warn!(error = %err, "Minified HTML is not UTF-8, serving it as rendered");
            rendered
        },
    }
}

/// Renders `template` into a minified `200 OK` HTML page.
pub(super) fn page(
    state: &State,
    template: &'static str,
    context: &Context,
) -> Result<Response, TemplateError> {
    let body = minify(state.tera.render(template, context)?);

    Ok(Response::builder(StatusCode::Ok)
        .content_type(mime::HTML)
        .body(body)
        .build())
}
