use std::path::Path;

pub mod api;
pub mod html;

pub(super) fn mount(app: &mut tide::Server<crate::State>, static_path: &Path) {
    html::mount(app);
    api::mount(app.at("/api"));

    if static_path.is_dir() {
        if let Err(err) = app.at("/static").serve_dir(static_path) {
            tracing::warn!(path = %static_path.display(), error = %err, "Not serving static files");
        }
    } else {
        tracing::warn!(path = %static_path.display(), "Static directory missing, not serving /static");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use tide::http::{Method, Request, Response, Url};

    use crate::config::{FrameIoConfig, MissingConfig};
    use crate::lister::PhotoLister;
    use crate::proxy::ImageProxy;
    use crate::upstream::fake::FakeUpstream;
    use crate::State;

    pub(crate) fn configured() -> Result<FrameIoConfig, MissingConfig> {
        FrameIoConfig::from_parts(Some("tok".to_string()), Some("folder-1".to_string()))
    }

    pub(crate) fn templates() -> tera::Tera {
        let mut tera = tera::Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("gallery.html", include_str!("../../templates/gallery.html")),
            ("photo.html", include_str!("../../templates/photo.html")),
        ])
        .unwrap();
        tera
    }

    pub(crate) fn app(
        upstream: Arc<FakeUpstream>,
        config: Result<FrameIoConfig, MissingConfig>,
    ) -> tide::Server<State> {
        let state = State {
            lister: Arc::new(PhotoLister::new(upstream.clone(), config)),
            proxy: Arc::new(ImageProxy::new(upstream)),
            tera: Arc::new(templates()),
            cache_busting_string: Some("test".to_string()),
        };

        let mut app = tide::with_state(state);
        super::mount(&mut app, std::path::Path::new("./does-not-exist"));
        app
    }

    pub(crate) async fn get(app: &tide::Server<State>, path: &str) -> Response {
        let url = Url::parse(&format!("http://localhost{}", path)).unwrap();
        app.respond(Request::new(Method::Get, url)).await.unwrap()
    }
}
