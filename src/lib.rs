use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use opentelemetry_tide::TideExt;
use structopt::StructOpt;
use url::Url;

pub mod config;
pub mod lister;
pub mod models;
pub mod proxy;
pub mod telemetry;
pub mod upstream;
pub mod web;

use crate::config::FrameIoConfig;
use crate::lister::PhotoLister;
use crate::proxy::ImageProxy;
use crate::upstream::http::HttpUpstream;

#[derive(Clone)]
pub struct State {
    pub lister: Arc<PhotoLister>,
    pub proxy: Arc<ImageProxy>,
    pub tera: Arc<tera::Tera>,
    pub cache_busting_string: Option<String>,
}

#[derive(Debug)]
pub enum Error {
    TemplatePathError(std::io::Error),
    TemplateParseError(tera::Error),
    TelemetryInitError(anyhow::Error),
    HttpClientInitError(anyhow::Error),
    ListenError(std::io::Error),
}

impl From<Error> for u8 {
    fn from(error: Error) -> u8 {
        match error {
            Error::TemplatePathError(_) => 2,
            Error::TemplateParseError(_) => 3,
            Error::TelemetryInitError(_) => 4,
            Error::HttpClientInitError(_) => 5,
            Error::ListenError(_) => 6,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TemplatePathError(err) => {
                write!(f, "Template path error: {}", err)
            },
            Error::TemplateParseError(err) => {
                write!(f, "Template parsing error: {}", err)
            },
            Error::TelemetryInitError(err) => {
                write!(f, "Failed to init telemetry: {}", err)
            },
            Error::HttpClientInitError(err) => {
                write!(f, "Failed to init HTTP client: {}", err)
            },
            Error::ListenError(err) => {
                write!(f, "Failed to start server: {}", err)
            },
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Args {
    /// Host address to bind to.
    #[structopt(long, default_value = "localhost", env = "FRAME_GALLERY_BIND_ADDRESS")]
    address: String,
    /// Port to bind to.
    #[structopt(long, default_value = "8166", env = "FRAME_GALLERY_BIND_PORT")]
    port: u16,

    /// Frame.io API token.
    #[structopt(long, env = "FRAME_IO_TOKEN", hide_env_values = true)]
    frameio_token: Option<String>,
    /// Frame.io folder holding the gallery photos.
    #[structopt(long, env = "FRAME_IO_FOLDER_ID")]
    frameio_folder_id: Option<String>,
    /// Frame.io API base URL.
    #[structopt(
        long,
        default_value = "https://api.frame.io/v2",
        env = "FRAME_GALLERY_FRAME_IO_API_URL"
    )]
    frameio_api_url: Url,

    /// Timeout in seconds for requests to Frame.io and proxied image hosts
    #[structopt(long, default_value = "30", env = "FRAME_GALLERY_UPSTREAM_TIMEOUT")]
    upstream_timeout: u64,

    /// Path to Tera templates directory
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "./templates",
        env = "FRAME_GALLERY_TEMPLATE_PATH"
    )]
    template_path: std::path::PathBuf,

    /// Directory served under /static
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "./public",
        env = "FRAME_GALLERY_STATIC_PATH"
    )]
    static_path: std::path::PathBuf,
}

pub async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let args = Args::from_args();

    telemetry::init().map_err(Error::TelemetryInitError)?;

    let upstream = Arc::new(
        HttpUpstream::new(
            args.frameio_api_url.clone(),
            Duration::from_secs(args.upstream_timeout),
        )
        .map_err(Error::HttpClientInitError)?,
    );

    let frameio_config =
        FrameIoConfig::from_parts(args.frameio_token.clone(), args.frameio_folder_id.clone());
    if let Err(ref err) = frameio_config {
        tracing::warn!(error = %err, "Frame.io is not configured, photo listing will fail");
    }

    let template_path = args
        .template_path
        .canonicalize()
        .map_err(Error::TemplatePathError)?;
    let tera = match tera::Tera::new(&template_path.join("**/*.html").to_string_lossy()) {
        Ok(t) => t,
        Err(e) => {
            return Err(Error::TemplateParseError(e));
        },
    };

    let cache_busting_string = match std::fs::File::open(template_path.join("cache-buster")) {
        Ok(mut file) => {
            let mut data = String::new();
            match file.read_to_string(&mut data) {
                Ok(_) => data.split_whitespace().next().map(|s| s.to_string()),
                Err(err) => {
                    tracing::warn!(error = %err, "Couldn't read cache busting string");
                    None
                },
            }
        },
        Err(_) => None,
    };

    let state = State {
        lister: Arc::new(PhotoLister::new(upstream.clone(), frameio_config)),
        proxy: Arc::new(ImageProxy::new(upstream)),
        tera: Arc::new(tera),
        cache_busting_string,
    };
    let mut app = tide::with_state(state);

    app.with_default_tracing_middleware();

    web::mount(&mut app, &args.static_path);

    let address: &str = args.address.as_ref();
    tracing::info!(address, port = args.port, "Listening");
    app.listen((address, args.port))
        .await
        .map_err(Error::ListenError)?;

    Ok(())
}
