use serde::{Deserialize, Serialize};
use tide::http::StatusCode;
use tide::{Request, Response};

use crate::models::photos::{fallback_photos, LightboxPosition, Photo, Tab, FALLBACK_IMAGE};

mod utils;

pub(in super::super) fn mount(route: &mut tide::Server<crate::State>) {
    route.at("/").get(gallery);
    route.at("/photo/:index").get(lightbox);
}

#[derive(Default, Deserialize, Serialize)]
#[serde(default)]
struct GalleryQueryParams {
    tab: Option<String>,
}

impl GalleryQueryParams {
    fn for_tab(tab: Tab) -> Result<String, serde_qs::Error> {
        serde_qs::to_string(&GalleryQueryParams {
            tab: Some(tab.key().to_string()),
        })
    }
}

#[derive(Serialize)]
struct TabLink {
    key: &'static str,
    display: &'static str,
    href: String,
    selected: bool,
}

#[derive(Serialize)]
struct PhotoCard {
    src: String,
    alt: String,
    href: String,
}

/// Frame.io photos, or the built-in set when Frame.io has nothing to show.
async fn load_photos(state: &crate::State) -> Vec<Photo> {
    match state.lister.list().await {
        Ok(photos) if !photos.is_empty() => photos.into_iter().map(Photo::from).collect(),
        Ok(_) => {
            tracing::info!("Frame.io folder is empty, showing fallback photos");
            fallback_photos()
        },
        Err(err) => {
            tracing::warn!(error = %err, "Frame.io unavailable, showing fallback photos");
            fallback_photos()
        },
    }
}

fn selected_tab(req: &Request<crate::State>) -> tide::Result<Tab> {
    let query: GalleryQueryParams = req.query()?;
    Ok(Tab::from_key(query.tab.as_deref()))
}

async fn gallery(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();
    let selected = selected_tab(&req)?;

    let photos = load_photos(state).await;
    let tab_qs = GalleryQueryParams::for_tab(selected)?;

    let tabs = Tab::ALL
        .iter()
        .map(|tab| {
            Ok(TabLink {
                key: tab.key(),
                display: tab.display(),
                href: format!("/?{}", GalleryQueryParams::for_tab(*tab)?),
                selected: *tab == selected,
            })
        })
        .collect::<Result<Vec<_>, serde_qs::Error>>()?;

    let cards: Vec<_> = selected
        .filter(&photos)
        .into_iter()
        .enumerate()
        .map(|(index, photo)| PhotoCard {
            src: photo.display_src(),
            alt: photo.alt.clone(),
            href: format!("/photo/{}?{}", index, tab_qs),
        })
        .collect();

    let mut context = tera::Context::new();
    context.insert("cache_buster", &state.cache_busting_string);
    context.insert("title", selected.display());
    context.insert("tabs", &tabs);
    context.insert("photos", &cards);
    context.insert("fallback_src", FALLBACK_IMAGE);

    Ok(utils::page(state, "gallery.html", &context)?)
}

async fn lightbox(req: Request<crate::State>) -> tide::Result<Response> {
    let state = req.state();

    let index: i64 = match req.param("index")?.parse() {
        Ok(index) => index,
        Err(_) => return Ok(Response::builder(StatusCode::NotFound).build()),
    };
    let selected = selected_tab(&req)?;

    let photos = load_photos(state).await;
    let list = selected.filter(&photos);
    let position = match LightboxPosition::new(index, list.len()) {
        Some(position) => position,
        None => return Ok(Response::builder(StatusCode::NotFound).build()),
    };
    let photo = list[position.current];
    let tab_qs = GalleryQueryParams::for_tab(selected)?;

    let mut context = tera::Context::new();
    context.insert("cache_buster", &state.cache_busting_string);
    context.insert("title", &photo.alt);
    context.insert(
        "photo",
        &PhotoCard {
            src: photo.display_src(),
            alt: photo.alt.clone(),
            href: format!("/photo/{}?{}", position.current, tab_qs),
        },
    );
    context.insert("position", &(position.current + 1));
    context.insert("total", &list.len());
    context.insert(
        "previous_href",
        &format!("/photo/{}?{}", position.previous, tab_qs),
    );
    context.insert("next_href", &format!("/photo/{}?{}", position.next, tab_qs));
    context.insert("close_href", &format!("/?{}", tab_qs));
    context.insert("fallback_src", FALLBACK_IMAGE);

    Ok(utils::page(state, "photo.html", &context)?)
}
