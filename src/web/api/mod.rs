pub mod frameio;
pub mod proxy;
pub mod utils;

pub(super) fn mount(mut route: tide::Route<crate::State>) {
    route.at("/frameio/photos").get(frameio::list_photos);
    route.at("/proxy-image").get(proxy::proxy_image);
}
