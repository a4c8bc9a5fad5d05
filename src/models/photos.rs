use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Shown in place of any image that fails to load.
pub const FALLBACK_IMAGE: &str = "/static/photo-portfolio-bg.jpg";
pub const DEFAULT_ALT: &str = "Frame.io photo";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Humans,
    Nature,
    EverythingElse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    All,
    Only(Category),
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::All,
        Tab::Only(Category::Humans),
        Tab::Only(Category::Nature),
        Tab::Only(Category::EverythingElse),
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Only(Category::Humans) => "humans",
            Tab::Only(Category::Nature) => "nature",
            Tab::Only(Category::EverythingElse) => "everything-else",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Only(Category::Humans) => "Humans",
            Tab::Only(Category::Nature) => "Nature",
            Tab::Only(Category::EverythingElse) => "Everything Else",
        }
    }

    /// Unknown or missing keys select every photo.
    pub fn from_key(key: Option<&str>) -> Tab {
        key.and_then(|key| Tab::ALL.iter().copied().find(|tab| tab.key() == key))
            .unwrap_or(Tab::All)
    }

    pub fn filter<'a>(&self, photos: &'a [Photo]) -> Vec<&'a Photo> {
        photos
            .iter()
            .filter(|photo| match self {
                Tab::All => true,
                Tab::Only(category) => photo.category == *category,
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub src: String,
    pub alt: String,
    pub category: Category,
}

impl Photo {
    fn local(src: &str, alt: &str, category: Category) -> Self {
        Photo {
            src: src.to_string(),
            alt: alt.to_string(),
            category,
        }
    }

    /// Remote images are routed through the image proxy.
    pub fn display_src(&self) -> String {
        if self.src.starts_with("http") {
            format!(
                "/api/proxy-image?url={}",
                utf8_percent_encode(&self.src, URI_COMPONENT)
            )
        } else {
            self.src.clone()
        }
    }
}

impl From<frame_gallery_api_structs::Photo> for Photo {
    fn from(p: frame_gallery_api_structs::Photo) -> Self {
        let alt = Some(p.alt)
            .filter(|alt| !alt.is_empty())
            .or(p.name.filter(|name| !name.is_empty()))
            .unwrap_or_else(|| DEFAULT_ALT.to_string());

        Photo {
            src: p.src,
            alt,
            category: Category::EverythingElse,
        }
    }
}

/// Photos shown when Frame.io is unavailable or the folder is empty.
pub fn fallback_photos() -> Vec<Photo> {
    vec![
        Photo::local(
            "/static/photo-portfolio-bg.jpg",
            "Portrait with red scarf",
            Category::Humans,
        ),
        Photo::local(
            "/static/photo-portfolio-bg-2.jpg",
            "Woman seated on floor",
            Category::Humans,
        ),
        Photo::local("/static/bgImg.jpg", "Model leaning against wall", Category::Humans),
        Photo::local(
            "/static/photo-portfolio-bg-2.jpg",
            "Editorial pose",
            Category::EverythingElse,
        ),
    ]
}

/// Position of the lightbox within a list of `len` photos.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightboxPosition {
    pub current: usize,
    pub previous: usize,
    pub next: usize,
}

impl LightboxPosition {
    /// Any index wraps around the list; `None` if the list is empty.
    pub fn new(index: i64, len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }

        let total = len as i64;
        let current = index.rem_euclid(total);
        Some(LightboxPosition {
            current: current as usize,
            previous: ((current - 1 + total) % total) as usize,
            next: ((current + 1) % total) as usize,
        })
    }
}
