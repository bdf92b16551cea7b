use feed_rs::model::Entry;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// Where a representative image was found, in strategy order. RSS
/// enclosures and Media-RSS content both arrive normalized into the entry's
/// media list, so the structured strategies are one ordered scan of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Media(String),
    Thumbnail(String),
    Embedded(String),
    None,
}

impl ImageSource {
    pub fn into_url(self) -> Option<String> {
        match self {
            Self::Media(url) | Self::Thumbnail(url) | Self::Embedded(url) => Some(url),
            Self::None => None,
        }
    }
}

/// Best-effort image discovery for one raw entry. Every strategy is total;
/// no candidate anywhere yields `None`, never an error.
pub fn resolve_image(entry: &Entry) -> Option<String> {
    locate_image(entry).into_url()
}

fn locate_image(entry: &Entry) -> ImageSource {
    // Structured attachments with a declared image type.
    for media in &entry.media {
        for content in &media.content {
            let is_image = content
                .content_type
                .as_ref()
                .is_some_and(|ct| ct.to_string().starts_with("image/"));
            if is_image && let Some(url) = &content.url {
                return ImageSource::Media(url.to_string());
            }
        }
    }

    // Declared thumbnails.
    for media in &entry.media {
        if let Some(thumbnail) = media.thumbnails.first() {
            return ImageSource::Thumbnail(thumbnail.image.uri.clone());
        }
    }

    // First <img> inside the content body, else the summary.
    let embedded_html = entry
        .content
        .as_ref()
        .and_then(|content| content.body.as_deref())
        .or_else(|| entry.summary.as_ref().map(|text| text.content.as_str()));
    match embedded_html.and_then(first_img_src) {
        Some(src) => ImageSource::Embedded(src),
        None => ImageSource::None,
    }
}

fn first_img_src(html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&IMG_SELECTOR)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
}
