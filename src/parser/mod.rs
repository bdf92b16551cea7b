use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use thiserror::Error;

use crate::entities::NewsItem;
use crate::normalizer::{
    date::{self, DateSource},
    image, text,
};

/// Placeholder stored when a feed item carries no title at all.
const TITLE_PLACEHOLDER: &str = "Без заголовку";

/// Trailing site attribution some sources append to every headline.
const ATTRIBUTION_SUFFIX: &str = "Радіо Свобода";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("feed parse error: {0}")]
    Syntax(#[from] feed_rs::parser::ParseFeedError),
}

/// Turn fetched feed bytes into canonical entries.
///
/// A structural failure of the document is an error; the caller treats it,
/// like an empty entry list, as "this source is unusable for the cycle".
/// Individual items never fail: every normalization step has a total
/// fallback, so a malformed item degrades field by field instead.
pub fn parse_entries(bytes: &[u8], now: DateTime<Utc>) -> Result<Vec<NewsItem>, ParseError> {
    let feed = feed_rs::parser::parse(bytes)?;
    Ok(feed
        .entries
        .iter()
        .map(|entry| canonicalize(entry, now))
        .collect())
}

fn canonicalize(entry: &Entry, now: DateTime<Utc>) -> NewsItem {
    let title = entry
        .title
        .as_ref()
        .map(|title| strip_attribution_suffix(&title.content))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    // An entry without a link keeps an empty key: all such entries share it,
    // so only the first ever reaches the store. Inherited upstream behavior.
    let link = entry
        .links
        .first()
        .map(|link| link.href.clone())
        .unwrap_or_default();

    let description = entry
        .summary
        .as_ref()
        .map(|summary| text::strip_markup(&summary.content))
        .unwrap_or_default();

    let pub_date = date::normalize(DateSource::select(entry.published, entry.updated), now);
    let image = image::resolve_image(entry);

    NewsItem {
        title,
        link,
        description,
        pub_date,
        image,
    }
}

fn strip_attribution_suffix(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(stripped) = trimmed.strip_suffix(ATTRIBUTION_SUFFIX) else {
        return trimmed.to_string();
    };
    stripped
        .trim_end_matches([' ', '-', '\u{2013}', '\u{2014}'])
        .to_string()
}
