use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::NewsItem;

/// Wire shape of one stored entry: `pubDate` rendered as ISO-8601 text, the
/// internal row id omitted.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsItemResponse {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
    pub image: Option<String>,
}

impl From<NewsItem> for NewsItemResponse {
    fn from(item: NewsItem) -> Self {
        Self {
            title: item.title,
            link: item.link,
            description: item.description,
            pub_date: item.pub_date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            image: item.image,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn renders_pub_date_as_iso8601_camel_case() {
        let response = NewsItemResponse::from(NewsItem {
            title: "t".to_string(),
            link: "http://x/1".to_string(),
            description: "d".to_string(),
            pub_date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap(),
            image: None,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["pubDate"], "2024-03-01T13:00:00");
        assert_eq!(json["image"], serde_json::Value::Null);
        assert!(json.get("id").is_none());
    }
}
