use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A normalized feed entry, the unit of persistence.
///
/// Created once by the parser, checked and possibly inserted by the store,
/// never mutated afterward. `pub_date` is a civil timestamp: the instant has
/// already been converted into the fixed target zone and the offset dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: NaiveDateTime,
    pub image: Option<String>,
}
