use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};

use crate::{
    app_state::AppState,
    news::dtos::{ErrorResponse, MessageResponse, NewsItemResponse, WelcomeResponse},
};

/// How many entries the read endpoint returns.
const LATEST_NEWS_LIMIT: i64 = 5;

const EMPTY_STORE_MESSAGE: &str =
    "Наразі немає новин у базі даних. Зачекайте, поки RSS парсер завантажить нові новини.";

#[utoipa::path(
    get,
    path = "/",
    tag = "news",
    responses((status = 200, description = "Service banner", body = WelcomeResponse))
)]
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to News API".to_string(),
        status: "running".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/news",
    tag = "news",
    responses(
        (status = 200, description = "Most recent entries", body = [NewsItemResponse]),
        (status = 404, description = "Store is empty", body = MessageResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn latest_news(State(state): State<AppState>) -> Response {
    info!("fetching latest news");
    match state.news_store.latest(LATEST_NEWS_LIMIT).await {
        Ok(items) if items.is_empty() => {
            warn!("no news items found in store");
            (
                StatusCode::NOT_FOUND,
                Json(MessageResponse {
                    message: EMPTY_STORE_MESSAGE.to_string(),
                }),
            )
                .into_response()
        }
        Ok(items) => {
            info!(count = items.len(), "retrieved news items");
            let body: Vec<NewsItemResponse> =
                items.into_iter().map(NewsItemResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => {
            error!(%error, "failed to fetch news");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Помилка при отриманні новин: {error}"),
                }),
            )
                .into_response()
        }
    }
}
