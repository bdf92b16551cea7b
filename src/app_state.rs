use crate::repositories::{NewsRepository, NewsStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub news_store: Arc<dyn NewsStore>,
}

impl AppState {
    pub fn new(repository: NewsRepository) -> Self {
        Self {
            news_store: Arc::new(repository),
        }
    }
}
