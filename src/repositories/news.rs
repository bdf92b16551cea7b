use crate::entities::NewsItem;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Store operations the ingester and the read API share. Split into a trait
/// so handlers can be tested against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Insert the entry unless one with the same `link` is already stored.
    /// Returns whether an insert happened.
    async fn persist_if_new(&self, item: &NewsItem) -> Result<bool>;

    async fn find_by_link(&self, link: &str) -> Result<Option<NewsItem>>;

    /// Most recent entries first, by publication timestamp.
    async fn latest(&self, limit: i64) -> Result<Vec<NewsItem>>;

    /// Bulk reset. Only called at controlled process initialization, never
    /// during steady-state operation.
    async fn clear_all(&self) -> Result<u64>;

    async fn ping(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct NewsRepository {
    pool: SqlitePool,
}

impl NewsRepository {
    /// Open the store and run migrations. Failure here is the one fatal
    /// condition in the system: callers exit instead of retrying.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("connected to news store");
        Ok(Self { pool })
    }
}

#[async_trait]
impl NewsStore for NewsRepository {
    async fn persist_if_new(&self, item: &NewsItem) -> Result<bool> {
        // Existence check and insert are two statements: a second ingester
        // racing this one can double-insert. Accepted for the single-poller
        // deployment; the atomic replacement would be INSERT .. ON CONFLICT
        // keyed on link.
        if self.find_by_link(&item.link).await?.is_some() {
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO news_items (title, link, description, pub_date, image)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&item.title)
        .bind(&item.link)
        .bind(&item.description)
        .bind(item.pub_date)
        .bind(&item.image)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    async fn find_by_link(&self, link: &str) -> Result<Option<NewsItem>> {
        let item = sqlx::query_as::<_, NewsItem>(
            r#"
            SELECT title, link, description, pub_date, image
            FROM news_items
            WHERE link = ?1
            "#,
        )
        .bind(link)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn latest(&self, limit: i64) -> Result<Vec<NewsItem>> {
        let items = sqlx::query_as::<_, NewsItem>(
            r#"
            SELECT title, link, description, pub_date, image
            FROM news_items
            ORDER BY pub_date DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn clear_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM news_items")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(link: &str, day: u32) -> NewsItem {
        NewsItem {
            title: format!("Новина {day}"),
            link: link.to_string(),
            description: "опис".to_string(),
            pub_date: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            image: None,
        }
    }

    async fn memory_repo() -> NewsRepository {
        NewsRepository::connect("sqlite::memory:")
            .await
            .expect("in-memory store must open")
    }

    #[tokio::test]
    async fn persist_if_new_inserts_then_dedups_by_link() {
        let repo = memory_repo().await;

        let inserted = repo.persist_if_new(&item("http://x/1", 1)).await.unwrap();
        let duplicate = repo.persist_if_new(&item("http://x/1", 2)).await.unwrap();

        assert!(inserted);
        assert!(!duplicate);
        let stored = repo.find_by_link("http://x/1").await.unwrap().unwrap();
        assert_eq!(stored.title, "Новина 1");
    }

    #[tokio::test]
    async fn find_by_link_misses_cleanly() {
        let repo = memory_repo().await;
        assert!(repo.find_by_link("http://x/none").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn latest_sorts_descending_and_limits() {
        let repo = memory_repo().await;
        for day in 1..=7 {
            repo.persist_if_new(&item(&format!("http://x/{day}"), day))
                .await
                .unwrap();
        }

        let latest = repo.latest(5).await.unwrap();

        assert_eq!(latest.len(), 5);
        assert_eq!(latest[0].link, "http://x/7");
        assert_eq!(latest[4].link, "http://x/3");
    }

    #[tokio::test]
    async fn clear_all_empties_the_store() {
        let repo = memory_repo().await;
        repo.persist_if_new(&item("http://x/1", 1)).await.unwrap();
        repo.persist_if_new(&item("http://x/2", 2)).await.unwrap();

        let removed = repo.clear_all().await.unwrap();

        assert_eq!(removed, 2);
        assert!(repo.latest(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ping_succeeds_on_an_open_store() {
        let repo = memory_repo().await;
        repo.ping().await.unwrap();
    }

    #[tokio::test]
    async fn round_trips_every_field() {
        let repo = memory_repo().await;
        let original = NewsItem {
            title: "Заголовок".to_string(),
            link: "http://x/full".to_string(),
            description: "чистий текст".to_string(),
            pub_date: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap(),
            image: Some("http://img.example/a.jpg".to_string()),
        };

        repo.persist_if_new(&original).await.unwrap();
        let stored = repo.find_by_link("http://x/full").await.unwrap().unwrap();

        assert_eq!(stored, original);
    }
}
