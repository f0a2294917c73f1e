//! SQLite persistence for the filtered batch.
//!
//! Two tables, `news` and `wiki`, hold exactly one batch: ingest deletes
//! the previous day's rows and inserts the new batch inside a single
//! transaction, so readers never observe a partial batch.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use tokio::time::Duration;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::TARGET_DB;

/// One row of the `news` table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsRecord {
    pub date: String,
    pub news_id: i64,
    pub headline: String,
    pub news: String,
    /// Headline text with matched entities wrapped in highlight markup.
    pub news_dis: String,
    pub news_image: String,
    pub news_url: String,
}

/// One row of the `wiki` table.
#[derive(Debug, Clone, PartialEq)]
pub struct WikiRecord {
    pub date: String,
    pub news_id: i64,
    pub entity: String,
    pub title: String,
    pub wiki: String,
    pub wiki_url: String,
    pub wiki_image: String,
}

#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if missing) the database file and initialize the
    /// schema.
    pub async fn new(database_path: &str) -> Result<Self> {
        info!(target: TARGET_DB, "creating database pool for {}", database_path);

        if let Some(parent) = Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let connect_options = SqliteConnectOptions::from_str(&format!("sqlite://{}", database_path))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .synchronous(SqliteSynchronous::Normal);

        Self::connect(connect_options).await
    }

    /// In-memory database, used by tests.
    pub async fn in_memory() -> Result<Self> {
        let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        Self::connect(connect_options).await
    }

    async fn connect(connect_options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;

        let db = Database { pool };
        db.initialize_schema().await?;
        Ok(db)
    }

    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS news (
                date TEXT NOT NULL,
                news_id INTEGER NOT NULL,
                headline TEXT NOT NULL,
                news TEXT NOT NULL,
                news_dis TEXT NOT NULL,
                news_image TEXT NOT NULL,
                news_url TEXT NOT NULL,
                PRIMARY KEY (date, news_id)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS wiki (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                news_id INTEGER NOT NULL,
                entity TEXT NOT NULL,
                title TEXT NOT NULL,
                wiki TEXT NOT NULL,
                wiki_url TEXT NOT NULL,
                wiki_image TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        debug!(target: TARGET_DB, "schema initialized");
        Ok(())
    }

    /// Replace the previous batch with a new one. Deletes and inserts run
    /// in one transaction; no partial batch is ever visible.
    pub async fn replace_batch(&self, news: &[NewsRecord], wiki: &[WikiRecord]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM wiki").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM news").execute(&mut *tx).await?;

        for record in news {
            sqlx::query(
                "INSERT INTO news (date, news_id, headline, news, news_dis, news_image, news_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(&record.date)
            .bind(record.news_id)
            .bind(&record.headline)
            .bind(&record.news)
            .bind(&record.news_dis)
            .bind(&record.news_image)
            .bind(&record.news_url)
            .execute(&mut *tx)
            .await?;
        }

        for record in wiki {
            sqlx::query(
                "INSERT INTO wiki (date, news_id, entity, title, wiki, wiki_url, wiki_image)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .bind(&record.date)
            .bind(record.news_id)
            .bind(&record.entity)
            .bind(&record.title)
            .bind(&record.wiki)
            .bind(&record.wiki_url)
            .bind(&record.wiki_image)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            target: TARGET_DB,
            "{} rows added to 'news' table, {} rows added to 'wiki' table",
            news.len(),
            wiki.len()
        );
        Ok(())
    }

    pub async fn news_count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn wiki_count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM wiki")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
