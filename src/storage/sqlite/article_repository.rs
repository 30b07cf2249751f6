use rusqlite::Row;

use crate::domain::ArticleRecord;
use crate::errors::{FeedError, FeedResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::{ArticleStore, RowFilter};

const COLUMNS: &str = "day, feed_title, source_url, title, published, description, urls";

pub struct SqliteArticleRepository {
    storage: SqliteStorage,
}

impl SqliteArticleRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ArticleRecord> {
        let urls: String = row.get(6)?;

        Ok(ArticleRecord {
            day: row.get(0)?,
            feed_title: row.get(1)?,
            source_url: row.get(2)?,
            title: row.get(3)?,
            published: row.get(4)?,
            description: row.get(5)?,
            urls: ArticleRecord::urls_from_joined(&urls),
        })
    }
}

impl ArticleStore for SqliteArticleRepository {
    fn has_title(&self, title: &str) -> FeedResult<bool> {
        let conn = self.storage.connection()?;
        let tx = conn.unchecked_transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM cached_news WHERE title = ?1)",
            [title],
            |row| row.get(0),
        )?;

        tx.commit()?;
        Ok(exists)
    }

    fn insert(&self, record: &ArticleRecord) -> FeedResult<()> {
        let conn = self.storage.connection()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO cached_news (day, feed_title, source_url, title, published, description, urls) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            (
                &record.day,
                &record.feed_title,
                &record.source_url,
                &record.title,
                &record.published,
                &record.description,
                record.urls_joined(),
            ),
        )?;

        tx.commit()?;
        Ok(())
    }

    fn fetch(&self, filter: Option<RowFilter>) -> FeedResult<Vec<ArticleRecord>> {
        let conn = self.storage.connection()?;
        let tx = conn.unchecked_transaction()?;

        let records = match filter {
            Some(filter) => {
                // column names come from the FilterKey allow-list, never
                // from user input
                let query = format!(
                    "SELECT {} FROM cached_news WHERE {} LIKE ?1 ORDER BY rowid",
                    COLUMNS,
                    filter.key.column()
                );
                let mut stmt = tx.prepare(&query)?;
                let pattern = format!("%{}%", filter.value);
                let rows = stmt.query_map([pattern], Self::record_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()
            }
            None => {
                let query = format!("SELECT {} FROM cached_news ORDER BY rowid", COLUMNS);
                let mut stmt = tx.prepare(&query)?;
                let rows = stmt.query_map([], Self::record_from_row)?;
                rows.collect::<Result<Vec<_>, _>>()
            }
        }
        .map_err(FeedError::from)?;

        tx.commit()?;
        Ok(records)
    }
}
