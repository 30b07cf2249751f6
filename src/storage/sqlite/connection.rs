use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::errors::{FeedError, FeedResult};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cached_news (
    day TEXT NOT NULL,
    feed_title TEXT NOT NULL,
    source_url TEXT NOT NULL,
    title TEXT NOT NULL,
    published TEXT NOT NULL,
    description TEXT NOT NULL,
    urls TEXT NOT NULL
);
"#;

/// Shared handle to the run's single database connection. Acquired
/// once per run; RAII drop releases it on every exit path.
#[derive(Clone)]
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> FeedResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> FeedResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>, FeedError> {
        self.conn
            .lock()
            .map_err(|_| FeedError::Database(rusqlite::Error::InvalidQuery))
    }
}
