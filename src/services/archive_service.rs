use tracing::{debug, info};

use crate::domain::StagingCache;
use crate::errors::FeedResult;
use crate::storage::traits::{ArticleStore, RowFilter};

/// Moves records between the staging cache and the durable store.
pub struct ArchiveService<S: ArticleStore> {
    store: S,
}

impl<S: ArticleStore> ArchiveService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist the oldest staged record. The record leaves the cache
    /// whether or not it is inserted; a row with the same title
    /// already in the store suppresses the insert. Returns whether a
    /// row was written.
    pub fn persist_one(&self, cache: &mut StagingCache) -> FeedResult<bool> {
        let Some(record) = cache.pop_oldest() else {
            return Ok(false);
        };

        if self.store.has_title(&record.title)? {
            debug!(title = %record.title, "duplicate title, not re-inserting");
            return Ok(false);
        }

        self.store.insert(&record)?;
        Ok(true)
    }

    /// Drain the cache into the store, one record at a time.
    pub fn persist_all(&self, cache: &mut StagingCache) -> FeedResult<usize> {
        let mut inserted = 0;
        while !cache.is_empty() {
            if self.persist_one(cache)? {
                inserted += 1;
            }
        }
        info!(inserted, "staged records persisted");
        Ok(inserted)
    }

    /// Read rows back from the store, optionally filtered, and stage
    /// them in row order. Returns how many were staged.
    pub fn load_cached(
        &self,
        cache: &mut StagingCache,
        filter: Option<&RowFilter>,
    ) -> FeedResult<usize> {
        let records = self.store.fetch(filter.cloned())?;
        let count = records.len();
        for record in records {
            cache.append(record);
        }
        debug!(count, "cached records staged");
        Ok(count)
    }
}
