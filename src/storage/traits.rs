use crate::domain::ArticleRecord;
use crate::errors::FeedResult;

/// Columns the read filter may target. Keeping this an enum makes the
/// allow-list total: no other column name is expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Date,
    Source,
}

impl FilterKey {
    pub fn column(&self) -> &'static str {
        match self {
            FilterKey::Date => "day",
            FilterKey::Source => "source_url",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RowFilter {
    pub key: FilterKey,
    pub value: String,
}

impl RowFilter {
    pub fn new(key: FilterKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait ArticleStore: Send + Sync {
    fn has_title(&self, title: &str) -> FeedResult<bool>;
    fn insert(&self, record: &ArticleRecord) -> FeedResult<()>;
    fn fetch(&self, filter: Option<RowFilter>) -> FeedResult<Vec<ArticleRecord>>;
}
