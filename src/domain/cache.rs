use std::collections::VecDeque;

use super::ArticleRecord;

/// Run-scoped staging area for extracted records, shared by the render
/// and persist phases. Strictly FIFO: records leave in the order they
/// were staged.
#[derive(Debug, Default)]
pub struct StagingCache {
    records: VecDeque<ArticleRecord>,
}

impl StagingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: ArticleRecord) {
        self.records.push_back(record);
    }

    pub fn pop_oldest(&mut self) -> Option<ArticleRecord> {
        self.records.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// View of the first `limit` records. `None` and negative limits
    /// mean unlimited; zero selects nothing.
    pub fn limited(&self, limit: Option<i64>) -> Vec<&ArticleRecord> {
        match limit {
            Some(n) if n >= 0 => self.records.iter().take(n as usize).collect(),
            _ => self.records.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleUrl, UrlKind};

    fn record(title: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            urls: vec![ArticleUrl::new("http://a.com", UrlKind::Link)],
            published: "2022-06-03 05:50:03".to_string(),
            day: "2022-06-03".to_string(),
            description: String::new(),
            source_url: "http://feed".to_string(),
            feed_title: "Feed".to_string(),
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut cache = StagingCache::new();
        cache.append(record("first"));
        cache.append(record("second"));

        assert_eq!(cache.pop_oldest().unwrap().title, "first");
        assert_eq!(cache.pop_oldest().unwrap().title, "second");
        assert!(cache.pop_oldest().is_none());
    }

    #[test]
    fn test_limited_views() {
        let mut cache = StagingCache::new();
        for i in 0..4 {
            cache.append(record(&format!("r{}", i)));
        }

        assert_eq!(cache.limited(None).len(), 4);
        assert_eq!(cache.limited(Some(-1)).len(), 4);
        assert_eq!(cache.limited(Some(2)).len(), 2);
        assert!(cache.limited(Some(0)).is_empty());

        let first_two = cache.limited(Some(2));
        assert_eq!(first_two[0].title, "r0");
        assert_eq!(first_two[1].title, "r1");
    }
}
