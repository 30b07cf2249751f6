pub mod article;
pub mod cache;

pub use article::{ArticleRecord, ArticleUrl, UrlKind, FEED_TITLE_FALLBACK};
pub use cache::StagingCache;
