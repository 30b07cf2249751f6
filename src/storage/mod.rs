pub mod traits;
pub mod sqlite;

pub use traits::{ArticleStore, FilterKey, RowFilter};
pub use sqlite::{SqliteArticleRepository, SqliteStorage};
