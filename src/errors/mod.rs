use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Feed layout not recognized: {0}")]
    UnrecognizedFeed(String),

    #[error("Article is missing a required {0} element")]
    MissingField(&'static str),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Parsing errors
    #[error("Feed XML parsing failed: {0}")]
    Xml(#[from] quick_xml::Error),

    // Storage errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    // Rendering errors
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FeedResult<T> = Result<T, FeedError>;
