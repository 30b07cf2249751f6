use serde::Serialize;

use crate::domain::ArticleRecord;
use crate::errors::FeedResult;

const RULE: &str = "____________________________________________";

/// Multi-line console block for one record.
pub fn render_text(record: &ArticleRecord) -> String {
    format!(
        "{rule}\n\
         Feed: {feed}\n\
         Source: {source}\n\
         Title: {title}\n\
         Date: {date}\n\
         \n\
         {description}\n\
         \n\
         Links:\n\
         {urls}\n",
        rule = RULE,
        feed = record.feed_title,
        source = record.source_url,
        title = record.title,
        date = record.published,
        description = record.description,
        urls = record.urls_joined(),
    )
}

/// Serialization view fixing the JSON key order.
#[derive(Serialize)]
struct JsonArticle<'a> {
    title: &'a str,
    urls: String,
    source_url: &'a str,
    description: &'a str,
    published: &'a str,
    day: &'a str,
    feed_title: &'a str,
}

/// Single-line JSON object for one record; `urls` carries the
/// newline-joined rendering.
pub fn render_json(record: &ArticleRecord) -> FeedResult<String> {
    let view = JsonArticle {
        title: &record.title,
        urls: record.urls_joined(),
        source_url: &record.source_url,
        description: &record.description,
        published: &record.published,
        day: &record.day,
        feed_title: &record.feed_title,
    };

    Ok(serde_json::to_string(&view)?)
}
