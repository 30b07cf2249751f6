pub mod collect;
pub mod dates;
pub mod extract;
pub mod html;
pub mod normalize;
pub mod roles;
pub mod tree;

use tracing::info;

use crate::domain::ArticleRecord;
use crate::errors::{FeedError, FeedResult};

/// Run the whole normalization pipeline over one fetched document:
/// parse the tree, strip tag prefixes, resolve working tags, collect
/// article containers, and extract a record from each.
///
/// A feed in which no article container can be found is a terminal
/// error, as is any article missing its required fields.
pub fn parse_feed(xml: &str, source_url: &str) -> FeedResult<Vec<ArticleRecord>> {
    let mut root = tree::parse_document(xml)?;
    let tags = normalize::strip_tag_prefixes(&mut root);
    let roles = roles::TagRoles::resolve(&tags);

    let collected = collect::collect_articles(&root, &roles);
    if collected.articles.is_empty() {
        return Err(FeedError::UnrecognizedFeed(format!(
            "no article elements found in {}",
            source_url
        )));
    }

    let feed_title = collected.feed_title.as_deref();
    let records = collected
        .articles
        .iter()
        .map(|article| extract::extract_article(article, &roles, feed_title, source_url))
        .collect::<FeedResult<Vec<_>>>()?;

    info!(count = records.len(), source = source_url, "articles extracted");
    Ok(records)
}
