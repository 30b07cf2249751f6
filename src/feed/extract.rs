use chrono::Local;
use tracing::debug;

use crate::domain::{ArticleRecord, ArticleUrl, UrlKind, FEED_TITLE_FALLBACK};
use crate::errors::{FeedError, FeedResult};
use crate::feed::dates;
use crate::feed::html;
use crate::feed::roles::{ArticleContext, TagRole, TagRoles};
use crate::feed::tree::Element;

/// Accumulation state for one article extraction. The HTML walker
/// feeds into the same draft as the plain field dispatch.
#[derive(Debug, Default)]
pub(crate) struct ArticleDraft {
    pub title: Option<String>,
    pub urls: Vec<ArticleUrl>,
    pub published: Option<String>,
    pub description: Option<String>,
}

impl ArticleDraft {
    pub(crate) fn append_url(&mut self, href: &str, kind: UrlKind) {
        self.urls.push(ArticleUrl::new(href.trim(), kind));
    }

    /// Variant with the substring-containment dedup the HTML walker
    /// applies to image and anchor URLs.
    pub(crate) fn append_url_deduped(&mut self, href: &str, kind: UrlKind) {
        let href = href.trim();
        if self.urls.iter().any(|url| url.href.contains(href)) {
            return;
        }
        self.urls.push(ArticleUrl::new(href, kind));
    }

    /// Newline-joined accumulation: the first contribution lands bare,
    /// later ones each start a new line.
    pub(crate) fn append_description(&mut self, text: &str) {
        match &mut self.description {
            Some(description) => {
                description.push('\n');
                description.push_str(text);
            }
            None => self.description = Some(text.to_string()),
        }
    }
}

/// Extract one canonical record from an article element by dispatching
/// its direct children through the resolved roles.
pub fn extract_article(
    article: &Element,
    roles: &TagRoles,
    feed_title: Option<&str>,
    source_url: &str,
) -> FeedResult<ArticleRecord> {
    let mut context = ArticleContext::new(roles);
    let mut draft = ArticleDraft::default();

    for child in &article.children {
        match context.role_of(&child.tag) {
            Some(TagRole::Title) => {
                draft.title = child.text.clone();
            }
            Some(TagRole::Date) => {
                if let Some(parsed) = child.text_trimmed().and_then(dates::parse_feed_date) {
                    draft.published = Some(parsed);
                }
            }
            Some(TagRole::Link) => {
                if let Some(href) = child.attr("href") {
                    draft.append_url(href, UrlKind::Link);
                } else if let Some(text) = child.text_trimmed() {
                    if text.contains("http") {
                        draft.append_url(text, UrlKind::Link);
                    }
                }
            }
            Some(TagRole::Description) => match child.text_trimmed() {
                None => context.swap_description_tag(),
                Some(text) => {
                    let as_html = child.attr("type") == Some("html");
                    html::parse_description(text, as_html, &mut draft);
                }
            },
            Some(TagRole::Content) => {
                if let Some(url) = child.attr("url") {
                    draft.append_url(url, UrlKind::Content);
                }
            }
            None => {}
        }
    }

    finalize(draft, feed_title, source_url)
}

fn finalize(
    draft: ArticleDraft,
    feed_title: Option<&str>,
    source_url: &str,
) -> FeedResult<ArticleRecord> {
    let title = draft.title.as_deref().unwrap_or("").trim().to_string();
    if title.is_empty() {
        return Err(FeedError::MissingField("title"));
    }
    if draft.urls.is_empty() {
        return Err(FeedError::MissingField("link"));
    }

    let published = draft
        .published
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
    let day = published.chars().take(10).collect();

    debug!(title = %title, urls = draft.urls.len(), "article extracted");

    Ok(ArticleRecord {
        title,
        urls: draft.urls,
        published,
        day,
        description: draft
            .description
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        source_url: source_url.to_string(),
        feed_title: feed_title.unwrap_or(FEED_TITLE_FALLBACK).to_string(),
    })
}
