use std::collections::HashSet;

use tracing::debug;

pub const TITLE_TAG: &str = "title";
pub const LINK_TAG: &str = "link";
pub const CONTENT_TAG: &str = "content";

/// Known names for the repeated article container, in priority order.
pub const ARTICLE_TAGS: &[&str] = &["item", "article", "entry"];
/// Known synonyms for the description/body element.
pub const DESCRIPTION_TAGS: &[&str] = &["description", "summary"];
/// Known names for the publication date element.
pub const DATE_TAGS: &[&str] = &["pubdate", "pubDate", "published", "updated", "date"];

/// Semantic role a child element plays inside one article container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRole {
    Title,
    Link,
    Date,
    Description,
    Content,
}

/// Feed-specific element names bound to roles. Populated once per
/// document; a bound slot is never rewritten during the same pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRoles {
    article: Option<String>,
    description: Option<String>,
    date: Option<String>,
}

impl TagRoles {
    /// Bind each role to the first candidate present in the observed
    /// tag set.
    pub fn resolve(tags: &HashSet<String>) -> Self {
        let roles = Self {
            article: first_present(ARTICLE_TAGS, tags),
            description: first_present(DESCRIPTION_TAGS, tags),
            date: first_present(DATE_TAGS, tags),
        };
        debug!(
            article = ?roles.article,
            description = ?roles.description,
            date = ?roles.date,
            "working tags resolved"
        );
        roles
    }

    pub fn article_tag(&self) -> Option<&str> {
        self.article.as_deref()
    }

    pub fn description_tag(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn date_tag(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

fn first_present(candidates: &[&str], tags: &HashSet<String>) -> Option<String> {
    candidates
        .iter()
        .find(|candidate| tags.contains(**candidate))
        .map(|candidate| candidate.to_string())
}

/// Dispatch context for one article. Owns the article-local view of
/// the description tag, so the empty-description swap cannot leak into
/// other articles of the same run.
#[derive(Debug)]
pub struct ArticleContext<'a> {
    roles: &'a TagRoles,
    description_tag: Option<String>,
}

impl<'a> ArticleContext<'a> {
    pub fn new(roles: &'a TagRoles) -> Self {
        Self {
            roles,
            description_tag: roles.description.clone(),
        }
    }

    /// Total dispatch: which role, if any, this child tag carries.
    pub fn role_of(&self, tag: &str) -> Option<TagRole> {
        if tag == TITLE_TAG {
            return Some(TagRole::Title);
        }
        if tag == LINK_TAG {
            return Some(TagRole::Link);
        }
        if self.roles.date.as_deref() == Some(tag) {
            return Some(TagRole::Date);
        }
        if self.description_tag.as_deref() == Some(tag) {
            return Some(TagRole::Description);
        }
        if tag == CONTENT_TAG {
            return Some(TagRole::Content);
        }
        None
    }

    /// Flip to the other description synonym. Called when the bound
    /// description element of this article turned out empty.
    pub fn swap_description_tag(&mut self) {
        self.description_tag = match self.description_tag.as_deref() {
            Some("description") => Some("summary".to_string()),
            Some("summary") => Some("description".to_string()),
            other => other.map(str::to_string),
        };
        debug!(description = ?self.description_tag, "description tag swapped for this article");
    }
}
