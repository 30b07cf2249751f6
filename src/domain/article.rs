use serde::{Deserialize, Serialize};

/// Feed-level title used when the feed exposes no channel title.
pub const FEED_TITLE_FALLBACK: &str = "title not provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    Link,
    Content,
}

impl UrlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlKind::Link => "link",
            UrlKind::Content => "content",
        }
    }
}

impl std::str::FromStr for UrlKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "link" => Ok(UrlKind::Link),
            "content" => Ok(UrlKind::Content),
            _ => Err(format!("Unknown URL kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleUrl {
    pub href: String,
    pub kind: UrlKind,
}

impl ArticleUrl {
    pub fn new(href: impl Into<String>, kind: UrlKind) -> Self {
        Self {
            href: href.into(),
            kind,
        }
    }

    /// Wire form used by the renderers and the durable store.
    pub fn render(&self) -> String {
        format!("{} ({})", self.href, self.kind.as_str())
    }

    /// Parse one `"href (kind)"` line back from the durable store.
    /// A line without a recognized kind suffix is kept whole as a link.
    pub fn parse_line(line: &str) -> Self {
        if let Some(idx) = line.rfind(" (") {
            if let Some(kind) = line[idx + 2..]
                .strip_suffix(')')
                .and_then(|k| k.parse::<UrlKind>().ok())
            {
                return Self::new(&line[..idx], kind);
            }
        }
        Self::new(line, UrlKind::Link)
    }
}

/// Canonical article shape every feed dialect is normalized into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub urls: Vec<ArticleUrl>,
    pub published: String,
    pub day: String,
    pub description: String,
    pub source_url: String,
    pub feed_title: String,
}

impl ArticleRecord {
    /// Newline-joined `"href (kind)"` rendering, in encounter order.
    pub fn urls_joined(&self) -> String {
        self.urls
            .iter()
            .map(ArticleUrl::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn urls_from_joined(joined: &str) -> Vec<ArticleUrl> {
        joined
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(ArticleUrl::parse_line)
            .collect()
    }
}
