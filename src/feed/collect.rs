use tracing::debug;

use crate::feed::normalize::{TRAVERSAL_DEPTH, TRAVERSAL_ELEMENT_CAP};
use crate::feed::roles::{TagRoles, TITLE_TAG};
use crate::feed::tree::Element;

const CHANNEL_TAG: &str = "channel";

#[derive(Debug, Default)]
pub struct CollectedArticles<'a> {
    pub articles: Vec<&'a Element>,
    pub feed_title: Option<String>,
}

/// Walk the tree down to [`TRAVERSAL_DEPTH`] levels below the root and
/// gather every element whose tag matches the resolved article tag, in
/// document order. A matched element's subtree is never searched for
/// further matches. Along the way the feed title is captured from a
/// `channel` element's `title` child.
///
/// An unresolved article tag yields an empty collection; the caller
/// decides whether that is terminal.
pub fn collect_articles<'a>(root: &'a Element, roles: &TagRoles) -> CollectedArticles<'a> {
    let mut collected = CollectedArticles::default();
    let Some(article_tag) = roles.article_tag() else {
        debug!("article tag unresolved, nothing to collect");
        return collected;
    };

    // Explicit work list, preorder so output stays in document order.
    let mut stack: Vec<(&Element, usize)> =
        root.children.iter().rev().map(|child| (child, 1)).collect();
    let mut visited = 0usize;

    while let Some((element, depth)) = stack.pop() {
        visited += 1;
        if visited > TRAVERSAL_ELEMENT_CAP {
            debug!(cap = TRAVERSAL_ELEMENT_CAP, "element cap reached while collecting articles");
            break;
        }

        if element.tag == article_tag {
            collected.articles.push(element);
            continue;
        }

        if element.tag == CHANNEL_TAG && collected.feed_title.is_none() {
            collected.feed_title = element
                .child(TITLE_TAG)
                .and_then(Element::text_trimmed)
                .map(str::to_string);
        }

        if depth < TRAVERSAL_DEPTH {
            stack.extend(element.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }

    debug!(
        count = collected.articles.len(),
        feed_title = ?collected.feed_title,
        "article elements collected"
    );
    collected
}
