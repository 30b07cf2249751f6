use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::domain::UrlKind;
use crate::feed::extract::ArticleDraft;

/// Recursion guard for pathological fragment nesting.
const WALK_DEPTH_CAP: usize = 32;

/// Route one description payload into the draft.
///
/// Description text arrives in several disguises: declared HTML
/// (`type="html"`), a literal CDATA wrapper, a whole-string tag pair,
/// a tag pair embedded in surrounding prose, tag soup with no matching
/// pair, or plain text. Everything that looks like markup goes through
/// the fragment walker; plain text lands in the description verbatim.
pub(crate) fn parse_description(text: &str, as_html: bool, draft: &mut ArticleDraft) {
    if as_html {
        walk_fragment(text, draft);
        return;
    }

    let text = strip_cdata(text.trim());

    match tag_pair_span(text) {
        Some((start, end)) if start == 0 && end == text.len() => {
            walk_fragment(text, draft);
        }
        Some((start, end)) => {
            let prefix = &text[..start];
            if !prefix.trim().is_empty() {
                if contains_tag(prefix) {
                    walk_fragment(prefix, draft);
                } else {
                    draft.append_description(prefix.trim());
                }
            }
            walk_fragment(&text[start..end], draft);
        }
        None if contains_tag(text) => {
            // self-closing or unmatched tags only
            walk_fragment(text, draft);
        }
        None => draft.append_description(text),
    }
}

/// Drop a literal `<![CDATA[...]]>` wrapper when the whole payload is
/// wrapped; some feeds double-escape and the wrapper survives XML
/// parsing as text.
fn strip_cdata(text: &str) -> &str {
    text.strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
        .map(str::trim)
        .unwrap_or(text)
}

/// Locate the first open tag that has a matching close tag and return
/// the span from the open tag through the last matching close.
fn tag_pair_span(text: &str) -> Option<(usize, usize)> {
    let open = Regex::new(r"<([A-Za-z][A-Za-z0-9]*)[^>]*>").unwrap();
    for caps in open.captures_iter(text) {
        let whole = caps.get(0)?;
        let name = caps.get(1)?.as_str();
        let close = format!("</{}>", name);
        if let Some(found) = text[whole.end()..].rfind(&close) {
            return Some((whole.start(), whole.end() + found + close.len()));
        }
    }
    None
}

fn contains_tag(text: &str) -> bool {
    Regex::new(r"<[^<>]+>").unwrap().is_match(text)
}

/// Parse the payload as an HTML fragment and walk its nodes into the
/// draft.
pub(crate) fn walk_fragment(fragment: &str, draft: &mut ArticleDraft) {
    let html = Html::parse_fragment(fragment);
    walk_children(html.root_element(), draft, 0);
}

fn walk_children(parent: ElementRef, draft: &mut ArticleDraft, depth: usize) {
    if depth > WALK_DEPTH_CAP {
        debug!(cap = WALK_DEPTH_CAP, "fragment depth cap reached");
        return;
    }

    for node in parent.children() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        match element.value().name() {
            "p" | "div" => {
                let text = element.text().collect::<String>();
                let text = text.trim();
                if !text.is_empty() {
                    draft.append_description(text);
                }
                if element.children().any(|child| child.value().is_element()) {
                    walk_children(element, draft, depth + 1);
                }
            }
            "img" => {
                if let Some(src) = element.value().attr("src") {
                    draft.append_url_deduped(src, UrlKind::Content);
                }
            }
            "a" => {
                if let Some(href) = element.value().attr("href") {
                    draft.append_url_deduped(href, UrlKind::Link);
                }
            }
            "ul" => {
                for item in element.children().filter_map(ElementRef::wrap) {
                    if item.value().name() == "li" {
                        let text = item.text().collect::<String>();
                        let text = text.trim();
                        if !text.is_empty() {
                            draft.append_description(text);
                        }
                    }
                }
            }
            _ => walk_children(element, draft, depth + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str, as_html: bool) -> ArticleDraft {
        let mut draft = ArticleDraft::default();
        parse_description(text, as_html, &mut draft);
        draft
    }

    fn joined_urls(draft: &ArticleDraft) -> String {
        draft
            .urls
            .iter()
            .map(|url| url.render())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_plain_text_is_kept_verbatim() {
        let draft = parsed("no markup here", false);
        assert_eq!(draft.description.as_deref(), Some("no markup here"));
        assert!(draft.urls.is_empty());
    }

    #[test]
    fn test_whole_string_tag_pair_is_walked() {
        let draft = parsed("<p>paragraph text</p>", false);
        assert_eq!(draft.description.as_deref(), Some("paragraph text"));
    }

    #[test]
    fn test_cdata_wrapper_is_stripped_first() {
        let draft = parsed("<![CDATA[<p>inside cdata</p>]]>", false);
        assert_eq!(draft.description.as_deref(), Some("inside cdata"));
    }

    #[test]
    fn test_plain_prefix_before_a_tag_pair() {
        let draft = parsed("lead-in text<p>paragraph</p>", false);
        assert_eq!(
            draft.description.as_deref(),
            Some("lead-in text\nparagraph")
        );
    }

    #[test]
    fn test_tagged_prefix_before_a_tag_pair() {
        let draft = parsed(
            r#"<img src="http://img.example/a.jpg"><p>paragraph</p>"#,
            false,
        );
        assert_eq!(draft.description.as_deref(), Some("paragraph"));
        assert_eq!(joined_urls(&draft), "http://img.example/a.jpg (content)");
    }

    #[test]
    fn test_declared_html_is_walked_without_classification() {
        let draft = parsed(
            r#"<p><img src="http://img.example/x.jpg" /></p><p>body text</p><p><a href="http://example.com/full">Read more</a></p>"#,
            true,
        );
        assert_eq!(draft.description.as_deref(), Some("body text\nRead more"));
        assert_eq!(
            joined_urls(&draft),
            "http://img.example/x.jpg (content)\nhttp://example.com/full (link)"
        );
    }

    #[test]
    fn test_image_urls_are_deduplicated_by_containment() {
        let draft = parsed(
            r#"<div><img src="http://img.example/a.jpg"><img src="http://img.example/a.jpg"></div>"#,
            false,
        );
        assert_eq!(joined_urls(&draft), "http://img.example/a.jpg (content)");
    }

    #[test]
    fn test_list_items_feed_the_description() {
        let draft = parsed("<ul><li>first</li><li>second</li></ul>", false);
        assert_eq!(draft.description.as_deref(), Some("first\nsecond"));
    }

    #[test]
    fn test_nested_divs_recurse() {
        let draft = parsed(
            r#"<div><div><a href="http://deep.example/">deep link</a></div></div>"#,
            false,
        );
        assert_eq!(joined_urls(&draft), "http://deep.example/ (link)");
    }

    #[test]
    fn test_unknown_wrapper_tags_recurse_into_children() {
        let draft = parsed(
            r#"<span><p>wrapped</p></span>"#,
            true,
        );
        assert_eq!(draft.description.as_deref(), Some("wrapped"));
    }

    #[test]
    fn test_tag_pair_span_picks_first_open_with_matching_close() {
        assert_eq!(tag_pair_span("<p>x</p>"), Some((0, 8)));
        assert_eq!(tag_pair_span("ab<p>x</p>"), Some((2, 10)));
        // the unmatched img open is skipped in favor of the p pair
        let text = r#"<img src="u"><p>x</p>"#;
        assert_eq!(tag_pair_span(text), Some((13, text.len())));
        assert_eq!(tag_pair_span("no tags at all"), None);
    }

    #[test]
    fn test_span_runs_to_the_last_matching_close() {
        let text = "<p>one</p><p>two</p>";
        assert_eq!(tag_pair_span(text), Some((0, text.len())));

        let draft = parsed(text, false);
        assert_eq!(draft.description.as_deref(), Some("one\ntwo"));
    }
}
