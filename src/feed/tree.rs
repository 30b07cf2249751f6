use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::errors::{FeedError, FeedResult};

/// One node of a parsed feed document. The tree is owned, acyclic and
/// finite; tags of namespace-bound elements are stored as
/// `{namespace}local` so the prefix normalizer sees a uniform shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub text: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct text content; `None` when absent or whitespace-only.
    pub fn text_trimmed(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }
}

/// Parse a whole XML document into an owned [`Element`] tree.
///
/// Text and CDATA chunks of one element are concatenated (space
/// separated) into its `text`; whitespace-only chunks are dropped by
/// the reader configuration. Malformed XML is a terminal error.
pub fn parse_document(xml: &str) -> FeedResult<Element> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_resolved_event()? {
            (ns, Event::Start(start)) => {
                stack.push(open_element(&ns, &start)?);
            }
            (ns, Event::Empty(start)) => {
                let element = open_element(&ns, &start)?;
                attach(&mut stack, &mut root, element);
            }
            (_, Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }
            (_, Event::Text(text)) => {
                if let Some(open) = stack.last_mut() {
                    append_text(open, &text.unescape()?);
                }
            }
            (_, Event::CData(cdata)) => {
                if let Some(open) = stack.last_mut() {
                    append_text(open, &String::from_utf8_lossy(cdata.as_ref()));
                }
            }
            (_, Event::Eof) => {
                if !stack.is_empty() {
                    return Err(FeedError::UnrecognizedFeed(
                        "document ended with unclosed elements".to_string(),
                    ));
                }
                break;
            }
            _ => {}
        }
    }

    root.ok_or_else(|| {
        FeedError::UnrecognizedFeed("document contains no elements".to_string())
    })
}

fn open_element(ns: &ResolveResult, start: &BytesStart) -> FeedResult<Element> {
    let local = String::from_utf8_lossy(start.local_name().into_inner()).into_owned();
    let tag = match ns {
        ResolveResult::Bound(namespace) => {
            format!("{{{}}}{}", String::from_utf8_lossy(namespace.0), local)
        }
        _ => local,
    };

    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().into_inner()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((key, value));
    }

    Ok(Element {
        tag,
        text: None,
        attrs,
        children: Vec::new(),
    })
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn append_text(element: &mut Element, chunk: &str) {
    if chunk.is_empty() {
        return;
    }
    match &mut element.text {
        Some(text) => {
            text.push(' ');
            text.push_str(chunk);
        }
        None => element.text = Some(chunk.to_string()),
    }
}
