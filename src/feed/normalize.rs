use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::feed::tree::Element;

/// Levels below the root any traversal will visit.
pub const TRAVERSAL_DEPTH: usize = 4;

/// Upper bound on visited elements, guards traversal termination on
/// pathological documents.
pub const TRAVERSAL_ELEMENT_CAP: usize = 10_000;

/// Strip `{namespace}` wrappers from every tag reachable within the
/// traversal bound and collect the resulting tag names.
///
/// Some servers qualify every element tag with its namespace URI; role
/// resolution matches on bare local names, so this pass must run first.
/// Running it on an already-stripped tree is a no-op.
pub fn strip_tag_prefixes(root: &mut Element) -> HashSet<String> {
    let prefix = Regex::new(r"^\{[^}]*\}").unwrap();
    let mut tags = HashSet::new();
    let mut visited = 0usize;

    let mut level: Vec<&mut Element> = vec![root];
    let mut depth = 0usize;
    while !level.is_empty() && depth <= TRAVERSAL_DEPTH {
        let mut next: Vec<&mut Element> = Vec::new();
        for element in level {
            visited += 1;
            if visited > TRAVERSAL_ELEMENT_CAP {
                debug!(cap = TRAVERSAL_ELEMENT_CAP, "element cap reached while stripping prefixes");
                return tags;
            }
            if let Some(found) = prefix.find(&element.tag) {
                element.tag = element.tag[found.end()..].to_string();
            }
            tags.insert(element.tag.clone());
            if depth < TRAVERSAL_DEPTH {
                next.extend(element.children.iter_mut());
            }
        }
        level = next;
        depth += 1;
    }

    tags
}
