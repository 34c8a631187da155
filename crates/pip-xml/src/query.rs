//! XPath-style path selection
//!
//! Supports the subset the installer needs: `/`-separated element names
//! with `*` wildcards, absolute (rooted at the document element) or
//! relative to a context element.

use crate::document::XmlDocument;
use crate::node::Element;

pub(crate) fn select_from_document<'a>(document: &'a XmlDocument, path: &str) -> Vec<&'a Element> {
    let root = document.root();
    match path.strip_prefix('/') {
        Some(absolute) => {
            let mut segments = segments(absolute);
            match segments.next() {
                Some(first) if matches(root, first) => select_segments(vec![root], segments),
                Some(_) => Vec::new(),
                None => vec![root],
            }
        }
        None => select(root, path),
    }
}

/// Select descendants of `context` along a relative path.
pub fn select<'a>(context: &'a Element, path: &str) -> Vec<&'a Element> {
    select_segments(vec![context], segments(path))
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn select_segments<'a, 's>(
    mut current: Vec<&'a Element>,
    segments: impl Iterator<Item = &'s str>,
) -> Vec<&'a Element> {
    for segment in segments {
        current = current
            .into_iter()
            .flat_map(|e| e.child_elements().filter(move |c| matches(c, segment)))
            .collect();
        if current.is_empty() {
            break;
        }
    }
    current
}

fn matches(element: &Element, segment: &str) -> bool {
    segment == "*" || element.local_name() == segment
}
