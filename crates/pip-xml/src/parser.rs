//! Parsing XML text into an element tree

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::document::{Declaration, XmlDocument};
use crate::error::{Error, Result};
use crate::node::{Element, Node};

pub(crate) fn parse(source: &str) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(source);

    let mut declaration = None;
    let mut prolog = Vec::new();
    let mut epilog = Vec::new();
    let mut root: Option<Element> = None;
    let mut stack: Vec<Element> = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| Error::parse(reader.error_position() as u64, e.to_string()))?;

        match event {
            Event::Decl(decl) => {
                let version = decl
                    .version()
                    .map_err(|e| Error::parse(position, e.to_string()))?;
                let encoding = decl
                    .encoding()
                    .transpose()
                    .map_err(|e| Error::parse(position, e.to_string()))?;
                let standalone = decl
                    .standalone()
                    .transpose()
                    .map_err(|e| Error::parse(position, e.to_string()))?;
                declaration = Some(Declaration {
                    version: utf8(version, position)?,
                    encoding: encoding.map(|e| utf8(e, position)).transpose()?,
                    standalone: standalone.map(|s| utf8(s, position)).transpose()?,
                });
            }
            Event::Start(start) => {
                ensure_single_root(&root, &stack, position)?;
                stack.push(element_from_start(&start, position)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root, &stack, position)?;
                let element = element_from_start(&start, position)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                // quick-xml has already checked that the end name matches
                let mut element = stack
                    .pop()
                    .ok_or_else(|| Error::parse(position, "unexpected closing tag"))?;
                trim_mixed_text(&mut element);
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| Error::parse(position, e.to_string()))?;
                match stack.last_mut() {
                    _ if text.trim().is_empty() => {}
                    Some(parent) => parent.append_child(Node::Text(text.into_owned())),
                    None => return Err(Error::parse(position, "text outside of the root element")),
                }
            }
            Event::CData(cdata) => {
                let text = utf8(cdata.into_inner(), position)?;
                match stack.last_mut() {
                    Some(parent) => parent.append_child(Node::CData(text)),
                    None => return Err(Error::parse(position, "CDATA outside of the root element")),
                }
            }
            Event::Comment(comment) => {
                let text = utf8(comment.into_inner(), position)?;
                let node = Node::Comment(text.trim().to_string());
                match (stack.last_mut(), &root) {
                    (Some(parent), _) => parent.append_child(node),
                    (None, None) => prolog.push(node),
                    (None, Some(_)) => epilog.push(node),
                }
            }
            Event::Eof => break,
            // processing instructions and doctype declarations carry no entry data
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::parse(
            source.len() as u64,
            format!("unclosed element <{}>", open.name()),
        ));
    }

    let root = root.ok_or_else(|| Error::parse(0, "document has no root element"))?;

    Ok(XmlDocument::from_parts(declaration, prolog, root, epilog))
}

/// Whitespace-only text is never kept. Text of an element holding only
/// character data is kept verbatim; text next to child elements or comments
/// is trimmed, since the surrounding whitespace is indentation.
fn trim_mixed_text(element: &mut Element) {
    if element.children().iter().all(Node::is_character_data) {
        return;
    }
    element.children_mut().retain_mut(|node| match node {
        Node::Text(text) => {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
            !text.is_empty()
        }
        _ => true,
    });
}

fn ensure_single_root(root: &Option<Element>, stack: &[Element], position: u64) -> Result<()> {
    if root.is_some() && stack.is_empty() {
        return Err(Error::parse(position, "document has more than one root element"));
    }
    Ok(())
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.append_child(element),
        None => *root = Some(element),
    }
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<Element> {
    let name = utf8(Cow::Borrowed(start.name().as_ref()), position)?;
    let mut element = Element::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| Error::parse(position, e.to_string()))?;
        let key = utf8(Cow::Borrowed(attribute.key.as_ref()), position)?;
        let value = attribute
            .unescape_value()
            .map_err(|e| Error::parse(position, e.to_string()))?;
        element.set_attribute(key, value.into_owned());
    }

    Ok(element)
}

fn utf8(bytes: Cow<'_, [u8]>, position: u64) -> Result<String> {
    String::from_utf8(bytes.into_owned())
        .map_err(|e| Error::parse(position, format!("invalid UTF-8: {e}")))
}
