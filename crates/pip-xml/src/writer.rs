//! Canonical rendering of a document
//!
//! Output is tab-indented with one element per line. Elements holding only
//! character data are written inline and childless elements self-close, so
//! an entry always occupies exactly one line and diffs stay minimal.

use quick_xml::escape::escape;

use crate::document::{Declaration, XmlDocument};
use crate::node::{Element, Node};

pub(crate) fn render(document: &XmlDocument) -> String {
    let mut out = String::new();

    let default_declaration = Declaration::default();
    write_declaration(&mut out, document.declaration().unwrap_or(&default_declaration));

    for node in document.prolog() {
        write_node(&mut out, node, 0);
    }
    write_element(&mut out, document.root(), 0);
    for node in document.epilog() {
        write_node(&mut out, node, 0);
    }

    out
}

fn write_declaration(out: &mut String, declaration: &Declaration) {
    out.push_str("<?xml version=\"");
    out.push_str(&declaration.version);
    out.push('"');
    if let Some(encoding) = &declaration.encoding {
        out.push_str(" encoding=\"");
        out.push_str(encoding);
        out.push('"');
    }
    if let Some(standalone) = &declaration.standalone {
        out.push_str(" standalone=\"");
        out.push_str(standalone);
        out.push('"');
    }
    out.push_str("?>\n");
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Element(element) => write_element(out, element, depth),
        other => {
            indent(out, depth);
            write_inline(out, other);
            out.push('\n');
        }
    }
}

fn write_inline(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape(text.as_str())),
        Node::CData(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        Node::Comment(text) => {
            out.push_str("<!-- ");
            out.push_str(text);
            out.push_str(" -->");
        }
        Node::Element(_) => {}
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    indent(out, depth);
    out.push('<');
    out.push_str(element.name());
    for attribute in element.attributes() {
        out.push(' ');
        out.push_str(&attribute.name);
        out.push_str("=\"");
        out.push_str(&escape(attribute.value.as_str()));
        out.push('"');
    }

    let children = element.children();
    if children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    if children.iter().all(Node::is_character_data) {
        out.push('>');
        for child in children {
            write_inline(out, child);
        }
    } else {
        out.push_str(">\n");
        for child in children {
            write_node(out, child, depth + 1);
        }
        indent(out, depth);
    }

    out.push_str("</");
    out.push_str(element.name());
    out.push_str(">\n");
}
