//! Tests for parsing, querying and rendering documents

use pip_fs::NormalizedPath;
use pip_xml::{Element, Error, Node, XmlDocument, XmlStore};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const PIP_XML: &str = include_str!("../../../test-fixtures/xml/packageInstallationPlugin.xml");
const MALFORMED_XML: &str = include_str!("../../../test-fixtures/xml/malformed.xml");

#[test]
fn test_parse_fixture() {
    let doc = XmlDocument::parse(PIP_XML).unwrap();

    assert_eq!(doc.root().local_name(), "data");
    assert_eq!(doc.root().attribute("xmlns"), Some("http://www.woltlab.com"));

    let pips = doc.select("/data/import/pip");
    assert_eq!(pips.len(), 4);
    assert_eq!(pips[0].attribute("name"), Some("acpMenu"));
    assert_eq!(
        pips[0].text_content(),
        "wcf\\system\\package\\plugin\\ACPMenuPackageInstallationPlugin"
    );
}

#[test]
fn test_render_of_canonical_fixture_is_identity() {
    let doc = XmlDocument::parse(PIP_XML).unwrap();
    assert_eq!(doc.render(), PIP_XML);
}

#[test]
fn test_round_trip_is_structurally_equal() {
    let source = r#"<?xml version="1.0"?>
<!-- leading -->
<data a="1" b="x &amp; y"><import>
   <pip name="q">  Foo  </pip><pip name="r"><![CDATA[<raw>]]></pip>
</import><!-- inner --></data>"#;

    let doc = XmlDocument::parse(source).unwrap();
    let reparsed = XmlDocument::parse(&doc.render()).unwrap();

    assert!(doc.structurally_eq(&reparsed));
    assert_eq!(doc, reparsed);
}

#[test]
fn test_whitespace_is_not_significant() {
    let compact = XmlDocument::parse("<data><import><pip name=\"a\">A</pip></import></data>").unwrap();
    let pretty = XmlDocument::parse("<data>\n\t<import>\n\t\t<pip name=\"a\">A</pip>\n\t</import>\n</data>\n")
        .unwrap();
    assert!(compact.structurally_eq(&pretty));
}

#[test]
fn test_leaf_text_keeps_surrounding_whitespace() {
    let doc = XmlDocument::new(
        Element::new("data").with_child(Element::new("pip").with_attribute("name", "a").with_text(" Foo ")),
    );

    let reparsed = XmlDocument::parse(&doc.render()).unwrap();

    assert_eq!(reparsed.select("/data/pip")[0].text_content(), " Foo ");
    assert!(reparsed.structurally_eq(&doc));
}

#[test]
fn test_mixed_content_text_is_trimmed() {
    let doc = XmlDocument::parse("<data>\n\t  lead  \n\t<import/>\n</data>").unwrap();
    assert_eq!(
        doc.root().children(),
        &[Node::Text("lead".into()), Node::Element(Element::new("import"))]
    );
}

#[test]
fn test_mismatched_tag_is_parse_error() {
    let err = XmlDocument::parse(MALFORMED_XML).unwrap_err();
    assert!(matches!(err, Error::ParseError { .. }), "got {err:?}");
}

#[test]
fn test_unclosed_element_is_parse_error() {
    let err = XmlDocument::parse("<data><import>").unwrap_err();
    assert!(err.to_string().contains("unclosed element <import>"));
}

#[test]
fn test_two_roots_is_parse_error() {
    assert!(XmlDocument::parse("<data/><data/>").unwrap_err().is_parse_error());
}

#[test]
fn test_empty_document_is_parse_error() {
    assert!(XmlDocument::parse("<?xml version=\"1.0\"?>").unwrap_err().is_parse_error());
}

#[test]
fn test_text_outside_root_is_parse_error() {
    assert!(XmlDocument::parse("oops<data/>").unwrap_err().is_parse_error());
}

#[test]
fn test_duplicate_attribute_is_parse_error() {
    assert!(XmlDocument::parse("<data a=\"1\" a=\"2\"/>").unwrap_err().is_parse_error());
}

#[test]
fn test_built_tree_renders_and_parses_back() {
    let root = Element::new("data")
        .with_attribute("xmlns", "http://www.woltlab.com")
        .with_child(
            Element::new("import").with_child(
                Element::new("pip")
                    .with_attribute("name", "foo")
                    .with_text("Vendor\\Foo"),
            ),
        )
        .with_child(Node::Comment("end".into()));
    let doc = XmlDocument::new(root);

    let parsed = XmlDocument::parse(&doc.render()).unwrap();
    assert!(parsed.structurally_eq(&doc));
}

#[test]
fn test_store_load_and_write() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("packageInstallationPlugin.xml"));
    fs::write(path.to_native(), PIP_XML).unwrap();

    let store = XmlStore::new();
    let mut doc = store.load(&path).unwrap();
    doc.root_mut()
        .first_child_named_mut("import")
        .unwrap()
        .append_child(Element::new("pip").with_attribute("name", "zzz").with_text("Z"));
    store.write(&doc, &path).unwrap();

    let reloaded = store.load(&path).unwrap();
    assert_eq!(reloaded.select("/data/import/pip").len(), 5);
    assert_eq!(reloaded, doc);
}

#[test]
fn test_store_load_malformed_reports_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("broken.xml"));
    fs::write(path.to_native(), MALFORMED_XML).unwrap();

    let err = XmlStore::new().load(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidFile { .. }));
    assert!(err.to_string().contains("broken.xml"));
}

#[test]
fn test_store_load_missing_file_is_fs_error() {
    let err = XmlStore::new()
        .load(&NormalizedPath::new("/nonexistent/pip.xml"))
        .unwrap_err();
    assert!(matches!(err, Error::Fs(_)));
}
