//! Snapshot of the canonical rendering

use pip_xml::{Element, Node, XmlDocument};

#[test]
fn snapshot_rendered_pip_document() {
    let root = Element::new("data")
        .with_attribute("xmlns", "http://www.woltlab.com")
        .with_child(Node::Comment("generated".into()))
        .with_child(
            Element::new("import")
                .with_child(
                    Element::new("pip")
                        .with_attribute("name", "acpMenu")
                        .with_text("wcf\\system\\package\\plugin\\ACPMenuPackageInstallationPlugin"),
                )
                .with_child(
                    Element::new("pip")
                        .with_attribute("name", "option")
                        .with_text("wcf\\system\\package\\plugin\\OptionPackageInstallationPlugin"),
                ),
        )
        .with_child(Element::new("delete").with_child(Element::new("pip").with_attribute("name", "old")));

    let rendered = XmlDocument::new(root).render();
    insta::assert_snapshot!("rendered_pip_document", rendered);
}
