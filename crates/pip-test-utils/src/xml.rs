//! Project XML text in the exact form the writer produces.
//!
//! Tests compare written files against these strings, so any change to the
//! canonical rendering must be mirrored here.

/// Root element opening tag of a package installation plugin document.
pub const PIP_ROOT: &str = "<data xmlns=\"http://www.woltlab.com\" \
xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
xsi:schemaLocation=\"http://www.woltlab.com http://www.woltlab.com/XSD/2019/packageInstallationPlugin.xsd\">";

/// Fully-qualified class name of a core plugin.
pub fn core_class(short_name: &str) -> String {
    format!("wcf\\system\\package\\plugin\\{short_name}PackageInstallationPlugin")
}

/// Render a document with the given `<import>` entries (name, class name)
/// and `<delete>` markers, in the order given.
///
/// An empty import list renders a self-closing `<import/>`; an empty delete
/// list omits the container.
pub fn pip_document(imports: &[(&str, &str)], deletes: &[&str]) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(PIP_ROOT);
    out.push('\n');

    if imports.is_empty() {
        out.push_str("\t<import/>\n");
    } else {
        out.push_str("\t<import>\n");
        for (name, class_name) in imports {
            out.push_str(&format!("\t\t<pip name=\"{name}\">{class_name}</pip>\n"));
        }
        out.push_str("\t</import>\n");
    }

    if !deletes.is_empty() {
        out.push_str("\t<delete>\n");
        for name in deletes {
            out.push_str(&format!("\t\t<pip name=\"{name}\"/>\n"));
        }
        out.push_str("\t</delete>\n");
    }

    out.push_str("</data>\n");
    out
}
