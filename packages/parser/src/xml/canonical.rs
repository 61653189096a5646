//! Canonical serialization of an element subtree.
//!
//! The canonical form is stable across re-parsing, so the bytes captured for
//! an activity can be compared against an independent serialization of the
//! same source subtree:
//!
//! - start and end tags are always written explicitly (`<a></a>`)
//! - attributes are sorted by qualified name, values use double quotes
//! - namespace declarations are written on the subtree root for every
//!   in-scope namespace, and on descendants only where they introduce a
//!   binding not already in scope
//! - comments and processing instructions are dropped
//! - text keeps its whitespace, with `&`, `<`, `>` and `\r` escaped

use roxmltree::Node;

use super::utils::XML_NAMESPACE;

type Binding<'a> = (Option<&'a str>, &'a str);

/// Serialize an element and its descendants to canonical XML bytes.
///
/// Non-element nodes serialize to their escaped text (or nothing).
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use iati_parser::xml::canonicalize;
///
/// let doc = Document::parse(r#"<budget type="1" b='x'><!-- c --><value/></budget>"#).unwrap();
/// let bytes = canonicalize(doc.root_element());
/// assert_eq!(bytes, br#"<budget b="x" type="1"><value></value></budget>"#);
/// ```
pub fn canonicalize(node: Node<'_, '_>) -> Vec<u8> {
    let mut out = String::new();
    write_node(node, &[], &mut out);
    out.into_bytes()
}

fn write_node<'a>(node: Node<'a, '_>, in_scope: &[Binding<'a>], out: &mut String) {
    if node.is_text() {
        if let Some(text) = node.text() {
            escape_text(text, out);
        }
        return;
    }
    if !node.is_element() {
        return;
    }

    let bindings: Vec<Binding<'a>> = node
        .namespaces()
        .filter(|ns| ns.uri() != XML_NAMESPACE)
        .map(|ns| (ns.name(), ns.uri()))
        .collect();
    let mut declared: Vec<Binding<'a>> = bindings
        .iter()
        .filter(|binding| !in_scope.contains(binding))
        .copied()
        .collect();
    declared.sort();

    let name = qualified_name(node, node.tag_name().namespace(), node.tag_name().name());

    out.push('<');
    out.push_str(&name);

    for (prefix, uri) in &declared {
        match prefix {
            Some(prefix) => {
                out.push_str(" xmlns:");
                out.push_str(prefix);
            }
            None => out.push_str(" xmlns"),
        }
        out.push_str("=\"");
        escape_attribute(uri, out);
        out.push('"');
    }

    let mut attributes: Vec<(String, &str)> = node
        .attributes()
        .map(|attr| (qualified_name(node, attr.namespace(), attr.name()), attr.value()))
        .collect();
    attributes.sort();

    for (attr_name, value) in &attributes {
        out.push(' ');
        out.push_str(attr_name);
        out.push_str("=\"");
        escape_attribute(value, out);
        out.push('"');
    }
    out.push('>');

    for child in node.children() {
        write_node(child, &bindings, out);
    }

    out.push_str("</");
    out.push_str(&name);
    out.push('>');
}

fn qualified_name(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    let prefix = match namespace {
        Some(XML_NAMESPACE) => Some("xml"),
        Some(uri) => node.lookup_prefix(uri),
        None => None,
    };
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            _ => out.push(c),
        }
    }
}
