//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;
use unicode_normalization::UnicodeNormalization;

/// Namespace URI bound to the reserved `xml:` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use iati_parser::xml::get_tag_name;
///
/// let xml = r#"<iati-activities><iati-activity/></iati-activities>"#;
/// let doc = Document::parse(xml).unwrap();
/// let activity = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(activity), "iati-activity");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use iati_parser::xml::find_child;
///
/// let xml = r#"<transaction><value>10</value><description/></transaction>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "value").is_some());
/// assert!(find_child(root, "provider-org").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, tag))
}

/// Find all child elements with the given tag name, in document order.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, tag))
}

/// Find a descendant element matching a slash-separated path of tag names.
///
/// An empty path returns the node itself.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use iati_parser::xml::find_by_path;
///
/// let xml = r#"<transaction><provider-org><narrative>DFID</narrative></provider-org></transaction>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let narrative = find_by_path(doc.root_element(), "provider-org/narrative");
/// assert_eq!(narrative.unwrap().text(), Some("DFID"));
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    path.split('/')
        .filter(|part| !part.is_empty())
        .try_fold(node, |current, part| find_child(current, part))
}

/// Get the direct text content of a node, trimmed and NFC-normalized.
///
/// Returns an empty string when the node has no text.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().nfc().collect())
        .unwrap_or_default()
}

/// Get an attribute value from a node.
///
/// Names carrying the `xml:` prefix (e.g. `xml:lang`) are looked up in the
/// XML namespace; all other names are matched without namespace.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    match name.strip_prefix("xml:") {
        Some(local) => node.attribute((XML_NAMESPACE, local)),
        None => node.attribute(name),
    }
}

/// Text of an element that may carry its content either directly or in
/// `<narrative>` children.
///
/// Direct text wins; otherwise the first non-empty narrative is used.
pub fn narrative_text(node: Node<'_, '_>) -> Option<String> {
    let direct = get_text(node);
    if !direct.is_empty() {
        return Some(direct);
    }
    find_children(node, "narrative")
        .map(get_text)
        .find(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:root xmlns:ns="http://example.com"><ns:child/></ns:root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "root");
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<activity><budget/><other/><budget/></activity>"#;
        let doc = Document::parse(xml).unwrap();

        let budgets: Vec<_> = find_children(doc.root_element(), "budget").collect();
        assert_eq!(budgets.len(), 2);
    }

    #[test]
    fn test_find_by_path() {
        let xml = r#"<a><b><c>found</c></b></a>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        assert_eq!(get_text(find_by_path(root, "b/c").unwrap()), "found");
        assert!(find_by_path(root, "b/missing").is_none());
        assert_eq!(find_by_path(root, ""), Some(root));
    }

    #[test]
    fn test_get_text_trims_and_normalizes() {
        // "e" followed by a combining acute accent composes to a single char
        let xml = "<title>  Cafe\u{301} programme  </title>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_text(doc.root_element()), "Caf\u{e9} programme");
    }

    #[test]
    fn test_get_attribute_xml_lang() {
        let xml = r#"<iati-activity xml:lang="en" default-currency="GBP"/>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        assert_eq!(get_attribute(root, "xml:lang"), Some("en"));
        assert_eq!(get_attribute(root, "default-currency"), Some("GBP"));
        assert_eq!(get_attribute(root, "hierarchy"), None);
    }

    #[test]
    fn test_narrative_text_prefers_direct_text() {
        let xml = r#"<title>Direct<narrative>Nested</narrative></title>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(narrative_text(doc.root_element()), Some("Direct".to_string()));
    }

    #[test]
    fn test_narrative_text_falls_back_to_narrative() {
        let xml = r#"<title>
            <narrative/>
            <narrative xml:lang="en">Water and sanitation</narrative>
        </title>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            narrative_text(doc.root_element()),
            Some("Water and sanitation".to_string())
        );
    }

    #[test]
    fn test_narrative_text_empty() {
        let doc = Document::parse("<title/>").unwrap();
        assert_eq!(narrative_text(doc.root_element()), None);
    }
}
