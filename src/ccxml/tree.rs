//! Arena-allocated element tree for namespaced XML.
//!
//! The whole document is read into the arena before any schema check runs,
//! so a syntax error anywhere in the input is reported as such rather than
//! as a missing element. Nodes are addressed by [`NodeId`] and keep their
//! children in document order.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use crate::error::{Error, Result};
use crate::util::{resolve_entity, unescape_attribute};

/// Index of an element in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// An element with its resolved namespace.
#[derive(Debug, Clone)]
pub struct Element {
    /// Namespace URI the element name is bound to, if any.
    pub namespace: Option<String>,
    /// Local name without prefix.
    pub name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
}

#[derive(Debug, Clone)]
enum Child {
    Element(NodeId),
    Text(String),
}

/// A parsed XML document.
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<Element>,
    root: NodeId,
}

impl XmlTree {
    /// Read a complete document.
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(text);

        let mut nodes: Vec<Element> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root: Option<NodeId> = None;

        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_resolved_event() {
                Ok((ns, Event::Start(e))) => {
                    let id = open_element(&mut nodes, &mut root, &stack, ns, &e)
                        .map_err(|msg| syntax(position, msg))?;
                    stack.push(id);
                }
                Ok((ns, Event::Empty(e))) => {
                    open_element(&mut nodes, &mut root, &stack, ns, &e)
                        .map_err(|msg| syntax(position, msg))?;
                }
                Ok((_, Event::End(_))) => {
                    stack.pop();
                }
                Ok((_, Event::Text(e))) => {
                    let text = String::from_utf8_lossy(e.as_ref());
                    match stack.last() {
                        Some(&parent) => push_text(&mut nodes, parent, &text),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(syntax(position, "text outside the root element".to_string()));
                        }
                    }
                }
                Ok((_, Event::CData(e))) => {
                    let &parent = stack
                        .last()
                        .ok_or_else(|| syntax(position, "CDATA outside the root element".to_string()))?;
                    push_text(&mut nodes, parent, &String::from_utf8_lossy(&e));
                }
                Ok((_, Event::GeneralRef(e))) => {
                    let entity = String::from_utf8_lossy(e.as_ref()).into_owned();
                    let &parent = stack.last().ok_or_else(|| {
                        syntax(position, format!("reference &{entity}; outside the root element"))
                    })?;
                    let resolved = resolve_entity(&entity)
                        .ok_or_else(|| syntax(position, format!("unknown entity &{entity};")))?;
                    push_text(&mut nodes, parent, &resolved);
                }
                Ok((_, Event::Eof)) => break,
                Err(e) => return Err(syntax(reader.error_position() as u64, e.to_string())),
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(syntax(
                reader.buffer_position() as u64,
                format!("unclosed element <{}>", nodes[open.0 as usize].name),
            ));
        }

        let root = root.ok_or_else(|| syntax(0, "document has no root element".to_string()))?;
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn element(&self, id: NodeId) -> &Element {
        &self.nodes[id.0 as usize]
    }

    /// Attribute value by local name.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the element has the given namespace and local name.
    pub fn is(&self, id: NodeId, namespace: &str, name: &str) -> bool {
        let element = self.element(id);
        element.name == name && element.namespace.as_deref() == Some(namespace)
    }

    /// Direct element children in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.element(id).children.iter().filter_map(|child| match child {
            Child::Element(id) => Some(*id),
            Child::Text(_) => None,
        })
    }

    /// Direct children matching a namespace and local name.
    pub fn children_named<'a>(
        &'a self,
        id: NodeId,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .filter(move |&child| self.is(child, namespace, name))
    }

    /// First direct child matching a namespace and local name.
    pub fn child(&self, id: NodeId, namespace: &str, name: &str) -> Option<NodeId> {
        self.children_named(id, namespace, name).next()
    }

    /// All descendants (excluding `id`) matching a namespace and local name,
    /// in document order.
    pub fn descendants_named(&self, id: NodeId, namespace: &str, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut pending: Vec<NodeId> = self.children(id).collect();
        pending.reverse();
        while let Some(next) = pending.pop() {
            if self.is(next, namespace, name) {
                found.push(next);
            }
            let start = pending.len();
            pending.extend(self.children(next));
            pending[start..].reverse();
        }
        found
    }

    /// Concatenated text of the element and all its descendants.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for child in &self.element(id).children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(child) => self.collect_text(*child, out),
            }
        }
    }
}

fn open_element(
    nodes: &mut Vec<Element>,
    root: &mut Option<NodeId>,
    stack: &[NodeId],
    ns: ResolveResult<'_>,
    start: &BytesStart<'_>,
) -> std::result::Result<NodeId, String> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let namespace = match ns {
        ResolveResult::Bound(Namespace(uri)) => Some(String::from_utf8_lossy(uri).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(format!(
                "unknown namespace prefix '{}' on <{name}>",
                String::from_utf8_lossy(&prefix)
            ));
        }
    };

    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| format!("bad attribute on <{name}>: {e}"))?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        attrs.push((key, unescape_attribute(&raw).into_owned()));
    }

    let id = NodeId(nodes.len() as u32);
    nodes.push(Element {
        namespace,
        name,
        attrs,
        children: Vec::new(),
    });

    match stack.last() {
        Some(parent) => nodes[parent.0 as usize].children.push(Child::Element(id)),
        None if root.is_none() => *root = Some(id),
        None => return Err("document has more than one root element".to_string()),
    }

    Ok(id)
}

fn push_text(nodes: &mut [Element], parent: NodeId, text: &str) {
    let children = &mut nodes[parent.0 as usize].children;
    if let Some(Child::Text(existing)) = children.last_mut() {
        existing.push_str(text);
    } else {
        children.push(Child::Text(text.to_string()));
    }
}

fn syntax(position: u64, message: String) -> Error {
    Error::XmlSyntax { position, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "urn:test";

    #[test]
    fn test_resolves_default_and_prefixed_namespaces() {
        let tree = XmlTree::parse(
            r#"<a xmlns="urn:test" xmlns:o="urn:other"><o:b/><c/></a>"#,
        )
        .unwrap();
        let root = tree.root();
        assert!(tree.is(root, NS, "a"));
        let children: Vec<_> = tree.children(root).collect();
        assert!(tree.is(children[0], "urn:other", "b"));
        assert!(tree.is(children[1], NS, "c"));
    }

    #[test]
    fn test_text_concatenates_descendants_and_entities() {
        let tree =
            XmlTree::parse(r#"<t xmlns="urn:test"> <b>Fish</b> &amp; chips&#x21; </t>"#).unwrap();
        assert_eq!(tree.text(tree.root()), " Fish & chips! ");
    }

    #[test]
    fn test_attributes_are_unescaped_and_namespace_declarations_skipped() {
        let tree = XmlTree::parse(r#"<a xmlns="urn:test" k="x&amp;y"/>"#).unwrap();
        assert_eq!(tree.attr(tree.root(), "k"), Some("x&y"));
        assert_eq!(tree.attr(tree.root(), "xmlns"), None);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let tree = XmlTree::parse(
            r#"<a xmlns="urn:test"><x n="1"><x n="2"/></x><y><x n="3"/></y></a>"#,
        )
        .unwrap();
        let found: Vec<_> = tree
            .descendants_named(tree.root(), NS, "x")
            .into_iter()
            .map(|id| tree.attr(id, "n").unwrap().to_string())
            .collect();
        assert_eq!(found, ["1", "2", "3"]);
    }

    #[test]
    fn test_unclosed_element_is_syntax_error() {
        let err = XmlTree::parse(r#"<a xmlns="urn:test"><b>"#).unwrap_err();
        assert!(matches!(err, Error::XmlSyntax { .. }), "{err}");
    }

    #[test]
    fn test_text_around_root_is_syntax_error() {
        for doc in [
            r#"garbage<a xmlns="urn:test"/>"#,
            r#"<a xmlns="urn:test"/>trailing"#,
            r#"<a xmlns="urn:test"/>&amp;"#,
            r#"<![CDATA[x]]><a xmlns="urn:test"/>"#,
        ] {
            let err = XmlTree::parse(doc).unwrap_err();
            assert!(matches!(err, Error::XmlSyntax { .. }), "{doc}: {err}");
        }
    }

    #[test]
    fn test_whitespace_around_root_is_allowed() {
        let tree = XmlTree::parse("\n  <a xmlns=\"urn:test\"/>\n\t").unwrap();
        assert!(tree.is(tree.root(), NS, "a"));
    }

    #[test]
    fn test_mismatched_end_tag_is_syntax_error() {
        let err = XmlTree::parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, Error::XmlSyntax { .. }), "{err}");
    }

    #[test]
    fn test_unknown_prefix_is_syntax_error() {
        let err = XmlTree::parse("<p:a/>").unwrap_err();
        assert!(matches!(err, Error::XmlSyntax { .. }), "{err}");
    }

    #[test]
    fn test_empty_document_is_syntax_error() {
        let err = XmlTree::parse("  ").unwrap_err();
        assert!(matches!(err, Error::XmlSyntax { .. }), "{err}");
    }
}
