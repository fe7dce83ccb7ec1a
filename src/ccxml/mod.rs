//! Crossword Compiler XML (CCXML) parsing.
//!
//! A CCXML document wraps a rectangular puzzle in two namespaces:
//!
//! ```xml
//! <crossword-compiler xmlns="http://crossword.info/xml/crossword-compiler">
//!   <rectangular-puzzle xmlns="http://crossword.info/xml/rectangular-puzzle">
//!     <metadata><title>Daily</title><creator>Setter</creator></metadata>
//!     <crossword>
//!       <grid width="15" height="15">
//!         <cell x="1" y="1" solution="C" number="1"/>
//!         <cell x="2" y="1" type="block"/>
//!         ...
//!       </grid>
//!       <clues>
//!         <title><b>Across</b></title>
//!         <clue number="1" format="5">Feline</clue>
//!       </clues>
//!     </crossword>
//!   </rectangular-puzzle>
//! </crossword-compiler>
//! ```
//!
//! Parsing happens in two phases. [`tree::XmlTree`] reads the whole document
//! and reports syntax errors; the schema phase then walks the tree and builds
//! a [`Crossword`].

mod clues;
mod grid;
mod tree;

pub use tree::{NodeId, XmlTree};

use log::debug;

use crate::error::{Error, Result, SchemaViolation};
use crate::model::Crossword;
use crate::util::decode_document;

/// Namespace of the Crossword Compiler wrapper element.
pub const COMPILER_NS: &str = "http://crossword.info/xml/crossword-compiler";

/// Namespace of the puzzle content.
pub const PUZZLE_NS: &str = "http://crossword.info/xml/rectangular-puzzle";

/// Parse a CCXML document into a [`Crossword`].
pub fn parse(bytes: &[u8]) -> Result<Crossword> {
    let text = decode_document(bytes);
    let tree = XmlTree::parse(&text)?;
    extract(&tree)
}

/// Build a [`Crossword`] from an already-parsed document tree.
pub fn extract(tree: &XmlTree) -> Result<Crossword> {
    let root = tree.root();
    let root_ns = tree.element(root).namespace.as_deref();
    if root_ns != Some(COMPILER_NS) {
        return Err(SchemaViolation::UnexpectedRoot {
            expected: COMPILER_NS.to_string(),
            found: root_ns.unwrap_or("no namespace").to_string(),
        }
        .into());
    }

    let crossword = single_descendant(tree, root, "crossword")?;

    let grid = grid::parse_grid(tree, crossword)?;
    let clue_groups = clues::parse_clue_groups(tree, crossword)?;

    debug!(
        "parsed {}x{} grid with {} clue groups",
        grid.width,
        grid.height,
        clue_groups.len()
    );

    let mut result = Crossword::new(grid.width, grid.height, grid.cells, clue_groups)?;

    if let Some(metadata) = tree.descendants_named(root, PUZZLE_NS, "metadata").first() {
        if let Some(title) = child_text(tree, *metadata, "title") {
            result = result.with_title(title);
        }
        if let Some(creator) = child_text(tree, *metadata, "creator") {
            result = result.with_creator(creator);
        }
    }

    Ok(result)
}

/// The only puzzle-namespace descendant with the given name.
fn single_descendant(tree: &XmlTree, scope: NodeId, name: &str) -> Result<NodeId> {
    match tree.descendants_named(scope, PUZZLE_NS, name).as_slice() {
        [] => Err(SchemaViolation::MissingElement(name.to_string()).into()),
        [only] => Ok(*only),
        _ => Err(SchemaViolation::DuplicateElement(name.to_string()).into()),
    }
}

/// Trimmed text of a named child, or `None` when absent or blank.
fn child_text(tree: &XmlTree, parent: NodeId, name: &str) -> Option<String> {
    let child = tree.child(parent, PUZZLE_NS, name)?;
    let text = tree.text(child);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Read a required, strictly positive integer attribute.
fn required_number(tree: &XmlTree, node: NodeId, attribute: &str) -> Result<u32> {
    let element = &tree.element(node).name;
    let value = tree
        .attr(node, attribute)
        .ok_or_else(|| SchemaViolation::MissingAttribute {
            element: element.clone(),
            attribute: attribute.to_string(),
        })?;
    positive(element, attribute, value)
}

/// Read an optional, strictly positive integer attribute.
fn optional_number(tree: &XmlTree, node: NodeId, attribute: &str) -> Result<Option<u32>> {
    tree.attr(node, attribute)
        .map(|value| positive(&tree.element(node).name, attribute, value))
        .transpose()
}

fn positive(element: &str, attribute: &str, value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::Schema(SchemaViolation::InvalidAttribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(puzzle: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<crossword-compiler xmlns="{COMPILER_NS}">
  <rectangular-puzzle xmlns="{PUZZLE_NS}">{puzzle}</rectangular-puzzle>
</crossword-compiler>"#
        )
    }

    const ONE_CELL: &str = r#"<crossword><grid width="1" height="1"><cell x="1" y="1"/></grid></crossword>"#;

    #[test]
    fn test_parse_minimal() {
        let xw = parse(wrap(ONE_CELL).as_bytes()).unwrap();
        assert_eq!((xw.width(), xw.height()), (1, 1));
        assert!(xw.clue_groups().is_empty());
        assert_eq!(xw.title(), None);
        assert_eq!(xw.creator(), None);
    }

    #[test]
    fn test_parse_metadata() {
        let doc = wrap(&format!(
            "<metadata><title> Prize Puzzle </title><creator>Setter</creator><copyright/></metadata>{ONE_CELL}"
        ));
        let xw = parse(doc.as_bytes()).unwrap();
        assert_eq!(xw.title(), Some("Prize Puzzle"));
        assert_eq!(xw.creator(), Some("Setter"));
    }

    #[test]
    fn test_blank_metadata_is_absent() {
        let doc = wrap(&format!("<metadata><title>  </title></metadata>{ONE_CELL}"));
        let xw = parse(doc.as_bytes()).unwrap();
        assert_eq!(xw.title(), None);
    }

    #[test]
    fn test_wrong_root_namespace() {
        let doc = format!(r#"<crossword-compiler xmlns="urn:other">{ONE_CELL}</crossword-compiler>"#);
        let err = parse(doc.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaViolation::UnexpectedRoot { .. })
        ));
    }

    #[test]
    fn test_crossword_in_wrong_namespace_is_missing() {
        let doc = format!(
            r#"<crossword-compiler xmlns="{COMPILER_NS}"><crossword><grid width="1" height="1"/></crossword></crossword-compiler>"#
        );
        let err = parse(doc.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaViolation::MissingElement(ref name)) if name == "crossword"
        ));
    }

    #[test]
    fn test_two_crosswords_rejected() {
        let doc = wrap(&format!("{ONE_CELL}{ONE_CELL}"));
        let err = parse(doc.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaViolation::DuplicateElement(_))
        ));
    }

    #[test]
    fn test_syntax_error_wins_over_schema_error() {
        // Wrong root namespace and an unclosed element: syntax is reported.
        let doc = r#"<root xmlns="urn:other"><crossword>"#;
        let err = parse(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::XmlSyntax { .. }), "{err}");
    }

    #[test]
    fn test_positive_rejects_zero_and_garbage() {
        assert!(positive("grid", "width", "0").is_err());
        assert!(positive("grid", "width", "-3").is_err());
        assert!(positive("grid", "width", "wide").is_err());
        assert_eq!(positive("grid", "width", " 15 ").unwrap(), 15);
    }
}
