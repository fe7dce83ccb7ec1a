//! Clue group extraction.

use crate::error::{Result, SchemaViolation};
use crate::model::{Clue, ClueGroup};

use super::tree::{NodeId, XmlTree};
use super::{PUZZLE_NS, required_number};

/// Every `<clues>` group under the crossword, in document order.
pub(super) fn parse_clue_groups(tree: &XmlTree, crossword: NodeId) -> Result<Vec<ClueGroup>> {
    tree.children_named(crossword, PUZZLE_NS, "clues")
        .map(|group| parse_group(tree, group))
        .collect()
}

fn parse_group(tree: &XmlTree, group: NodeId) -> Result<ClueGroup> {
    let title = tree
        .child(group, PUZZLE_NS, "title")
        .ok_or_else(|| SchemaViolation::MissingElement("title".to_string()))?;
    let title = required_text(tree, title)?;

    let clues = tree
        .children_named(group, PUZZLE_NS, "clue")
        .map(|clue| parse_clue(tree, clue))
        .collect::<Result<Vec<_>>>()?;

    Ok(ClueGroup { title, clues })
}

fn parse_clue(tree: &XmlTree, clue: NodeId) -> Result<Clue> {
    Ok(Clue {
        number: required_number(tree, clue, "number")?,
        text: required_text(tree, clue)?,
        format: tree
            .attr(clue, "format")
            .map(str::trim)
            .filter(|format| !format.is_empty())
            .map(str::to_string),
    })
}

fn required_text(tree: &XmlTree, node: NodeId) -> Result<String> {
    let text = tree.text(node);
    let text = text.trim();
    if text.is_empty() {
        return Err(SchemaViolation::EmptyText(tree.element(node).name.clone()).into());
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn groups(body: &str) -> Result<Vec<ClueGroup>> {
        let doc = format!(r#"<crossword xmlns="{PUZZLE_NS}">{body}</crossword>"#);
        let tree = XmlTree::parse(&doc)?;
        parse_clue_groups(&tree, tree.root())
    }

    #[test]
    fn test_groups_keep_document_order() {
        let parsed = groups(
            r#"<clues><title>Down</title><clue number="2">Second</clue><clue number="1">First</clue></clues>
               <clues><title>Across</title><clue number="3">Third</clue></clues>"#,
        )
        .unwrap();
        let titles: Vec<_> = parsed.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Down", "Across"]);
        let numbers: Vec<_> = parsed[0].clues.iter().map(|c| c.number).collect();
        assert_eq!(numbers, [2, 1]);
    }

    #[test]
    fn test_title_markup_and_whitespace() {
        let parsed = groups(r#"<clues><title> <b>Across</b> </title></clues>"#).unwrap();
        assert_eq!(parsed[0].title, "Across");
        assert!(parsed[0].clues.is_empty());
    }

    #[test]
    fn test_clue_fields() {
        let parsed = groups(
            r#"<clues><title>Across</title>
               <clue number="1" format="5,3">  Big <i>cat</i> &amp; co  </clue>
               <clue number="4">No format</clue></clues>"#,
        )
        .unwrap();
        let clues = &parsed[0].clues;
        assert_eq!(clues[0], Clue::new(1, "Big cat & co").with_format("5,3"));
        assert_eq!(clues[1], Clue::new(4, "No format"));
    }

    #[test]
    fn test_blank_format_is_absent() {
        let parsed = groups(
            r#"<clues><title>Across</title>
               <clue number="1" format="">Letter</clue>
               <clue number="2" format="  ">Space</clue></clues>"#,
        )
        .unwrap();
        assert_eq!(parsed[0].clues[0].format, None);
        assert_eq!(parsed[0].clues[1].format, None);
    }

    #[test]
    fn test_missing_title() {
        let err = groups(r#"<clues><clue number="1">x</clue></clues>"#).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaViolation::MissingElement(ref name)) if name == "title"
        ));
    }

    #[test]
    fn test_empty_clue_text() {
        let err = groups(r#"<clues><title>A</title><clue number="1">  </clue></clues>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaViolation::EmptyText(ref name)) if name == "clue"
        ));
    }

    #[test]
    fn test_clue_number_required() {
        let err = groups(r#"<clues><title>A</title><clue>text</clue></clues>"#).unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaViolation::MissingAttribute { ref attribute, .. }) if attribute == "number"
        ));
    }
}
