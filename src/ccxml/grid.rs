//! Grid and cell extraction.

use std::collections::HashMap;

use crate::error::{Coord, Result, SchemaViolation};
use crate::model::{Cell, CellKind};

use super::tree::{NodeId, XmlTree};
use super::{PUZZLE_NS, optional_number, required_number};

/// Grid dimensions and cells, rows top to bottom.
#[derive(Debug)]
pub(super) struct ParsedGrid {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<Vec<Cell>>,
}

pub(super) fn parse_grid(tree: &XmlTree, crossword: NodeId) -> Result<ParsedGrid> {
    let grid = tree
        .child(crossword, PUZZLE_NS, "grid")
        .ok_or_else(|| SchemaViolation::MissingElement("grid".to_string()))?;

    let width = required_number(tree, grid, "width")?;
    let height = required_number(tree, grid, "height")?;

    let index = index_cells(tree, grid, width, height)?;

    // Every indexed cell is in range and unique, so a short index has a gap.
    // The first gap lies within `index.len() + 1` steps of the scan.
    let area = u64::from(width) * u64::from(height);
    if (index.len() as u64) < area
        && let Some(gap) = coordinates(width, height).find(|coord| !index.contains_key(coord))
    {
        return Err(SchemaViolation::MissingCell(gap).into());
    }

    let mut cells = Vec::new();
    for y in 1..=height {
        let mut row = Vec::new();
        for x in 1..=width {
            let coord = Coord { x, y };
            let node = index
                .get(&coord)
                .copied()
                .ok_or(SchemaViolation::MissingCell(coord))?;
            row.push(parse_cell(tree, node)?);
        }
        cells.push(row);
    }

    Ok(ParsedGrid {
        width,
        height,
        cells,
    })
}

/// Map every `<cell>` child of the grid to its coordinate in one pass.
fn index_cells(
    tree: &XmlTree,
    grid: NodeId,
    width: u32,
    height: u32,
) -> Result<HashMap<Coord, NodeId>> {
    let cells: Vec<NodeId> = tree.children_named(grid, PUZZLE_NS, "cell").collect();
    let mut index = HashMap::with_capacity(cells.len());

    for cell in cells {
        let x = required_number(tree, cell, "x")?;
        let y = required_number(tree, cell, "y")?;
        if x > width {
            return Err(out_of_range("x", x).into());
        }
        if y > height {
            return Err(out_of_range("y", y).into());
        }

        let coord = Coord { x, y };
        if index.insert(coord, cell).is_some() {
            return Err(SchemaViolation::DuplicateCell(coord).into());
        }
    }

    Ok(index)
}

/// Grid coordinates in row-major order.
fn coordinates(width: u32, height: u32) -> impl Iterator<Item = Coord> {
    (1..=height).flat_map(move |y| (1..=width).map(move |x| Coord { x, y }))
}

fn out_of_range(attribute: &str, value: u32) -> SchemaViolation {
    SchemaViolation::InvalidAttribute {
        element: "cell".to_string(),
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

fn parse_cell(tree: &XmlTree, node: NodeId) -> Result<Cell> {
    let kind = match tree.attr(node, "type") {
        None | Some("letter") => CellKind::Letter,
        Some("block") => CellKind::Block,
        Some(other) => {
            return Err(SchemaViolation::InvalidAttribute {
                element: "cell".to_string(),
                attribute: "type".to_string(),
                value: other.to_string(),
            }
            .into());
        }
    };

    Ok(Cell {
        kind,
        number: optional_number(tree, node, "number")?,
        solution: tree.attr(node, "solution").map(str::to_string),
    })
}
