//! In-memory crossword model.
//!
//! A [`Crossword`] is built once per source document and only read after
//! that. Its constructor checks the grid shape, so every value in circulation
//! has exactly `height` rows of `width` cells.

use serde::Serialize;

use crate::error::{Error, Result};

/// A parsed crossword: grid, clue groups and optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Crossword {
    width: u32,
    height: u32,
    grid: Vec<Vec<Cell>>,
    clue_groups: Vec<ClueGroup>,
    title: Option<String>,
    creator: Option<String>,
}

/// Whether a cell holds a letter or is blocked out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Letter,
    Block,
}

/// One grid position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Clue number printed in the corner of the cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Expected answer for the cell; `None` for an unsolved grid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

/// A titled list of clues, e.g. "Across".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClueGroup {
    pub title: String,
    pub clues: Vec<Clue>,
}

/// A single clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clue {
    pub number: u32,
    pub text: String,
    /// Word-length annotation such as `5,3`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Crossword {
    /// Build a crossword, checking that `grid` is `height` rows of `width` cells.
    pub fn new(
        width: u32,
        height: u32,
        grid: Vec<Vec<Cell>>,
        clue_groups: Vec<ClueGroup>,
    ) -> Result<Self> {
        check_shape(width, height, &grid)?;
        Ok(Self {
            width,
            height,
            grid,
            clue_groups,
            title: None,
            creator: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rows of cells, top to bottom.
    pub fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    /// Cell at a 0-indexed column and row.
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.grid.get(y).and_then(|row| row.get(x))
    }

    /// Clue groups in document order.
    pub fn clue_groups(&self) -> &[ClueGroup] {
        &self.clue_groups
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }
}

/// Verify that a grid has exactly `height` rows of exactly `width` cells.
pub(crate) fn check_shape(width: u32, height: u32, grid: &[Vec<Cell>]) -> Result<()> {
    if grid.len() != height as usize {
        return Err(Error::Render(format!(
            "grid has {} rows, expected {height}",
            grid.len()
        )));
    }
    if let Some((y, row)) = grid
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != width as usize)
    {
        return Err(Error::Render(format!(
            "row {} has {} cells, expected {width}",
            y + 1,
            row.len()
        )));
    }
    Ok(())
}

impl Cell {
    pub fn letter() -> Self {
        Self::default()
    }

    pub fn block() -> Self {
        Self {
            kind: CellKind::Block,
            ..Self::default()
        }
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    pub fn is_block(&self) -> bool {
        self.kind == CellKind::Block
    }
}

impl ClueGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            clues: Vec::new(),
        }
    }

    pub fn with_clue(mut self, clue: Clue) -> Self {
        self.clues.push(clue);
        self
    }
}

impl Clue {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}
