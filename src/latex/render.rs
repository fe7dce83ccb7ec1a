//! Crossword → LaTeX rendering.
//!
//! Output targets the `crossword` document class, which pulls in `cwpuzzle`
//! for the `Puzzle` environment and `paralist`/`multicol` for the clue list.
//! No I/O is performed here.

use log::debug;

use crate::error::Result;
use crate::model::{Cell, CellKind, ClueGroup, Crossword, check_shape};

use super::escape::{escape, escape_latex};
use super::layout::{DEFAULT_CELL_SIZE, MAX_GRID_HEIGHT, cell_size};

/// Title used when the puzzle has none.
pub const DEFAULT_TITLE: &str = "Crossword";

/// Width that every grid cell entry is padded to, including its leading `|`.
const CELL_COLUMN_WIDTH: usize = 7;

/// Configuration for LaTeX rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Cell edge length for small grids, in cm.
    pub default_cell_size: f64,
    /// Maximum printed grid height, in cm.
    pub max_grid_height: f64,
    /// Number of columns for the clue list.
    pub clue_columns: u32,
    /// Convert straight quotes to directional ones in titles and clues.
    pub smart_quotes: bool,
    /// Print solutions in letter cells. When false, every letter cell is blank.
    pub show_solution: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_cell_size: DEFAULT_CELL_SIZE,
            max_grid_height: MAX_GRID_HEIGHT,
            clue_columns: 4,
            smart_quotes: true,
            show_solution: true,
        }
    }
}

/// Renders a [`Crossword`] as a complete LaTeX document.
#[derive(Debug, Clone, Default)]
pub struct LatexRenderer {
    config: RenderConfig,
}

impl LatexRenderer {
    /// Create a renderer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the specified configuration.
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render the whole document.
    ///
    /// The grid shape is checked again here; an inconsistent model produces
    /// an error and no output.
    pub fn render(&self, crossword: &Crossword) -> Result<String> {
        check_shape(crossword.width(), crossword.height(), crossword.grid())?;
        let size = cell_size(
            crossword.height(),
            self.config.default_cell_size,
            self.config.max_grid_height,
        )?;

        let mut output = String::new();
        output.push_str("\\documentclass{crossword}\n");
        output.push_str("\\begin{document}\n");
        output.push_str(&format!(
            "\\title{{{}}}\n",
            self.text(crossword.title().unwrap_or(DEFAULT_TITLE))
        ));
        if let Some(creator) = crossword.creator() {
            output.push_str(&format!("\\author{{{}}}\n", self.text(creator)));
        }
        output.push_str("\\maketitle\n");
        output.push_str(&format!("\\renewcommand\\PuzzleUnitlength{{{size}cm}}\n"));
        output.push('\n');
        output.push_str(&self.render_grid(crossword));
        output.push('\n');
        output.push_str(&self.render_clues(crossword.clue_groups()));
        output.push('\n');
        output.push_str("\\end{document}\n");

        debug!(
            "rendered {}x{} crossword at {size}cm per cell ({} bytes)",
            crossword.width(),
            crossword.height(),
            output.len()
        );

        Ok(output)
    }

    /// The `Puzzle` environment: one padded entry per cell, one line per row.
    pub fn render_grid(&self, crossword: &Crossword) -> String {
        let mut output = format!(
            "\\begin{{Puzzle}}{{{}}}{{{}}}%\n",
            crossword.width(),
            crossword.height()
        );
        for row in crossword.grid() {
            for cell in row {
                let entry = format!("|{}", self.cell_entry(cell));
                output.push_str(&format!("{entry:<width$}", width = CELL_COLUMN_WIDTH));
            }
            output.push_str("|.\n");
        }
        output.push_str("\\end{Puzzle}\n");
        output
    }

    /// The clue list: one section per group inside a `multicols` block.
    pub fn render_clues(&self, groups: &[ClueGroup]) -> String {
        let mut output = format!("\\begin{{multicols}}{{{}}}\n", self.config.clue_columns);
        for group in groups {
            output.push_str(&format!("\\section*{{{}}}\n\n", self.text(&group.title)));
            output.push_str("\\begin{compactitem}\n");
            for clue in &group.clues {
                let mut text = self.text(&clue.text);
                if let Some(format) = clue.format.as_deref().filter(|f| !f.trim().is_empty()) {
                    text.push(' ');
                    text.push_str(&self.text(&format_suffix(format)));
                }
                output.push_str(&format!("\\item[{}]{{{text}}}\n", clue.number));
            }
            output.push_str("\\end{compactitem}\n");
        }
        output.push_str("\\end{multicols}\n");
        output
    }

    fn cell_entry(&self, cell: &Cell) -> String {
        match cell.kind {
            CellKind::Block => "*".to_string(),
            CellKind::Letter => {
                let mut entry = String::new();
                if let Some(number) = cell.number {
                    entry.push_str(&format!("[{number}]"));
                }
                if self.config.show_solution
                    && let Some(solution) = &cell.solution
                {
                    entry.push_str(&escape_latex(solution));
                }
                entry
            }
        }
    }

    fn text(&self, text: &str) -> String {
        escape(text, self.config.smart_quotes)
    }
}

/// Render with the default configuration.
pub fn render(crossword: &Crossword) -> Result<String> {
    LatexRenderer::new().render(crossword)
}

/// Parenthesize a format annotation unless it already is.
fn format_suffix(format: &str) -> String {
    let format = format.trim();
    if format.starts_with('(') && format.ends_with(')') {
        format.to_string()
    } else {
        format!("({format})")
    }
}
