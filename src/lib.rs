//! # crossprint
//!
//! Typeset Crossword Compiler XML (CCXML) puzzles as LaTeX, ready for a TeX
//! engine to turn into a printable PDF.
//!
//! ## Pipeline
//!
//! - [`ccxml::parse`] reads a CCXML document into a [`Crossword`]
//! - [`latex::render`] turns the model into a complete LaTeX document
//! - [`compile::XelatexCompiler`] runs `xelatex` on the result
//!
//! Parsing and rendering are pure functions of their input; fetching puzzles
//! ([`source`]), compiling and printing live at the edges.
//!
//! ## Quick Start
//!
//! ```no_run
//! use crossprint::{ccxml, latex};
//!
//! let xml = std::fs::read("puzzle.xml").unwrap();
//! let crossword = ccxml::parse(&xml).unwrap();
//! let tex = latex::render(&crossword).unwrap();
//! std::fs::write("puzzle.tex", tex).unwrap();
//! ```
//!
//! ## Building a model by hand
//!
//! ```
//! use crossprint::{Cell, Clue, ClueGroup, Crossword, latex};
//!
//! let grid = vec![vec![Cell::letter().with_number(1).with_solution("I"), Cell::block()]];
//! let clues = vec![ClueGroup::new("Across").with_clue(Clue::new(1, "Me").with_format("1"))];
//! let crossword = Crossword::new(2, 1, grid, clues).unwrap().with_title("Tiny");
//!
//! let tex = latex::render(&crossword).unwrap();
//! assert!(tex.contains("\\item[1]{Me (1)}"));
//! ```

pub mod ccxml;
pub mod compile;
pub mod dates;
pub mod error;
pub mod latex;
pub mod model;
pub mod print;
pub mod source;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result, SchemaViolation};
pub use latex::{LatexRenderer, RenderConfig};
pub use model::{Cell, CellKind, Clue, ClueGroup, Crossword};

/// Parse a CCXML document and render it with the given configuration.
pub fn xml_to_latex(bytes: &[u8], config: &RenderConfig) -> Result<String> {
    let crossword = ccxml::parse(bytes)?;
    LatexRenderer::with_config(config.clone()).render(&crossword)
}
