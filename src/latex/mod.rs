//! Pure LaTeX generation from the crossword model.
//!
//! - [`escape`]: string escaping and smart quotes
//! - [`layout`]: grid cell sizing for the page
//! - [`render`]: model → complete LaTeX document
//!
//! Compiling the output to PDF is handled by [`crate::compile`].

mod escape;
mod layout;
mod render;

pub use escape::{escape, escape_latex, smart_quotes};
pub use layout::{DEFAULT_CELL_SIZE, MAX_GRID_HEIGHT, cell_size};
pub use render::{DEFAULT_TITLE, LatexRenderer, RenderConfig, render};
