//! Error types for crossprint operations.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while parsing, rendering, or producing a crossword.
///
/// The first three variants come from the core pipeline and mean the
/// document itself is broken. The rest belong to the collaborators around
/// it (fetching, compiling, printing, configuration).
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed XML at byte {position}: {message}")]
    XmlSyntax { position: u64, message: String },

    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),

    #[error("render error: {0}")]
    Render(String),

    #[error("no crossword available from {source_name} for {date}")]
    SourceUnavailable { source_name: String, date: String },

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("LaTeX compilation failed ({status})\n{log}")]
    Compile { status: String, log: String },

    #[error("printing failed: {0}")]
    Print(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{document}: {source}")]
    Document {
        document: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the identity of the document being processed.
    pub fn in_document(self, document: impl Into<String>) -> Self {
        Error::Document {
            document: document.into(),
            source: Box::new(self),
        }
    }

    /// The underlying error, looking through any [`Error::Document`] wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Document { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the error only means "no puzzle for this date".
    ///
    /// Drivers skip these and carry on; every other error points at a
    /// broken document or environment.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self.root(), Error::SourceUnavailable { .. })
    }
}

/// A well-formed document that does not have the expected CCXML shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("root element must be in namespace {expected}, found {found}")]
    UnexpectedRoot { expected: String, found: String },

    #[error("missing required element <{0}>")]
    MissingElement(String),

    #[error("expected exactly one <{0}> element")]
    DuplicateElement(String),

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("<{element}> has invalid {attribute}=\"{value}\"")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("<{0}> must not be empty")]
    EmptyText(String),

    #[error("no cell at {0}")]
    MissingCell(Coord),

    #[error("more than one cell at {0}")]
    DuplicateCell(Coord),
}

/// A 1-indexed grid coordinate as written in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={} y={}", self.x, self.y)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_wrapper_display() {
        let err = Error::Schema(SchemaViolation::MissingAttribute {
            element: "grid".into(),
            attribute: "height".into(),
        })
        .in_document("puzzle.xml");
        assert_eq!(
            err.to_string(),
            "puzzle.xml: schema violation: <grid> is missing required attribute 'height'"
        );
    }

    #[test]
    fn test_source_unavailable_through_wrapper() {
        let err = Error::SourceUnavailable {
            source_name: "es".into(),
            date: "2020-12-25".into(),
        }
        .in_document("es-2020-12-25.pdf");
        assert!(err.is_source_unavailable());
        assert!(!Error::Render("x".into()).is_source_unavailable());
    }

    #[test]
    fn test_root_unwraps_nested_documents() {
        let err = Error::Render("bad".into()).in_document("a").in_document("b");
        assert!(matches!(err.root(), Error::Render(msg) if msg == "bad"));
    }
}
