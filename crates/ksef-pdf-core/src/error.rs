//! Error types for the ksef-pdf-core library.

use thiserror::Error;

/// Main error type for the ksef-pdf library.
#[derive(Error, Debug)]
pub enum KsefError {
    /// Input XML could not be parsed.
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// Parsed XML does not have the expected document structure.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// QR code template could not be filled.
    #[error("QR code template error: {0}")]
    Template(#[from] TemplateError),

    /// Content tree could not be rendered.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning raw text into a parsed tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The markup is malformed.
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },

    /// The input contains no element at all.
    #[error("document contains no root element")]
    Empty,
}

/// Structural errors in an otherwise well-formed document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The expected top-level element is absent.
    #[error("missing root element <{0}>")]
    RootElementMissing(String),

    /// The invoice declares a schema revision this library cannot lay out.
    #[error("unsupported invoice schema: {0}")]
    UnsupportedSchema(String),
}

/// Errors raised while substituting QR code template placeholders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder was requested but its source field is absent.
    #[error("cannot fill {placeholder}: field {path} not found in the XML")]
    MissingField {
        placeholder: &'static str,
        path: &'static str,
    },
}

/// Errors related to PDF output.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Encoding a page content stream failed.
    #[error("failed to encode page content: {0}")]
    Content(String),

    /// Serializing the PDF document failed.
    #[error("failed to write PDF: {0}")]
    Write(String),
}

/// Result type for the ksef-pdf library.
pub type Result<T> = std::result::Result<T, KsefError>;
