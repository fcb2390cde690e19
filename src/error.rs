//! Error types for the undocx library.

use std::io;
use thiserror::Error;

/// Result type alias for undocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a recognizable OOXML package.
    #[error("Unknown file format: not a valid docx package")]
    UnknownFormat,

    /// A required package part is missing (e.g. word/document.xml).
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Error reading the zip container.
    #[error("Package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error parsing OOXML markup.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document structure could not be interpreted.
    #[error("Docx parsing error: {0}")]
    DocxParse(String),

    /// Image upload to the configured host failed. Recovered internally by
    /// embedding the raw bytes; never terminates a conversion.
    #[error("Image upload failed: {0}")]
    ImageUpload(String),

    /// The content rewriter was unreachable or returned malformed output.
    /// Recovered internally by the local summarizer.
    #[error("Rewrite failed: {0}")]
    Rewrite(String),

    /// Error while assembling output (HTML, PPTX, DOCX). Fatal for the
    /// conversion request.
    #[error("Rendering error: {0}")]
    Render(String),
}
