//! Docx ingestion: zip package reading and paragraph extraction.
//!
//! The parser builds the typed [`SourceParagraph`] stream and the embedded
//! image list once; everything downstream (classifier, segmenter,
//! renderers) operates on that model and never revisits the XML.

mod docx;

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::images::EmbeddedImage;
use crate::model::SourceParagraph;

pub(crate) use docx::DOCUMENT_PART;

/// A parsed Word document: ordered paragraphs plus embedded images.
#[derive(Debug, Default)]
pub struct DocxDocument {
    /// Paragraphs in document order
    pub paragraphs: Vec<SourceParagraph>,

    /// Embedded images, keyed by relationship id, in package order
    pub images: Vec<EmbeddedImage>,
}

impl DocxDocument {
    /// Whether the document has no paragraphs at all.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Plain text of the whole document, one line per non-empty paragraph.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parser over an in-memory docx package.
pub struct DocxParser {
    data: Vec<u8>,
}

impl DocxParser {
    /// Open a docx file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse a docx package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 4 || &data[..4] != b"PK\x03\x04" {
            return Err(Error::UnknownFormat);
        }
        Ok(Self {
            data: data.to_vec(),
        })
    }

    /// Parse a docx package from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse the package into a [`DocxDocument`].
    ///
    /// A package with zero paragraphs parses successfully; the segmenter
    /// turns it into a single empty block downstream.
    pub fn parse(&self) -> Result<DocxDocument> {
        let mut archive = zip::ZipArchive::new(Cursor::new(&self.data))?;

        let styles = docx::parse_styles(&mut archive)?;
        let rels = docx::parse_relationships(&mut archive)?;
        let images = docx::load_images(&mut archive, &rels)?;

        let document_xml = docx::read_part(&mut archive, DOCUMENT_PART)?;
        let paragraphs = docx::extract_paragraphs(&document_xml, &styles)?;

        debug!(
            "parsed {} paragraphs, {} embedded images",
            paragraphs.len(),
            images.len()
        );

        Ok(DocxDocument { paragraphs, images })
    }
}
