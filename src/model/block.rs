//! Block-level intermediate representation produced by the segmenter.

use serde::{Deserialize, Serialize};

/// An image resolved to its binary content and, when the upload succeeded,
/// a hosted URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedImage {
    /// Image file name inside the package (e.g. "image_1.png")
    pub name: String,

    /// Raw image bytes
    #[serde(skip)]
    pub data: Vec<u8>,

    /// Hosted URL when the uploader succeeded, None otherwise
    pub url: Option<String>,
}

impl ResolvedImage {
    /// File extension of the image, lowercased ("png" when unknown).
    pub fn extension(&self) -> &str {
        self.name.rsplit_once('.').map(|(_, e)| e).unwrap_or("png")
    }
}

/// One item of a block body, in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BodyItem {
    /// A plain text line
    TextLine(String),

    /// A bulleted/numbered line
    ListLine(String),

    /// An embedded image
    ImageItem(ResolvedImage),
}

/// A logical section of the document: an optional title plus an ordered body
/// of text, list, and image items. Built once per conversion and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    /// Title text from the boundary paragraph; None only for a leading block
    /// before any boundary is seen
    pub title: Option<String>,

    /// Heading level (1..=3) when the boundary was a real heading style
    pub heading_level: Option<u8>,

    /// Body items in source order
    pub body: Vec<BodyItem>,
}

impl Block {
    /// Create an untitled block.
    pub fn untitled() -> Self {
        Self::default()
    }

    /// Create a titled block.
    pub fn titled(title: impl Into<String>, heading_level: Option<u8>) -> Self {
        Self {
            title: Some(title.into()),
            heading_level,
            body: Vec::new(),
        }
    }

    /// Whether the block carries neither a title nor body content.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_empty()
    }

    /// All text of the block (title plus text/list lines), newline-joined.
    /// This is what gets handed to the content rewriter, one call per block.
    pub fn raw_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(ref title) = self.title {
            parts.push(title);
        }
        for item in &self.body {
            match item {
                BodyItem::TextLine(t) | BodyItem::ListLine(t) => parts.push(t),
                BodyItem::ImageItem(_) => {}
            }
        }
        parts.join("\n")
    }
}

/// Structured slide content returned by the content rewriter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonSlide {
    /// Short slide title
    pub title: String,

    /// Up to four one-line bullets
    pub bullets: Vec<String>,

    /// One check question for the class
    pub check: String,
}

/// Cover page metadata for the workbook renderer. Every labelled field is
/// rendered even when its value is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverMeta {
    /// Subject shown large on the cover (e.g. "BWI")
    pub subject: String,

    /// Profile/elective part ("Keuze/profieldeel:" line)
    pub profile: String,

    /// Assignment number
    pub assignment_no: String,

    /// Assignment title
    pub assignment_title: String,

    /// Duration of the assignment
    pub duration: String,

    /// Teacher name
    pub teacher: String,

    /// Class name
    pub class_name: String,

    /// Logo placed top-right on the cover
    #[serde(skip)]
    pub logo: Option<Vec<u8>>,

    /// Optional cover photo
    #[serde(skip)]
    pub cover_photo: Option<Vec<u8>>,
}

/// One row of the workbook materials table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialRow {
    pub number: String,
    pub quantity: String,
    pub name: String,
    pub length: String,
    pub width: String,
    pub thickness: String,
    pub material: String,
}
