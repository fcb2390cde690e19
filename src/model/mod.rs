//! Typed document model: source paragraphs and the Block IR.

mod block;
mod paragraph;

pub use block::{Block, BodyItem, CoverMeta, LessonSlide, MaterialRow, ResolvedImage};
pub use paragraph::{ParagraphKind, SourceParagraph, TextRun};
