//! Output renderers over the block sequence.
//!
//! All three targets consume the same `Vec<Block>` produced by the
//! segmenter: HTML fragments, a paginated slide deck, and the workbook
//! document. The lesson document additionally runs each block through the
//! content rewriter.

mod html;
mod lesson;
mod options;
mod slides;
mod workbook;

pub use html::{render_html, HtmlRenderer};
pub use lesson::render_lesson_docx;
pub use options::{HtmlVariant, SlideOptions};
pub use slides::{
    render_slides, render_slides_rewritten, Slide, SlideDeck, SlideKind, SlideRenderer, SlideShape,
};
pub use workbook::{render_workbook, MATERIALS_HEADER};
