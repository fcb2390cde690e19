//! Lesson rewrite document: each block rewritten into a short teachable
//! section (heading, a few plain sentences, a bold check question).

use crate::error::Result;
use crate::model::Block;
use crate::ooxml::docx::{DocxBuilder, DocxRun};
use crate::rewrite::{rewrite_or_fallback, ContentRewriter, MAX_BULLETS};

/// Render the lesson-style DOCX. Blocks without any text are skipped; a
/// failing rewriter degrades to the local summarizer per block.
pub fn render_lesson_docx(
    blocks: &[Block],
    rewriter: Option<&dyn ContentRewriter>,
) -> Result<Vec<u8>> {
    let mut builder = DocxBuilder::new();

    for block in blocks {
        let raw = block.raw_text();
        if raw.is_empty() {
            continue;
        }
        let lesson = rewrite_or_fallback(rewriter, &raw, MAX_BULLETS);

        builder.heading(&lesson.title, 1);
        for line in &lesson.bullets {
            builder.paragraph(line);
        }
        if !lesson.check.is_empty() {
            builder.runs_paragraph(vec![DocxRun::bold(&lesson.check)]);
        }
        builder.empty_line();
    }

    builder.build()
}
