//! Paragraph classification.
//!
//! `classify` is a pure function over the pre-extracted [`SourceParagraph`]
//! fields; it never touches XML or performs I/O. Precedence, first match
//! wins: heading style, bold line, ALL-CAPS line, image, list item, plain
//! text, empty.

use crate::model::{ParagraphKind, SourceParagraph};

/// Maximum length for the ALL-CAPS title heuristic.
const ALL_CAPS_MAX_LEN: usize = 48;

/// Style-name prefixes that mark a heading paragraph.
const HEADING_MARKERS: [&str; 2] = ["heading", "kop"];

/// Style-name tokens that mark a list paragraph.
const LIST_MARKERS: [&str; 3] = ["list", "lijst", "opsom"];

/// Classify one source paragraph into its semantic kind.
pub fn classify(para: &SourceParagraph) -> ParagraphKind {
    let text = para.plain_text();

    if let Some(level) = heading_level(&para.style_name) {
        return ParagraphKind::Heading(level);
    }

    let is_list = is_list_paragraph(para);

    if para.has_bold_run() && !para.has_image() && !is_list {
        return ParagraphKind::BoldLine;
    }

    if is_all_caps_title(&text) && !para.has_image() && !is_list {
        return ParagraphKind::BoldLine;
    }

    if para.has_image() {
        return ParagraphKind::ImageParagraph;
    }

    if is_list && !text.is_empty() {
        return ParagraphKind::ListItem;
    }

    if !text.is_empty() {
        return ParagraphKind::PlainText;
    }

    ParagraphKind::Empty
}

/// Heading level from the style name, or None when the style is not a
/// heading. The level comes from a trailing digit ("Heading 1", "Kop 2");
/// unparseable levels default to 2. Clamped to 1..=3.
fn heading_level(style_name: &str) -> Option<u8> {
    let lower = style_name.trim().to_lowercase();
    if !HEADING_MARKERS.iter().any(|m| lower.starts_with(m)) {
        return None;
    }
    let level = lower
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .and_then(|tail| tail.parse::<u8>().ok())
        .unwrap_or(2);
    Some(level.clamp(1, 3))
}

/// List detection from structural metadata: style token or numbering
/// properties, never the text itself (the bullet glyph is not stored as
/// text in real documents).
fn is_list_paragraph(para: &SourceParagraph) -> bool {
    if para.has_numbering {
        return true;
    }
    let lower = para.style_name.to_lowercase();
    LIST_MARKERS.iter().any(|m| lower.contains(m))
}

/// Fallback title detector for documents that don't use heading styles:
/// a short line with letters but no lowercase ones.
fn is_all_caps_title(text: &str) -> bool {
    if text.is_empty() || text.chars().count() > ALL_CAPS_MAX_LEN {
        return false;
    }
    text.chars().any(|c| c.is_alphabetic()) && !text.chars().any(|c| c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextRun;

    fn para(text: &str, style: &str) -> SourceParagraph {
        SourceParagraph::with_text(text, style)
    }

    #[test]
    fn test_heading_styles() {
        assert_eq!(classify(&para("Intro", "Heading 1")), ParagraphKind::Heading(1));
        assert_eq!(classify(&para("Intro", "heading 3")), ParagraphKind::Heading(3));
        assert_eq!(classify(&para("Intro", "Kop 2")), ParagraphKind::Heading(2));
        // Unparseable level defaults to 2, deep levels clamp to 3
        assert_eq!(classify(&para("Intro", "Heading")), ParagraphKind::Heading(2));
        assert_eq!(classify(&para("Intro", "Heading 7")), ParagraphKind::Heading(3));
    }

    #[test]
    fn test_bold_line() {
        let p = SourceParagraph {
            runs: vec![TextRun::bold("Belangrijk")],
            style_name: "Normal".into(),
            ..Default::default()
        };
        assert_eq!(classify(&p), ParagraphKind::BoldLine);
    }

    #[test]
    fn test_bold_list_item_stays_list() {
        let p = SourceParagraph {
            runs: vec![TextRun::bold("Eerste punt")],
            style_name: "List Paragraph".into(),
            ..Default::default()
        };
        assert_eq!(classify(&p), ParagraphKind::ListItem);
    }

    #[test]
    fn test_all_caps_heuristic() {
        assert_eq!(classify(&para("VEILIGHEID", "Normal")), ParagraphKind::BoldLine);
        // Lowercase present → plain text
        assert_eq!(classify(&para("Veiligheid", "Normal")), ParagraphKind::PlainText);
        // Too long → plain text
        let long = "A".repeat(ALL_CAPS_MAX_LEN + 1);
        assert_eq!(classify(&para(&long, "Normal")), ParagraphKind::PlainText);
        // Digits only (no letters) → not a title
        assert_eq!(classify(&para("2024", "Normal")), ParagraphKind::PlainText);
    }

    #[test]
    fn test_all_caps_limit_counts_characters_not_bytes() {
        // 48 characters but well over 48 bytes
        let accented = format!("CAFÉ {}", "É".repeat(ALL_CAPS_MAX_LEN - 5));
        assert_eq!(accented.chars().count(), ALL_CAPS_MAX_LEN);
        assert!(accented.len() > ALL_CAPS_MAX_LEN);
        assert_eq!(classify(&para(&accented, "Normal")), ParagraphKind::BoldLine);
    }

    #[test]
    fn test_image_wins_over_caption_text() {
        let p = SourceParagraph {
            runs: vec![TextRun::new("figuur 1: kabel")],
            style_name: "Normal".into(),
            image_refs: vec!["rId5".into()],
            ..Default::default()
        };
        assert_eq!(classify(&p), ParagraphKind::ImageParagraph);
    }

    #[test]
    fn test_list_by_numbering_metadata() {
        let p = SourceParagraph {
            runs: vec![TextRun::new("stap een")],
            style_name: "Normal".into(),
            has_numbering: true,
            ..Default::default()
        };
        assert_eq!(classify(&p), ParagraphKind::ListItem);
    }

    #[test]
    fn test_list_by_style_tokens() {
        assert_eq!(classify(&para("punt", "Lijstalinea")), ParagraphKind::ListItem);
        assert_eq!(classify(&para("punt", "Opsomming")), ParagraphKind::ListItem);
    }

    #[test]
    fn test_empty_and_plain() {
        assert_eq!(classify(&para("  ", "Normal")), ParagraphKind::Empty);
        assert_eq!(classify(&para("Gewone tekst", "Normal")), ParagraphKind::PlainText);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let p = para("VEILIGHEID", "Normal");
        assert_eq!(classify(&p), classify(&p));
    }
}
