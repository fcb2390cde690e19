//! Rendering options shared by the output renderers.

/// Platform variant for the HTML renderer. This is the only behavioral
/// difference between the two target platforms and is threaded through as a
/// single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlVariant {
    /// Materialize-style output: `class="browser-default"` lists, fixed-size
    /// cropped images, a `<br>` separator between bold-titled sections
    #[default]
    Styled,

    /// Bare tags, no classes or inline styles
    Bare,
}

/// Geometry and budget constants for the slide renderer. All vertical
/// measurements are in inches on a 10 x 7.5" slide.
#[derive(Debug, Clone)]
pub struct SlideOptions {
    /// Maximum estimated text lines on one slide before pagination
    pub max_lines_per_slide: usize,

    /// Assumed characters per rendered line for the line estimate
    pub chars_per_line: usize,

    /// Bottom margin; content never starts past this offset
    pub max_bottom_in: f32,

    /// Vertical offset of the first body box on a titled slide
    pub body_top_in: f32,

    /// Vertical offset of the first box on a continuation slide
    pub continuation_top_in: f32,

    /// Reserved height for an inline image
    pub image_height_in: f32,

    /// Title of the leading deck slide
    pub deck_title: String,

    /// Subtitle of the leading deck slide
    pub deck_subtitle: String,
}

impl SlideOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-slide line budget.
    pub fn with_max_lines(mut self, lines: usize) -> Self {
        self.max_lines_per_slide = lines.max(1);
        self
    }

    /// Set the characters-per-line estimate.
    pub fn with_chars_per_line(mut self, chars: usize) -> Self {
        self.chars_per_line = chars.max(1);
        self
    }

    /// Set the leading slide title.
    pub fn with_deck_title(mut self, title: impl Into<String>) -> Self {
        self.deck_title = title.into();
        self
    }

    /// Estimated rendered line count for a text, minimum 1 for non-empty
    /// text. Drives both overflow decisions and reserved box heights.
    pub fn estimated_lines(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        text.chars().count().div_ceil(self.chars_per_line).max(1)
    }
}

impl Default for SlideOptions {
    fn default() -> Self {
        Self {
            max_lines_per_slide: 12,
            chars_per_line: 75,
            max_bottom_in: 6.6,
            body_top_in: 2.0,
            continuation_top_in: 1.0,
            image_height_in: 3.0,
            deck_title: "Inhoud uit Word".to_string(),
            deck_subtitle: "Geconverteerd met undocx".to_string(),
        }
    }
}
