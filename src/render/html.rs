//! HTML rendering of the block sequence.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;

use crate::error::Result;
use crate::model::{Block, BodyItem, ResolvedImage};

use super::HtmlVariant;

const IMG_CROP_STYLE: &str = "width:300px;height:300px;object-fit:cover;\
border:1px solid #ccc;border-radius:8px;padding:4px;";

/// Convert blocks to an HTML fragment.
pub fn render_html(blocks: &[Block], variant: HtmlVariant) -> Result<String> {
    Ok(HtmlRenderer::new(variant).render(blocks))
}

/// HTML renderer. Output is byte-deterministic for a given block sequence
/// and variant.
pub struct HtmlRenderer {
    variant: HtmlVariant,
    sentence_end: Regex,
}

impl HtmlRenderer {
    pub fn new(variant: HtmlVariant) -> Self {
        Self {
            variant,
            sentence_end: Regex::new(r"[.!?]$").expect("static pattern"),
        }
    }

    pub fn render(&self, blocks: &[Block]) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut bold_title_seen = false;

        for block in blocks {
            self.render_title(&mut parts, block, &mut bold_title_seen);
            self.render_body(&mut parts, block);
        }

        parts.join("\n")
    }

    fn render_title(&self, parts: &mut Vec<String>, block: &Block, bold_title_seen: &mut bool) {
        let Some(ref title) = block.title else {
            return;
        };
        match block.heading_level {
            Some(level) => {
                parts.push(format!("<h{level}>{}</h{level}>", escape_html(title)));
            }
            None => {
                // Bold-as-heading source: separate sections visually once a
                // prior bold title has been emitted.
                if self.variant == HtmlVariant::Styled && *bold_title_seen {
                    parts.push("<br>".to_string());
                }
                parts.push(format!("<p><strong>{}</strong></p>", escape_html(title)));
                *bold_title_seen = true;
            }
        }
    }

    fn render_body(&self, parts: &mut Vec<String>, block: &Block) {
        let mut buffer = String::new();
        let mut in_list = false;

        for item in &block.body {
            match item {
                BodyItem::TextLine(text) => {
                    if in_list {
                        parts.push("</ul>".to_string());
                        in_list = false;
                    }
                    buffer.push(' ');
                    buffer.push_str(text);
                    // A sentence wrapped over multiple source paragraphs is
                    // flushed as one <p> once it ends in terminal punctuation.
                    if self.sentence_end.is_match(text) {
                        parts.push(format!("<p>{}</p>", escape_html(buffer.trim())));
                        buffer.clear();
                    }
                }
                BodyItem::ListLine(text) => {
                    self.flush_buffer(parts, &mut buffer);
                    if !in_list {
                        parts.push(self.open_list_tag().to_string());
                        in_list = true;
                    }
                    parts.push(format!("<li>{}</li>", escape_html(text)));
                }
                BodyItem::ImageItem(image) => {
                    self.flush_buffer(parts, &mut buffer);
                    if in_list {
                        parts.push("</ul>".to_string());
                        in_list = false;
                    }
                    parts.push(self.image_tag(image));
                }
            }
        }

        self.flush_buffer(parts, &mut buffer);
        if in_list {
            parts.push("</ul>".to_string());
        }
    }

    fn flush_buffer(&self, parts: &mut Vec<String>, buffer: &mut String) {
        if !buffer.trim().is_empty() {
            parts.push(format!("<p>{}</p>", escape_html(buffer.trim())));
        }
        buffer.clear();
    }

    fn open_list_tag(&self) -> &'static str {
        match self.variant {
            HtmlVariant::Styled => r#"<ul class="browser-default">"#,
            HtmlVariant::Bare => "<ul>",
        }
    }

    fn image_tag(&self, image: &ResolvedImage) -> String {
        let src = match &image.url {
            Some(url) => url.clone(),
            // No hosted URL: embed the bytes directly rather than failing
            None => format!(
                "data:image/{};base64,{}",
                image.extension(),
                BASE64.encode(&image.data)
            ),
        };
        match self.variant {
            HtmlVariant::Styled => format!(
                r#"<p><img src="{}" alt="afbeelding" style="{}"></p>"#,
                src, IMG_CROP_STYLE
            ),
            HtmlVariant::Bare => format!(r#"<p><img src="{}" alt="afbeelding"></p>"#, src),
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
