//! Low-level OOXML package writers.
//!
//! Both writers assemble the package parts as strings and zip them up
//! directly. Output is byte-deterministic: part order is fixed and the
//! document properties carry a fixed timestamp.

pub(crate) mod docx;
pub(crate) mod pptx;

/// Fixed timestamp for docProps; keeps repeated runs byte-identical.
pub(crate) const CREATED_AT: &str = "2024-01-01T00:00:00Z";

pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// English Metric Units per inch.
const EMU_PER_INCH: f64 = 914_400.0;

pub(crate) fn emu(inches: f32) -> i64 {
    (inches as f64 * EMU_PER_INCH).round() as i64
}

/// Content type for an image part, by file extension.
pub(crate) fn image_content_type(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _ => "image/png",
    }
}
