//! Content rewriting: the LLM collaborator and its deterministic fallback.
//!
//! The slide renderer calls the rewriter once per block, never per
//! paragraph, so the number of external calls is bounded by the number of
//! logical sections. Any failure degrades to [`LocalSummarizer`].

use log::warn;
use serde::Deserialize;

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::model::LessonSlide;

/// Maximum bullets per rewritten slide.
pub const MAX_BULLETS: usize = 4;

const FALLBACK_CHECK: &str = "Kun je dit in je eigen woorden uitleggen?";

/// Turns a block's raw text into a structured lesson slide.
pub trait ContentRewriter {
    fn rewrite(&self, text: &str, max_bullets: usize) -> Result<LessonSlide>;
}

#[derive(Deserialize)]
struct RewriteResponse {
    title: Option<String>,
    bullets: Option<Vec<String>>,
    check: Option<String>,
}

/// Rewriter backed by a hosted chat-completions endpoint. The model is asked
/// for a JSON object `{"title", "bullets", "check"}`.
pub struct LlmRewriter {
    config: LlmConfig,
    client: reqwest::blocking::Client,
}

impl LlmRewriter {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn prompt(text: &str, max_bullets: usize) -> String {
        format!(
            "Maak van deze lesstof een dia voor een vmbo/mbo-klas.\n\
             Geef een korte titel (max 8 woorden), maximaal {max_bullets} korte bullets \
             (1 regel per bullet, je-vorm, eenvoudige woorden) en 1 controlevraag.\n\n\
             Tekst:\n{text}\n\n\
             Geef ALLEEN geldig JSON: {{\"title\": \"...\", \"bullets\": [\"...\"], \"check\": \"...\"}}"
        )
    }
}

impl ContentRewriter for LlmRewriter {
    fn rewrite(&self, text: &str, max_bullets: usize) -> Result<LessonSlide> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": Self::prompt(text, max_bullets)}],
            "response_format": {"type": "json_object"},
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .map_err(|e| Error::Rewrite(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Rewrite(format!("endpoint returned {}", response.status())));
        }

        let payload: serde_json::Value = response
            .json()
            .map_err(|e| Error::Rewrite(e.to_string()))?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| Error::Rewrite("response carried no message content".into()))?;

        let parsed: RewriteResponse = serde_json::from_str(content)
            .map_err(|e| Error::Rewrite(format!("malformed rewrite payload: {e}")))?;

        let mut bullets = parsed.bullets.unwrap_or_default();
        bullets.retain(|b| !b.trim().is_empty());
        bullets.truncate(max_bullets);
        if bullets.is_empty() {
            return Err(Error::Rewrite("rewrite returned no bullets".into()));
        }

        Ok(LessonSlide {
            title: parsed.title.unwrap_or_else(|| "Lesonderdeel".to_string()),
            bullets,
            check: parsed.check.unwrap_or_else(|| FALLBACK_CHECK.to_string()),
        })
    }
}

/// Deterministic local summarizer: first sentence becomes the title, the
/// next sentences become bullets, and the check question is fixed.
#[derive(Debug, Clone, Default)]
pub struct LocalSummarizer;

impl LocalSummarizer {
    fn sentences(text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = String::new();
        for ch in text.chars() {
            if ch == '\n' {
                if !current.trim().is_empty() {
                    out.push(current.trim().to_string());
                }
                current.clear();
                continue;
            }
            current.push(ch);
            if matches!(ch, '.' | '!' | '?') {
                out.push(current.trim().to_string());
                current.clear();
            }
        }
        if !current.trim().is_empty() {
            out.push(current.trim().to_string());
        }
        out
    }
}

impl LocalSummarizer {
    /// Infallible summarization used both by the trait impl and as the
    /// terminal fallback.
    pub fn summarize(&self, text: &str, max_bullets: usize) -> LessonSlide {
        let sentences = Self::sentences(text);
        let title = sentences
            .first()
            .map(|s| s.trim_end_matches(['.', '!', '?']).to_string())
            .unwrap_or_else(|| "Lesonderdeel".to_string());
        let bullets: Vec<String> = sentences
            .iter()
            .skip(1)
            .take(max_bullets.min(3))
            .cloned()
            .collect();
        let bullets = if bullets.is_empty() {
            vec!["Kernpunt uit de tekst.".to_string()]
        } else {
            bullets
        };

        LessonSlide {
            title,
            bullets,
            check: FALLBACK_CHECK.to_string(),
        }
    }
}

impl ContentRewriter for LocalSummarizer {
    fn rewrite(&self, text: &str, max_bullets: usize) -> Result<LessonSlide> {
        Ok(self.summarize(text, max_bullets))
    }
}

/// Rewrite with the configured rewriter, falling back to the local
/// summarizer when it is absent or fails. Never errors.
pub fn rewrite_or_fallback(
    rewriter: Option<&dyn ContentRewriter>,
    text: &str,
    max_bullets: usize,
) -> LessonSlide {
    if let Some(rewriter) = rewriter {
        match rewriter.rewrite(text, max_bullets) {
            Ok(slide) => return slide,
            Err(e) => warn!("rewriter unavailable, using local summarizer: {}", e),
        }
    }
    LocalSummarizer.summarize(text, max_bullets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_summarizer_structure() {
        let text = "Kabels geleiden stroom. Koper is een goede geleider. \
                    Isolatie voorkomt kortsluiting. Er zijn veel soorten. Nog een zin.";
        let slide = LocalSummarizer.rewrite(text, MAX_BULLETS).unwrap();
        assert_eq!(slide.title, "Kabels geleiden stroom");
        assert_eq!(slide.bullets.len(), 3);
        assert_eq!(slide.bullets[0], "Koper is een goede geleider.");
        assert_eq!(slide.check, FALLBACK_CHECK);
    }

    #[test]
    fn test_local_summarizer_single_sentence() {
        let slide = LocalSummarizer.rewrite("Alleen een titel", MAX_BULLETS).unwrap();
        assert_eq!(slide.title, "Alleen een titel");
        assert_eq!(slide.bullets, vec!["Kernpunt uit de tekst.".to_string()]);
    }

    #[test]
    fn test_local_summarizer_is_deterministic() {
        let text = "Een. Twee. Drie.";
        let a = LocalSummarizer.rewrite(text, MAX_BULLETS).unwrap();
        let b = LocalSummarizer.rewrite(text, MAX_BULLETS).unwrap();
        assert_eq!(a.title, b.title);
        assert_eq!(a.bullets, b.bullets);
        assert_eq!(a.check, b.check);
    }

    struct BrokenRewriter;

    impl ContentRewriter for BrokenRewriter {
        fn rewrite(&self, _text: &str, _max_bullets: usize) -> Result<LessonSlide> {
            Err(Error::Rewrite("rate limited".into()))
        }
    }

    #[test]
    fn test_fallback_on_rewriter_failure() {
        let slide = rewrite_or_fallback(Some(&BrokenRewriter), "Titelzin. Inhoud.", MAX_BULLETS);
        assert_eq!(slide.title, "Titelzin");
        assert_eq!(slide.bullets, vec!["Inhoud.".to_string()]);
    }

    #[test]
    fn test_newlines_split_sentences() {
        let slide = LocalSummarizer.rewrite("Titel zonder punt\nRegel twee\nRegel drie", 2).unwrap();
        assert_eq!(slide.title, "Titel zonder punt");
        assert_eq!(slide.bullets, vec!["Regel twee".to_string(), "Regel drie".to_string()]);
    }
}
