//! Process-wide configuration for the external collaborators.
//!
//! Built once at startup and passed by parameter into the uploader and
//! rewriter constructors; nothing in the conversion pipeline reads the
//! environment on its own.

use std::env;

use crate::images::{CdnUploader, ImageUploader};
use crate::rewrite::{ContentRewriter, LlmRewriter};

/// Image host settings.
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    /// Upload endpoint URL
    pub endpoint: String,

    /// API key sent with each upload
    pub api_key: String,

    /// Remote folder for uploaded images
    pub folder: String,
}

/// Content rewriter (LLM) settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API key
    pub api_key: String,

    /// Chat-completions base URL
    pub base_url: String,

    /// Model name
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Converter configuration. Both collaborators are optional; a missing
/// section disables the corresponding external call and the pipeline runs
/// on its local fallbacks.
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    pub image_host: Option<ImageHostConfig>,
    pub llm: Option<LlmConfig>,
}

impl ConverterConfig {
    /// Read configuration from the process environment. Intended to be
    /// called exactly once at startup.
    ///
    /// Recognized variables: `IMAGE_HOST_ENDPOINT`, `IMAGE_HOST_API_KEY`,
    /// `IMAGE_HOST_FOLDER`, `OPENAI_API_KEY`, `OPENAI_BASE_URL`,
    /// `OPENAI_MODEL`.
    pub fn from_env() -> Self {
        let image_host = match (env::var("IMAGE_HOST_ENDPOINT"), env::var("IMAGE_HOST_API_KEY")) {
            (Ok(endpoint), Ok(api_key)) => Some(ImageHostConfig {
                endpoint,
                api_key,
                folder: env::var("IMAGE_HOST_FOLDER").unwrap_or_else(|_| "undocx".to_string()),
            }),
            _ => None,
        };

        let llm = env::var("OPENAI_API_KEY").ok().map(|api_key| {
            let defaults = LlmConfig::default();
            LlmConfig {
                api_key,
                base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
                model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            }
        });

        Self { image_host, llm }
    }

    /// Build the configured uploader, if any.
    pub fn uploader(&self) -> Option<Box<dyn ImageUploader>> {
        self.image_host
            .as_ref()
            .map(|c| Box::new(CdnUploader::new(c)) as Box<dyn ImageUploader>)
    }

    /// Build the configured rewriter, if any.
    pub fn rewriter(&self) -> Option<Box<dyn ContentRewriter>> {
        self.llm
            .as_ref()
            .map(|c| Box::new(LlmRewriter::new(c.clone())) as Box<dyn ContentRewriter>)
    }
}
