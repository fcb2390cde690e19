//! Image resolution and best-effort CDN upload.
//!
//! The resolver owns the document's embedded images and hands out
//! [`ResolvedImage`]s in order of first reference. Uploading to the image
//! host is best-effort: any failure degrades to `url: None` and the raw
//! bytes are embedded by the renderers instead.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{debug, warn};

use crate::config::ImageHostConfig;
use crate::error::{Error, Result};
use crate::model::ResolvedImage;

/// An image part extracted from the source package.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    /// Relationship id inside word/document.xml ("rId5")
    pub rel_id: String,

    /// Generated file name ("image_1.png")
    pub name: String,

    /// Raw image bytes
    pub data: Vec<u8>,
}

/// Uploads image bytes to an external host and returns the hosted URL.
pub trait ImageUploader {
    fn upload(&self, name: &str, data: &[u8]) -> Result<String>;
}

/// Uploader posting a base64 data URI to an HTTP image host and reading the
/// hosted URL from the JSON response (`secure_url`, falling back to `url`).
pub struct CdnUploader {
    endpoint: String,
    api_key: String,
    folder: String,
    client: reqwest::blocking::Client,
}

impl CdnUploader {
    pub fn new(config: &ImageHostConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            folder: config.folder.clone(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl ImageUploader for CdnUploader {
    fn upload(&self, name: &str, data: &[u8]) -> Result<String> {
        let extension = name.rsplit_once('.').map(|(_, e)| e).unwrap_or("png");
        let data_uri = format!("data:image/{};base64,{}", extension, BASE64.encode(data));
        let public_id = name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(name);

        let body = serde_json::json!({
            "file": data_uri,
            "public_id": public_id,
            "folder": self.folder,
            "api_key": self.api_key,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| Error::ImageUpload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::ImageUpload(format!(
                "host returned {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .map_err(|e| Error::ImageUpload(e.to_string()))?;

        payload
            .get("secure_url")
            .or_else(|| payload.get("url"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::ImageUpload("response carried no url".into()))
    }
}

/// Resolves image references encountered during segmentation, uploading each
/// image at most once.
pub struct ImageResolver {
    images: HashMap<String, EmbeddedImage>,
    uploader: Option<Box<dyn ImageUploader>>,
    resolved_urls: HashMap<String, Option<String>>,
}

impl ImageResolver {
    pub fn new(images: Vec<EmbeddedImage>, uploader: Option<Box<dyn ImageUploader>>) -> Self {
        Self {
            images: images.into_iter().map(|i| (i.rel_id.clone(), i)).collect(),
            uploader,
            resolved_urls: HashMap::new(),
        }
    }

    /// Resolve one relationship id to image content and an optional hosted
    /// URL. Returns None for references pointing at no known image part.
    pub fn resolve(&mut self, rel_id: &str) -> Option<ResolvedImage> {
        let Some(image) = self.images.get(rel_id) else {
            warn!("image reference {} has no matching package part", rel_id);
            return None;
        };

        let url = self
            .resolved_urls
            .entry(rel_id.to_string())
            .or_insert_with(|| match &self.uploader {
                Some(uploader) => match uploader.upload(&image.name, &image.data) {
                    Ok(url) => {
                        debug!("uploaded {} -> {}", image.name, url);
                        Some(url)
                    }
                    Err(e) => {
                        warn!("upload failed for {}, embedding bytes: {}", image.name, e);
                        None
                    }
                },
                None => None,
            })
            .clone();

        Some(ResolvedImage {
            name: image.name.clone(),
            data: image.data.clone(),
            url,
        })
    }
}
