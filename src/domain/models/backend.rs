#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumVariantNames,
)]
#[strum(serialize_all = "kebab-case")]
pub enum BackendName {
    Gemini,
    Proxy,
}

impl BackendName {
    pub fn parse(text: String) -> Option<BackendName> {
        return text.parse::<BackendName>().ok();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

/// One part of a model response. A part carries text, inline binary data, or
/// occasionally neither (thought signatures and the like).
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl ResponsePart {
    pub fn text(text: &str) -> ResponsePart {
        return ResponsePart {
            text: Some(text.to_string()),
            inline_data: None,
        };
    }

    pub fn inline(mime_type: &str, data: &str) -> ResponsePart {
        return ResponsePart {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        };
    }
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    /// Single text generation round trip. Returns the concatenated text of the
    /// first candidate.
    async fn generate_text(&self, request: TextRequest) -> Result<String>;

    /// Single image generation round trip. Returns every part of the first
    /// candidate so the caller can decide which one holds the image.
    async fn generate_image(&self, request: ImageRequest) -> Result<Vec<ResponsePart>>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
