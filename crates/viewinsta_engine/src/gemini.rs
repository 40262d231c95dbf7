use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::{ApiKey, ConfigError, EditError, EditErrorKind, EditedImage, ImageEditRequest};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

const API_KEY_HEADER: &str = "x-goog-api-key";
const NO_IMAGE_MESSAGE: &str = "No image data found in the API response.";
const FALLBACK_MIME_TYPE: &str = "image/png";

#[derive(Debug, Clone)]
pub struct EditSettings {
    pub endpoint: String,
    pub model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 32 * 1024 * 1024,
        }
    }
}

impl EditSettings {
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait::async_trait]
pub trait ImageEditor: Send + Sync {
    async fn edit(&self, request: &ImageEditRequest) -> Result<EditedImage, EditError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Image {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ServiceError,
}

#[derive(Deserialize)]
struct ServiceError {
    message: String,
}

impl<'a> GenerateContentRequest<'a> {
    fn for_edit(request: &'a ImageEditRequest) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::Image {
                        inline_data: InlineData {
                            mime_type: Some(request.mime_type.clone()),
                            data: STANDARD.encode(&request.image_bytes),
                        },
                    },
                    RequestPart::Text {
                        text: &request.prompt,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
            },
        }
    }
}

/// Image edit client for the Gemini `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiImageEditor {
    settings: EditSettings,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl GeminiImageEditor {
    pub fn new(settings: EditSettings, api_key: ApiKey) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Ok(Self {
            settings,
            api_key,
            client,
        })
    }

    pub fn settings(&self) -> &EditSettings {
        &self.settings
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, EditError> {
        let max_bytes = self.settings.max_response_bytes;
        let too_large = || {
            EditError::new(
                EditErrorKind::TooLarge { max_bytes },
                "response too large",
            )
        };
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(too_large());
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl ImageEditor for GeminiImageEditor {
    async fn edit(&self, request: &ImageEditRequest) -> Result<EditedImage, EditError> {
        let payload = serde_json::to_vec(&GenerateContentRequest::for_edit(request))
            .map_err(|err| EditError::new(EditErrorKind::InvalidRequest, err.to_string()))?;

        let response = self
            .client
            .post(self.settings.generate_url())
            .header(API_KEY_HEADER, self.api_key.expose())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(EditError::new(
                EditErrorKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&body)
            .map_err(|err| EditError::new(EditErrorKind::InvalidResponse, err.to_string()))?;
        first_inline_image(parsed)
    }
}

/// Only the first candidate is considered; its first inline image wins.
fn first_inline_image(response: GenerateContentResponse) -> Result<EditedImage, EditError> {
    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.inline_data))
        .ok_or_else(|| EditError::new(EditErrorKind::NoImageInResponse, NO_IMAGE_MESSAGE))?;

    let bytes = STANDARD.decode(inline.data.as_bytes()).map_err(|err| {
        EditError::new(
            EditErrorKind::InvalidResponse,
            format!("invalid image data: {err}"),
        )
    })?;
    Ok(EditedImage {
        mime_type: inline
            .mime_type
            .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string()),
        bytes,
    })
}

fn map_reqwest_error(err: reqwest::Error) -> EditError {
    if err.is_timeout() {
        return EditError::new(EditErrorKind::Timeout, err.to_string());
    }
    EditError::new(EditErrorKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_generate_content_shape() {
        let request = ImageEditRequest {
            image_bytes: b"abc".to_vec(),
            mime_type: "image/png".to_string(),
            prompt: "add a hat".to_string(),
        };
        let value = serde_json::to_value(GenerateContentRequest::for_edit(&request)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "YWJj" } },
                        { "text": "add a hat" }
                    ]
                }],
                "generationConfig": { "responseModalities": ["IMAGE"] }
            })
        );
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let settings = EditSettings {
            endpoint: "http://localhost:9/".to_string(),
            ..EditSettings::default()
        };
        assert_eq!(
            settings.generate_url(),
            "http://localhost:9/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn empty_candidates_mean_no_image() {
        let err = first_inline_image(GenerateContentResponse::default()).unwrap_err();
        assert_eq!(err.kind, EditErrorKind::NoImageInResponse);
        assert_eq!(
            err.to_string(),
            "Failed to edit image: No image data found in the API response."
        );
    }
}
