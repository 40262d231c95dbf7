use std::time::Duration;

use pretty_assertions::assert_eq;
use viewinsta_engine::{
    ApiKey, EditErrorKind, EditSettings, EditedImage, GeminiImageEditor, ImageEditRequest,
    ImageEditor,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

fn editor_for(server: &MockServer, settings: EditSettings) -> GeminiImageEditor {
    let settings = EditSettings {
        endpoint: server.uri(),
        ..settings
    };
    GeminiImageEditor::new(settings, ApiKey::new("test-key").unwrap()).unwrap()
}

fn request() -> ImageEditRequest {
    ImageEditRequest {
        image_bytes: b"abc".to_vec(),
        mime_type: "image/jpeg".to_string(),
        prompt: "add a retro filter".to_string(),
    }
}

#[tokio::test]
async fn returns_first_inline_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "contents": [{
                "parts": [
                    { "inlineData": { "mimeType": "image/jpeg", "data": "YWJj" } },
                    { "text": "add a retro filter" }
                ]
            }],
            "generationConfig": { "responseModalities": ["IMAGE"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "AQID" } },
                        { "inlineData": { "mimeType": "image/png", "data": "BAUG" } }
                    ]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let editor = editor_for(&server, EditSettings::default());
    let edited = editor.edit(&request()).await.expect("edit ok");
    assert_eq!(
        edited,
        EditedImage {
            mime_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    );
}

#[tokio::test]
async fn text_only_response_is_no_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "I can't do that" }] } }]
        })))
        .mount(&server)
        .await;

    let editor = editor_for(&server, EditSettings::default());
    let err = editor.edit(&request()).await.unwrap_err();
    assert_eq!(err.kind, EditErrorKind::NoImageInResponse);
    assert_eq!(
        err.to_string(),
        "Failed to edit image: No image data found in the API response."
    );
}

#[tokio::test]
async fn service_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&server)
        .await;

    let editor = editor_for(&server, EditSettings::default());
    let err = editor.edit(&request()).await.unwrap_err();
    assert_eq!(err.kind, EditErrorKind::HttpStatus(400));
    assert_eq!(err.to_string(), "Failed to edit image: API key not valid.");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let editor = editor_for(&server, EditSettings::default());
    let err = editor.edit(&request()).await.unwrap_err();
    assert_eq!(err.kind, EditErrorKind::HttpStatus(503));
    assert!(err.message.contains("503"));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let editor = editor_for(&server, EditSettings::default());
    let err = editor.edit(&request()).await.unwrap_err();
    assert_eq!(err.kind, EditErrorKind::InvalidResponse);
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let settings = EditSettings {
        request_timeout: Duration::from_millis(50),
        ..EditSettings::default()
    };
    let editor = editor_for(&server, settings);
    let err = editor.edit(&request()).await.unwrap_err();
    assert_eq!(err.kind, EditErrorKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("0123456789abcdef"))
        .mount(&server)
        .await;

    let settings = EditSettings {
        max_response_bytes: 10,
        ..EditSettings::default()
    };
    let editor = editor_for(&server, settings);
    let err = editor.edit(&request()).await.unwrap_err();
    assert_eq!(err.kind, EditErrorKind::TooLarge { max_bytes: 10 });
}

#[tokio::test]
async fn unreachable_service_is_network_error() {
    let settings = EditSettings {
        endpoint: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(200),
        ..EditSettings::default()
    };
    let editor = GeminiImageEditor::new(settings, ApiKey::new("k").unwrap()).unwrap();
    let err = editor.edit(&request()).await.unwrap_err();
    assert!(matches!(
        err.kind,
        EditErrorKind::Network | EditErrorKind::Timeout
    ));
    assert!(err.to_string().starts_with("Failed to edit image: "));
}
