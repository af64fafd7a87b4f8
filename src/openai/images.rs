use base64::{engine::general_purpose, Engine as _};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::utils::http::get_http_client;

const ERROR_BODY_LOG_LIMIT: usize = 800;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("unexpected response shape: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("could not decode base64 image payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("response contained no image data")]
    EmptyResponse,
}

/// The images API answers with either inline base64 bytes or a remote
/// URL, depending on model and response_format.
#[derive(Debug)]
pub enum ImagePayload {
    Bytes(Vec<u8>),
    Url(String),
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// POST /v1/images/edits — multipart upload of the normalized pet photo
/// plus the composed instruction prompt.
pub async fn edit_image(
    config: &Config,
    png: Vec<u8>,
    prompt: &str,
) -> Result<ImagePayload, OpenAiError> {
    let image_part = Part::bytes(png)
        .file_name("pet.png")
        .mime_str("image/png")?;
    let form = Form::new()
        .text("model", config.edit_model.clone())
        .text("prompt", prompt.to_string())
        .part("image", image_part);

    let url = format!("{}/images/edits", config.openai_base_url);
    debug!(model = %config.edit_model, "sending image edit request");
    let response = get_http_client()
        .post(&url)
        .bearer_auth(&config.openai_api_key)
        .multipart(form)
        .send()
        .await?;

    read_images_response(response).await
}

/// POST /v1/images/generations — text-only request, answered with a URL
/// that is fetched separately by the pipeline.
pub async fn generate_image(config: &Config, prompt: &str) -> Result<ImagePayload, OpenAiError> {
    let payload = json!({
        "model": config.generation_model,
        "prompt": prompt,
        "n": 1,
        "size": config.generation_size,
        "quality": config.generation_quality,
        "response_format": "url",
    });

    let url = format!("{}/images/generations", config.openai_base_url);
    debug!(model = %config.generation_model, "sending image generation request");
    let response = get_http_client()
        .post(&url)
        .bearer_auth(&config.openai_api_key)
        .json(&payload)
        .send()
        .await?;

    read_images_response(response).await
}

async fn read_images_response(response: reqwest::Response) -> Result<ImagePayload, OpenAiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = extract_error_message(&body);
        warn!(%status, message = %truncate_for_log(&message, ERROR_BODY_LOG_LIMIT), "images API returned an error");
        return Err(OpenAiError::Api { status, message });
    }

    let parsed: ImagesResponse = serde_json::from_str(&body)?;
    extract_payload(parsed)
}

fn extract_payload(response: ImagesResponse) -> Result<ImagePayload, OpenAiError> {
    let Some(datum) = response.data.into_iter().next() else {
        return Err(OpenAiError::EmptyResponse);
    };
    if let Some(b64) = datum.b64_json {
        let bytes = general_purpose::STANDARD.decode(b64)?;
        return Ok(ImagePayload::Bytes(bytes));
    }
    if let Some(url) = datum.url {
        if !url.trim().is_empty() {
            return Ok(ImagePayload::Url(url));
        }
    }
    Err(OpenAiError::EmptyResponse)
}

/// Pull the human-readable message out of the OpenAI error envelope,
/// falling back to the raw body when the shape is unfamiliar.
fn extract_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.trim().is_empty() => envelope.error.message,
        _ => truncate_for_log(body.trim(), ERROR_BODY_LOG_LIMIT),
    }
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_payloads_are_decoded_inline() {
        let encoded = general_purpose::STANDARD.encode(b"fake png bytes");
        let response: ImagesResponse =
            serde_json::from_str(&format!(r#"{{"data":[{{"b64_json":"{encoded}"}}]}}"#)).unwrap();
        match extract_payload(response).unwrap() {
            ImagePayload::Bytes(bytes) => assert_eq!(bytes, b"fake png bytes"),
            other => panic!("expected bytes, got {other:?}"),
        }
    }

    #[test]
    fn url_payloads_are_passed_through() {
        let response: ImagesResponse =
            serde_json::from_str(r#"{"data":[{"url":"https://img.example/out.png"}]}"#).unwrap();
        match extract_payload(response).unwrap() {
            ImagePayload::Url(url) => assert_eq!(url, "https://img.example/out.png"),
            other => panic!("expected url, got {other:?}"),
        }
    }

    #[test]
    fn empty_data_array_is_an_empty_response() {
        let response: ImagesResponse = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert!(matches!(
            extract_payload(response),
            Err(OpenAiError::EmptyResponse)
        ));
    }

    #[test]
    fn error_envelope_message_is_extracted() {
        let body = r#"{"error":{"message":"You exceeded your current quota.","type":"insufficient_quota"}}"#;
        assert_eq!(
            extract_error_message(body),
            "You exceeded your current quota."
        );
    }

    #[test]
    fn unfamiliar_error_bodies_fall_back_to_raw_text() {
        assert_eq!(extract_error_message("<html>502</html>"), "<html>502</html>");
    }

    #[test]
    fn long_error_bodies_are_truncated_for_display() {
        let body = "x".repeat(ERROR_BODY_LOG_LIMIT + 10);
        let message = extract_error_message(&body);
        assert!(message.ends_with("... (truncated)"));
        assert!(message.chars().count() < body.chars().count() + 20);
    }
}
