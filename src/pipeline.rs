use thiserror::Error;
use tracing::{info, warn};

use crate::composer::{self, ComposeError};
use crate::config::Config;
use crate::imaging::{self, ImagingError};
use crate::openai::images::{self, ImagePayload, OpenAiError};
use crate::selection::Selection;
use crate::utils::http::get_http_client;

pub const OUTPUT_FILE_NAME: &str = "hanbok_pet.png";
pub const OUTPUT_MIME_TYPE: &str = "image/png";

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("no pet photo was uploaded")]
    MissingImage,
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error("could not decode the {what} image: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: ImagingError,
    },
    #[error("image backend call failed: {0}. Check that the API key is valid and the account has remaining credit.")]
    Backend(#[source] OpenAiError),
    #[error("could not fetch the generated image from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A finished result, ready for display and download.
#[derive(Debug, Clone)]
pub struct StudioImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

/// Orchestrates one dress-up round trip: normalize the upload, compose
/// the prompt, call the backend, decode whatever comes back. One request
/// at a time, nothing shared between requests, no automatic retry.
pub struct Studio {
    config: Config,
}

impl Studio {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Edit mode: composite a hanbok onto the uploaded pet photo.
    ///
    /// Fails before any network traffic if the photo is missing or the
    /// selection is incomplete.
    pub async fn dress_up(
        &self,
        upload: Option<&[u8]>,
        selection: &Selection,
    ) -> Result<StudioImage, StudioError> {
        let Some(bytes) = upload else {
            return Err(StudioError::MissingImage);
        };
        let prompt = composer::compose_edit_prompt(selection)?;

        let mime = imaging::detect_mime_type(bytes);
        let normalized = imaging::normalize_to_png(bytes).map_err(|source| {
            StudioError::Decode {
                what: "uploaded",
                source,
            }
        })?;
        info!(
            upload_mime = mime.as_deref().unwrap_or("unknown"),
            width = normalized.width,
            height = normalized.height,
            prompt_chars = prompt.chars().count(),
            "submitting hanbok edit request"
        );

        let payload = images::edit_image(&self.config, normalized.png, &prompt)
            .await
            .map_err(StudioError::Backend)?;
        self.finish(payload).await
    }

    /// Generate mode: synthesize a fresh portrait from text alone.
    pub async fn imagine(&self, selection: &Selection) -> Result<StudioImage, StudioError> {
        let prompt = composer::compose_generation_prompt(selection)?;
        info!(
            prompt_chars = prompt.chars().count(),
            "submitting hanbok generation request"
        );

        let payload = images::generate_image(&self.config, &prompt)
            .await
            .map_err(StudioError::Backend)?;
        self.finish(payload).await
    }

    async fn finish(&self, payload: ImagePayload) -> Result<StudioImage, StudioError> {
        let raw = match payload {
            ImagePayload::Bytes(bytes) => bytes,
            ImagePayload::Url(url) => fetch_result_bytes(&url).await?,
        };

        // Decoding here doubles as validation: a response that is not a
        // real image never reaches the presenter.
        let normalized = imaging::normalize_to_png(&raw).map_err(|source| {
            warn!("backend response was not a decodable image");
            StudioError::Decode {
                what: "generated",
                source,
            }
        })?;
        info!(
            width = normalized.width,
            height = normalized.height,
            png_bytes = normalized.png.len(),
            "hanbok image ready"
        );

        Ok(StudioImage {
            png: normalized.png,
            width: normalized.width,
            height: normalized.height,
            file_name: OUTPUT_FILE_NAME,
            mime_type: OUTPUT_MIME_TYPE,
        })
    }
}

async fn fetch_result_bytes(url: &str) -> Result<Vec<u8>, StudioError> {
    let to_fetch_err = |source: reqwest::Error| StudioError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = get_http_client()
        .get(url)
        .send()
        .await
        .map_err(to_fetch_err)?
        .error_for_status()
        .map_err(to_fetch_err)?;
    let bytes = response.bytes().await.map_err(to_fetch_err)?;
    Ok(bytes.to_vec())
}
