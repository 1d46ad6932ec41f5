//! Speech-to-text service seam and the ElevenLabs implementation.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::audio::AudioPayload;
use crate::config::TranscribeOptions;
use crate::error::{Error, Result};
use crate::settings::ApiKey;
use crate::types::Transcript;

/// Production endpoint host.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

const SPEECH_TO_TEXT_PATH: &str = "/v1/speech-to-text";
const API_KEY_HEADER: &str = "xi-api-key";

/// Longest error body echoed back in [`Error::Api`].
const MAX_ERROR_BODY_CHARS: usize = 1000;

/// A remote service that turns an audio payload into a transcript.
///
/// Implementations make exactly one attempt per call; retrying is left to
/// the caller.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn convert(&self, payload: &AudioPayload, options: &TranscribeOptions)
        -> Result<Transcript>;
}

/// Client for the ElevenLabs speech-to-text endpoint.
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    http: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
}

impl ElevenLabsClient {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build a client with the key from `ELEVENLABS_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ApiKey::from_env()?))
    }

    /// Point the client at another host, e.g. a proxy or a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the transcription endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{SPEECH_TO_TEXT_PATH}", self.base_url)
    }
}

#[async_trait]
impl SpeechToText for ElevenLabsClient {
    async fn convert(
        &self,
        payload: &AudioPayload,
        options: &TranscribeOptions,
    ) -> Result<Transcript> {
        let url = self.endpoint();
        let form = build_form(payload, options)?;

        info!(
            %url,
            model = %options.model,
            bytes = payload.len(),
            "submitting audio for transcription"
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), body_len = body.len(), "response received");

        if !status.is_success() {
            let message = api_error_message(&body);
            warn!(status = status.as_u16(), %message, "transcription request rejected");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let transcript: Transcript = serde_json::from_str(&body)?;
        info!(
            language = %transcript.language_code,
            words = transcript.words.len(),
            "transcription complete"
        );
        Ok(transcript)
    }
}

/// Build the multipart body: the file part plus one text field per option.
fn build_form(payload: &AudioPayload, options: &TranscribeOptions) -> Result<Form> {
    let file = Part::bytes(payload.bytes().to_vec())
        .file_name(payload.file_name().to_string())
        .mime_str(payload.content_type())?;

    let mut form = Form::new()
        .text("model_id", options.model.id().to_string())
        .part("file", file)
        .text("tag_audio_events", options.tag_audio_events.to_string())
        .text("timestamps_granularity", options.timestamps.as_str())
        .text("diarize", options.diarize.to_string());

    if let Some(code) = options.language.code() {
        form = form.text("language_code", code.to_string());
    }
    if let Some(n) = options.num_speakers {
        form = form.text("num_speakers", n.to_string());
    }

    Ok(form)
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: ErrorDetail,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Structured { message: String },
    Plain(String),
}

/// Pull a human-readable message out of an error response body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: ErrorDetail::Structured { message } | ErrorDetail::Plain(message),
        }) => message,
        Err(_) if body.trim().is_empty() => "empty response body".into(),
        Err(_) => body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}
