//! Speech-to-text client: local media file in, transcript out.
//!
//! **scribe** reads a file fully into memory, uploads it to the ElevenLabs
//! speech-to-text API in a single request, and hands back the structured
//! response. Output as plain text, a console report, SRT, WebVTT, or JSON.
//!
//! # Quick start
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> scribe::Result<()> {
//! // Reads the key from ELEVENLABS_API_KEY
//! let transcript = scribe::transcribe_file("meeting.mp3").await?;
//! println!("{}", transcript.text());
//! # Ok(())
//! # }
//! ```
//!
//! Any [`SpeechToText`] implementation can stand in for the remote service
//! via [`transcribe_file_with`].

pub mod analysis;
pub mod audio;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod settings;
pub mod types;

pub use analysis::{FillerCount, PaceRating, SpeechAnalysis};
pub use audio::AudioPayload;
pub use client::{ElevenLabsClient, SpeechToText};
pub use config::{Language, Model, TimestampsGranularity, TranscribeOptions};
pub use error::{Error, Result};
pub use report::Report;
pub use settings::{ApiKey, Settings};
pub use types::{Cue, Transcript, Word, WordKind};

use std::path::{Path, PathBuf};

/// Transcribe a local audio/video file with default options.
pub async fn transcribe_file(path: impl AsRef<Path>) -> Result<Transcript> {
    transcribe_file_with_options(path, &TranscribeOptions::default()).await
}

/// Transcribe a local audio/video file with custom options.
pub async fn transcribe_file_with_options(
    path: impl AsRef<Path>,
    options: &TranscribeOptions,
) -> Result<Transcript> {
    let client = ElevenLabsClient::from_env()?;
    transcribe_file_with(&client, path, options).await
}

/// Transcribe a local file through any speech-to-text service.
///
/// The file is read before the service is contacted, so a missing or
/// unreadable file never results in a request.
pub async fn transcribe_file_with<S>(
    service: &S,
    path: impl AsRef<Path>,
    options: &TranscribeOptions,
) -> Result<Transcript>
where
    S: SpeechToText + ?Sized,
{
    Ok(run_file(service, path, options).await?.transcript)
}

/// One completed run: the input path, the uploaded payload and the response.
#[derive(Debug, Clone)]
pub struct Transcription {
    pub path: PathBuf,
    pub payload: AudioPayload,
    pub transcript: Transcript,
}

impl Transcription {
    /// The path / payload / response / text report for this run.
    pub fn report(&self) -> Report<'_> {
        Report::new(&self.path, &self.payload, &self.transcript)
    }
}

/// Validate options, load the file, and submit it once.
///
/// Keeps the payload alongside the transcript for reporting.
pub async fn run_file<S>(
    service: &S,
    path: impl AsRef<Path>,
    options: &TranscribeOptions,
) -> Result<Transcription>
where
    S: SpeechToText + ?Sized,
{
    options.validate()?;

    let path = path.as_ref();
    let payload = AudioPayload::load(path)?;
    let transcript = service.convert(&payload, options).await?;

    Ok(Transcription {
        path: path.to_path_buf(),
        payload,
        transcript,
    })
}
