use std::path::PathBuf;

/// All errors that can occur in scribe.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("audio file not found: {path}")]
    AudioNotFound { path: PathBuf },

    #[error("no API key — pass --api-key, set ELEVENLABS_API_KEY, or add \"api_key\" to the config file")]
    MissingApiKey,

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("unsupported language: \"{0}\" — expected an ISO 639-1 or 639-3 code such as \"en\" or \"eng\"")]
    UnsupportedLanguage(String),

    #[error("transcript has no word timestamps; subtitles need timed words")]
    MissingTimestamps,

    #[error("config error: {0}")]
    Config(String),

    #[error("speech-to-text API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the service rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Api { status: 401 | 403, .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
