use std::fmt;

use crate::error::Error;

/// Largest speaker count the service accepts for `num_speakers`.
pub const MAX_SPEAKERS: u32 = 32;

/// A validated language hint for the speech-to-text service.
///
/// Accepts ISO 639-1 ("en") or ISO 639-3 ("eng") codes. The service does its
/// own detection when no code is sent, so `Language::Auto` omits the field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Language {
    /// Let the service detect the language.
    #[default]
    Auto,
    /// A two- or three-letter language code, lowercased.
    Code(String),
}

impl Language {
    /// Parse a language code, or "auto" for detection.
    pub fn new(lang: &str) -> Result<Self, Error> {
        let lower = lang.trim().to_lowercase();
        if lower == "auto" {
            return Ok(Language::Auto);
        }

        let valid_len = matches!(lower.len(), 2 | 3);
        if valid_len && lower.chars().all(|c| c.is_ascii_lowercase()) {
            Ok(Language::Code(lower))
        } else {
            Err(Error::UnsupportedLanguage(lang.to_string()))
        }
    }

    /// The code sent to the service, or None for Auto.
    pub fn code(&self) -> Option<&str> {
        match self {
            Language::Auto => None,
            Language::Code(code) => Some(code),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Language::Auto)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Auto => write!(f, "auto"),
            Language::Code(code) => write!(f, "{code}"),
        }
    }
}

/// Remote transcription models.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Model {
    #[default]
    ScribeV1,
    ScribeV1Experimental,
    /// Any other model id the service accepts.
    Custom(String),
}

impl Model {
    /// All known models as (id, description) pairs.
    pub const KNOWN: [(&'static str, &'static str); 2] = [
        ("scribe_v1", "Scribe v1, general availability"),
        ("scribe_v1_experimental", "Scribe v1 with experimental improvements"),
    ];

    /// Model id as the service expects it in `model_id`.
    pub fn id(&self) -> &str {
        match self {
            Model::ScribeV1 => "scribe_v1",
            Model::ScribeV1Experimental => "scribe_v1_experimental",
            Model::Custom(id) => id,
        }
    }

    /// Parse a known model id (e.g. CLI argument).
    pub fn parse_name(s: &str) -> Option<Self> {
        match s {
            "scribe_v1" => Some(Model::ScribeV1),
            "scribe_v1_experimental" => Some(Model::ScribeV1Experimental),
            _ => None,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// How fine-grained the returned timestamps are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampsGranularity {
    None,
    #[default]
    Word,
    Character,
}

impl TimestampsGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampsGranularity::None => "none",
            TimestampsGranularity::Word => "word",
            TimestampsGranularity::Character => "character",
        }
    }

    pub fn parse_name(s: &str) -> Option<Self> {
        match s {
            "none" => Some(TimestampsGranularity::None),
            "word" => Some(TimestampsGranularity::Word),
            "character" => Some(TimestampsGranularity::Character),
            _ => None,
        }
    }
}

/// Builder for transcription options.
#[derive(Debug, Clone)]
pub struct TranscribeOptions {
    pub model: Model,
    pub language: Language,
    pub tag_audio_events: bool,
    pub num_speakers: Option<u32>,
    pub timestamps: TimestampsGranularity,
    pub diarize: bool,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            model: Model::ScribeV1,
            language: Language::Auto,
            tag_audio_events: true,
            num_speakers: None,
            timestamps: TimestampsGranularity::Word,
            diarize: false,
        }
    }
}

impl TranscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Set the language hint. Accepts "auto" or a 2/3-letter code.
    pub fn language(mut self, lang: &str) -> Result<Self, Error> {
        self.language = Language::new(lang)?;
        Ok(self)
    }

    pub fn tag_audio_events(mut self, enabled: bool) -> Self {
        self.tag_audio_events = enabled;
        self
    }

    /// Upper bound on distinct speakers, between 1 and 32.
    pub fn num_speakers(mut self, n: u32) -> Result<Self, Error> {
        if n == 0 || n > MAX_SPEAKERS {
            return Err(Error::InvalidOption(format!(
                "num_speakers must be between 1 and {MAX_SPEAKERS}, got {n}"
            )));
        }
        self.num_speakers = Some(n);
        Ok(self)
    }

    pub fn timestamps(mut self, granularity: TimestampsGranularity) -> Self {
        self.timestamps = granularity;
        self
    }

    pub fn diarize(mut self, enabled: bool) -> Self {
        self.diarize = enabled;
        self
    }

    /// Re-check fields that may have been set directly rather than through the builder.
    pub fn validate(&self) -> Result<(), Error> {
        if self.model.id().trim().is_empty() {
            return Err(Error::InvalidOption("model id must not be empty".into()));
        }
        if let Some(n) = self.num_speakers {
            if n == 0 || n > MAX_SPEAKERS {
                return Err(Error::InvalidOption(format!(
                    "num_speakers must be between 1 and {MAX_SPEAKERS}, got {n}"
                )));
            }
        }
        if let Language::Code(code) = &self.language {
            Language::new(code)?;
        }
        Ok(())
    }
}
