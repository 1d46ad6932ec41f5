use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Error, Result};

/// Content type sent when the extension is not recognized.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// The full byte content of one media file, held in memory for upload.
///
/// No decoding happens locally: the service accepts the container as-is
/// (mp3, wav, mp4, webm, ...), so the bytes are forwarded untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioPayload {
    path: PathBuf,
    file_name: String,
    content_type: &'static str,
    bytes: Vec<u8>,
}

impl AudioPayload {
    /// Read a file fully into memory.
    ///
    /// A missing file is reported as [`Error::AudioNotFound`]; any other
    /// read failure as [`Error::Io`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading audio");

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::AudioNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;

        if bytes.is_empty() {
            warn!(path = %path.display(), "audio file is empty");
        }

        let payload = Self::from_bytes(path, bytes);
        info!(
            bytes = payload.len(),
            content_type = payload.content_type,
            "audio ready"
        );
        Ok(payload)
    }

    /// Wrap bytes that were already read, naming them after `path`.
    pub fn from_bytes(path: impl AsRef<Path>, bytes: Vec<u8>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".into());

        Self {
            path: path.to_path_buf(),
            content_type: guess_content_type(path),
            file_name,
            bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Summarize instead of dumping the buffer.
impl fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioPayload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Guess a MIME type from the file extension.
pub fn guess_content_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FALLBACK_CONTENT_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "weba" => "audio/webm",
        "aiff" | "aif" => "audio/aiff",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
