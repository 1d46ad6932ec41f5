use std::fmt;
use std::io;
use std::path::Path;

use crate::audio::AudioPayload;
use crate::types::Transcript;

/// Console summary of one run: the input path, the payload, the raw
/// response and the transcript text, separated by blank lines.
///
/// The transcript text is always the last line, so scripts can `tail -n 1`.
#[derive(Debug)]
pub struct Report<'a> {
    pub path: &'a Path,
    pub payload: &'a AudioPayload,
    pub transcript: &'a Transcript,
}

impl<'a> Report<'a> {
    pub fn new(path: &'a Path, payload: &'a AudioPayload, transcript: &'a Transcript) -> Self {
        Self {
            path,
            payload,
            transcript,
        }
    }

    pub fn write_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        write!(out, "{self}")
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File path: {}", self.path.display())?;
        writeln!(f)?;
        writeln!(f, "{:?}", self.payload)?;
        writeln!(f)?;
        writeln!(f, "{:?}", self.transcript)?;
        writeln!(f)?;
        writeln!(f, "{}", self.transcript.text())
    }
}
