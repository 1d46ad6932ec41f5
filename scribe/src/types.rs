use serde::{Deserialize, Serialize};

/// A silence longer than this between two words starts a new cue.
const MAX_CUE_GAP_SECS: f64 = 1.5;

/// Kind of a token in the word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordKind {
    Word,
    Spacing,
    AudioEvent,
    #[serde(other)]
    Unknown,
}

/// Timing for a single character, when character timestamps were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub text: String,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
}

/// A single token with timing and optional speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: WordKind,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<Character>>,
}

/// Complete transcription result as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub language_code: String,
    pub language_probability: f64,
    pub text: String,
    #[serde(default)]
    pub words: Vec<Word>,
}

/// A timed subtitle line built from consecutive words.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub speaker_id: Option<String>,
}

impl Transcript {
    /// Plain transcript text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether any spoken token or audio event carries timing information.
    pub fn has_timestamps(&self) -> bool {
        self.words
            .iter()
            .any(|w| w.kind != WordKind::Spacing && w.start.is_some() && w.end.is_some())
    }

    /// Filler words and speaking pace.
    pub fn analysis(&self) -> crate::analysis::SpeechAnalysis {
        crate::analysis::SpeechAnalysis::from_transcript(self)
    }

    /// Group timed words into subtitle cues.
    ///
    /// A cue closes on a speaker change, after sentence-ending punctuation,
    /// or when the silence before the next word exceeds 1.5 s. Spacing tokens
    /// only contribute text; untimed tokens are skipped.
    pub fn cues(&self) -> Vec<Cue> {
        let mut cues = Vec::new();
        let mut current: Option<Cue> = None;

        for word in &self.words {
            if word.kind == WordKind::Spacing {
                if let Some(cue) = current.as_mut() {
                    cue.text.push_str(&word.text);
                }
                continue;
            }

            let (Some(start), Some(end)) = (word.start, word.end) else {
                continue;
            };

            if let Some(cue) = current.take() {
                let speaker_changed = word.speaker_id.is_some() && word.speaker_id != cue.speaker_id;
                if speaker_changed || start - cue.end > MAX_CUE_GAP_SECS {
                    push_cue(&mut cues, cue);
                } else {
                    current = Some(cue);
                }
            }

            let cue = current.get_or_insert_with(|| Cue {
                start,
                end,
                text: String::new(),
                speaker_id: word.speaker_id.clone(),
            });
            cue.text.push_str(&word.text);
            cue.end = end;

            if word.kind == WordKind::Word && ends_sentence(&word.text) {
                if let Some(cue) = current.take() {
                    push_cue(&mut cues, cue);
                }
            }
        }

        if let Some(cue) = current {
            push_cue(&mut cues, cue);
        }
        cues
    }

    /// Format as SRT subtitles.
    pub fn to_srt(&self) -> String {
        let mut out = String::new();
        for (i, cue) in self.cues().iter().enumerate() {
            out.push_str(&format!("{}\n", i + 1));
            out.push_str(&format!(
                "{} --> {}\n",
                format_srt_time(cue.start),
                format_srt_time(cue.end)
            ));
            out.push_str(&cue.text);
            out.push_str("\n\n");
        }
        out
    }

    /// Format as WebVTT subtitles. Speaker ids become voice tags.
    pub fn to_vtt(&self) -> String {
        let mut out = String::from("WEBVTT\n\n");
        for cue in self.cues() {
            out.push_str(&format!(
                "{} --> {}\n",
                format_vtt_time(cue.start),
                format_vtt_time(cue.end)
            ));
            match &cue.speaker_id {
                Some(speaker) => out.push_str(&format!("<v {speaker}>{}", cue.text)),
                None => out.push_str(&cue.text),
            }
            out.push_str("\n\n");
        }
        out
    }

    /// Format as JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Format as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn push_cue(cues: &mut Vec<Cue>, mut cue: Cue) {
    cue.text = cue.text.trim().to_string();
    if !cue.text.is_empty() {
        cues.push(cue);
    }
}

fn ends_sentence(text: &str) -> bool {
    text.trim_end().ends_with(['.', '?', '!'])
}

/// Format seconds as SRT timestamp: HH:MM:SS,mmm
fn format_srt_time(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Format seconds as VTT timestamp: HH:MM:SS.mmm
fn format_vtt_time(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64, speaker: Option<&str>) -> Word {
        Word {
            text: text.into(),
            kind: WordKind::Word,
            start: Some(start),
            end: Some(end),
            speaker_id: speaker.map(Into::into),
            characters: None,
        }
    }

    fn space(at: f64) -> Word {
        Word {
            text: " ".into(),
            kind: WordKind::Spacing,
            start: Some(at),
            end: Some(at),
            speaker_id: None,
            characters: None,
        }
    }

    fn transcript(words: Vec<Word>) -> Transcript {
        Transcript {
            language_code: "en".into(),
            language_probability: 0.98,
            text: "unused".into(),
            words,
        }
    }

    #[test]
    fn test_deserialize_service_response() {
        let json = r#"{
            "language_code": "en",
            "language_probability": 0.99,
            "text": "Hello world!",
            "words": [
                {"text": "Hello", "type": "word", "start": 0.0, "end": 0.4, "speaker_id": "speaker_0"},
                {"text": " ", "type": "spacing", "start": 0.4, "end": 0.5},
                {"text": "world!", "type": "word", "start": 0.5, "end": 0.9,
                 "characters": [{"text": "w", "start": 0.5, "end": 0.6}]},
                {"text": "(laughs)", "type": "audio_event", "start": 1.0, "end": 1.5},
                {"text": "?", "type": "something_new"}
            ]
        }"#;

        let t: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(t.text(), "Hello world!");
        assert_eq!(t.language_code, "en");
        assert_eq!(t.words.len(), 5);
        assert_eq!(t.words[0].speaker_id.as_deref(), Some("speaker_0"));
        assert_eq!(t.words[1].kind, WordKind::Spacing);
        assert_eq!(t.words[2].characters.as_ref().unwrap().len(), 1);
        assert_eq!(t.words[3].kind, WordKind::AudioEvent);
        assert_eq!(t.words[4].kind, WordKind::Unknown);
        assert_eq!(t.words[4].start, None);
        assert!(t.has_timestamps());
    }

    #[test]
    fn test_deserialize_without_words() {
        let json = r#"{"language_code": "de", "language_probability": 0.5, "text": "Hallo"}"#;
        let t: Transcript = serde_json::from_str(json).unwrap();
        assert!(t.words.is_empty());
        assert!(!t.has_timestamps());
        assert!(t.cues().is_empty());
        assert_eq!(t.to_srt(), "");
    }

    #[test]
    fn test_has_timestamps_ignores_spacing_and_untimed_words() {
        let untimed = Word {
            start: None,
            end: None,
            ..word("hello", 0.0, 0.0, None)
        };
        assert!(!transcript(vec![untimed.clone()]).has_timestamps());
        assert!(!transcript(vec![space(0.5)]).has_timestamps());
        assert!(transcript(vec![untimed, word("hi", 1.0, 1.2, None)]).has_timestamps());
    }

    #[test]
    fn test_cues_split_on_sentence_end() {
        let t = transcript(vec![
            word("Hi", 0.0, 0.3, None),
            space(0.3),
            word("there.", 0.3, 0.8, None),
            space(0.8),
            word("Bye", 1.0, 1.4, None),
        ]);

        let cues = t.cues();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "Hi there.");
        assert_eq!(cues[0].start, 0.0);
        assert_eq!(cues[0].end, 0.8);
        assert_eq!(cues[1].text, "Bye");
        assert_eq!(cues[1].start, 1.0);
    }

    #[test]
    fn test_cues_split_on_speaker_change() {
        let t = transcript(vec![
            word("Hello", 0.0, 0.5, Some("speaker_0")),
            space(0.5),
            word("hi", 0.6, 0.9, Some("speaker_1")),
        ]);

        let cues = t.cues();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].speaker_id.as_deref(), Some("speaker_0"));
        assert_eq!(cues[1].speaker_id.as_deref(), Some("speaker_1"));
        assert_eq!(cues[1].text, "hi");
    }

    #[test]
    fn test_cues_split_on_long_gap() {
        let t = transcript(vec![
            word("one", 0.0, 0.5, None),
            space(0.5),
            word("two", 3.0, 3.5, None),
        ]);
        let cues = t.cues();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "one");
        assert_eq!(cues[1].text, "two");
    }

    #[test]
    fn test_srt_output() {
        let t = transcript(vec![
            word("Hello", 0.0, 0.5, None),
            space(0.5),
            word("world.", 0.5, 1.25, None),
            word("Again", 61.0, 62.5, None),
        ]);
        assert_eq!(
            t.to_srt(),
            "1\n00:00:00,000 --> 00:00:01,250\nHello world.\n\n\
             2\n00:01:01,000 --> 00:01:02,500\nAgain\n\n"
        );
    }

    #[test]
    fn test_vtt_output_with_speaker() {
        let t = transcript(vec![word("Hi.", 0.0, 0.5, Some("speaker_0"))]);
        assert_eq!(
            t.to_vtt(),
            "WEBVTT\n\n00:00:00.000 --> 00:00:00.500\n<v speaker_0>Hi.\n\n"
        );
    }

    #[test]
    fn test_format_times() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(3661.5), "01:01:01,500");
        assert_eq!(format_vtt_time(59.999), "00:00:59.999");
        assert_eq!(format_vtt_time(-1.0), "00:00:00.000");
    }

    #[test]
    fn test_json_roundtrip_keeps_type_field() {
        let t = transcript(vec![word("Hi", 0.0, 0.2, None)]);
        let json = t.to_json().unwrap();
        assert!(json.contains(r#""type":"word""#));
        assert!(!json.contains("speaker_id"));
        let back: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(t.to_json_pretty().unwrap().contains('\n'));
    }
}
