//! Speaking feedback computed from a transcript: filler words and pace.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::types::{Transcript, WordKind};

/// Below this many words per minute the pace is rated slow.
pub const SLOW_BELOW_WPM: u32 = 110;
/// Above this many words per minute the pace is rated fast.
pub const FAST_ABOVE_WPM: u32 = 150;

/// Two-word fillers, matched before single words.
const FILLER_PHRASES: [[&str; 2]; 3] = [["you", "know"], ["i", "mean"], ["sort", "of"]];

const FILLER_WORDS: [&str; 10] = [
    "um", "umm", "uh", "uhh", "er", "erm", "ah", "hmm", "mm", "like",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaceRating {
    Slow,
    Good,
    Fast,
}

impl PaceRating {
    pub fn from_wpm(wpm: u32) -> Self {
        if wpm < SLOW_BELOW_WPM {
            PaceRating::Slow
        } else if wpm <= FAST_ABOVE_WPM {
            PaceRating::Good
        } else {
            PaceRating::Fast
        }
    }
}

impl fmt::Display for PaceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaceRating::Slow => "Slow",
            PaceRating::Good => "Good",
            PaceRating::Fast => "Fast",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillerCount {
    pub word: String,
    pub count: usize,
}

/// Filler usage and speaking pace for one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechAnalysis {
    pub word_count: usize,
    /// Seconds from the first spoken word to the last; None without timestamps.
    pub duration_secs: Option<f64>,
    pub pace_wpm: Option<u32>,
    pub pace_rating: Option<PaceRating>,
    pub filler_word_count: usize,
    /// Most frequent first, ties alphabetical.
    pub filler_words: Vec<FillerCount>,
}

impl SpeechAnalysis {
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let spoken: Vec<_> = transcript
            .words
            .iter()
            .filter(|w| w.kind == WordKind::Word)
            .collect();

        // Untimed responses may carry no word list at all; fall back to the text.
        let tokens: Vec<String> = if spoken.is_empty() {
            transcript.text.split_whitespace().filter_map(normalize).collect()
        } else {
            spoken.iter().filter_map(|w| normalize(&w.text)).collect()
        };

        let duration_secs = spoken_span(&spoken);
        let pace_wpm = duration_secs.map(|secs| words_per_minute(tokens.len(), secs));
        let filler_words = count_fillers(&tokens);

        Self {
            word_count: tokens.len(),
            duration_secs,
            pace_wpm,
            pace_rating: pace_wpm.map(PaceRating::from_wpm),
            filler_word_count: filler_words.iter().map(|f| f.count).sum(),
            filler_words,
        }
    }
}

impl fmt::Display for SpeechAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Words: {}", self.word_count)?;
        match self.duration_secs {
            Some(secs) => writeln!(f, "Duration: {secs:.1}s")?,
            None => writeln!(f, "Duration: unknown")?,
        }
        match (self.pace_wpm, self.pace_rating) {
            (Some(wpm), Some(rating)) => writeln!(f, "Pace: {wpm} wpm ({rating})")?,
            _ => writeln!(f, "Pace: unknown (no word timestamps)")?,
        }
        writeln!(f, "Filler words: {}", self.filler_word_count)?;
        for filler in &self.filler_words {
            writeln!(f, "  {}: {}", filler.word, filler.count)?;
        }
        Ok(())
    }
}

/// Lowercase and strip surrounding punctuation; None if nothing is left.
fn normalize(token: &str) -> Option<String> {
    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
    let trimmed = trimmed.trim_matches('\'');
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn spoken_span(words: &[&crate::types::Word]) -> Option<f64> {
    let start = words.iter().filter_map(|w| w.start).reduce(f64::min)?;
    let end = words.iter().filter_map(|w| w.end).reduce(f64::max)?;
    let span = end - start;
    (span > 0.0).then_some(span)
}

fn words_per_minute(words: usize, secs: f64) -> u32 {
    (words as f64 * 60.0 / secs).round() as u32
}

fn count_fillers(tokens: &[String]) -> Vec<FillerCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut i = 0;

    while i < tokens.len() {
        let phrase = FILLER_PHRASES.iter().find(|p| {
            tokens.get(i).is_some_and(|t| t == p[0]) && tokens.get(i + 1).is_some_and(|t| t == p[1])
        });
        if let Some(phrase) = phrase {
            *counts.entry(phrase.join(" ")).or_default() += 1;
            i += 2;
            continue;
        }

        if FILLER_WORDS.contains(&tokens[i].as_str()) {
            *counts.entry(tokens[i].clone()).or_default() += 1;
        }
        i += 1;
    }

    let mut fillers: Vec<FillerCount> = counts
        .into_iter()
        .map(|(word, count)| FillerCount { word, count })
        .collect();
    // BTreeMap order is alphabetical; the stable sort keeps it for ties.
    fillers.sort_by(|a, b| b.count.cmp(&a.count));
    fillers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Word;

    fn timed(text: &str, start: f64, end: f64) -> Word {
        Word {
            text: text.into(),
            kind: WordKind::Word,
            start: Some(start),
            end: Some(end),
            speaker_id: None,
            characters: None,
        }
    }

    fn transcript(text: &str, words: Vec<Word>) -> Transcript {
        Transcript {
            language_code: "en".into(),
            language_probability: 0.9,
            text: text.into(),
            words,
        }
    }

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().filter_map(normalize).collect()
    }

    #[test]
    fn test_pace_rating_boundaries() {
        assert_eq!(PaceRating::from_wpm(0), PaceRating::Slow);
        assert_eq!(PaceRating::from_wpm(109), PaceRating::Slow);
        assert_eq!(PaceRating::from_wpm(110), PaceRating::Good);
        assert_eq!(PaceRating::from_wpm(150), PaceRating::Good);
        assert_eq!(PaceRating::from_wpm(151), PaceRating::Fast);
    }

    #[test]
    fn test_words_per_minute() {
        assert_eq!(words_per_minute(120, 60.0), 120);
        assert_eq!(words_per_minute(10, 4.0), 150);
        assert_eq!(words_per_minute(11, 6.0), 110);
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Um,"), Some("um".into()));
        assert_eq!(normalize("\"Like\"..."), Some("like".into()));
        assert_eq!(normalize("don't"), Some("don't".into()));
        assert_eq!(normalize("—"), None);
    }

    #[test]
    fn test_count_fillers_words_and_phrases() {
        let fillers = count_fillers(&tokens("Um, so, you know, it was, like, uh... um like, I mean great"));
        assert_eq!(
            fillers,
            vec![
                FillerCount { word: "like".into(), count: 2 },
                FillerCount { word: "um".into(), count: 2 },
                FillerCount { word: "i mean".into(), count: 1 },
                FillerCount { word: "uh".into(), count: 1 },
                FillerCount { word: "you know".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_count_fillers_ignores_partial_matches() {
        assert!(count_fillers(&tokens("umbrella likely you knew")).is_empty());
        assert!(count_fillers(&tokens("you")).is_empty());
    }

    #[test]
    fn test_analysis_from_timed_words() {
        // 10 words over 5 seconds = 120 wpm.
        let words: Vec<Word> = (0..10)
            .map(|i| {
                let text = if i == 3 { "um" } else { "word" };
                timed(text, i as f64 * 0.5, i as f64 * 0.5 + 0.5)
            })
            .collect();
        let analysis = transcript("ignored", words).analysis();

        assert_eq!(analysis.word_count, 10);
        assert_eq!(analysis.duration_secs, Some(5.0));
        assert_eq!(analysis.pace_wpm, Some(120));
        assert_eq!(analysis.pace_rating, Some(PaceRating::Good));
        assert_eq!(analysis.filler_word_count, 1);
    }

    #[test]
    fn test_analysis_skips_spacing_and_events() {
        let mut words = vec![timed("Hello", 0.0, 30.0), timed("um", 30.0, 60.0)];
        words.push(Word {
            text: "(laughs)".into(),
            kind: WordKind::AudioEvent,
            ..timed("", 60.0, 90.0)
        });
        words.push(Word {
            text: " ".into(),
            kind: WordKind::Spacing,
            ..timed("", 90.0, 90.0)
        });
        let analysis = transcript("Hello um", words).analysis();

        assert_eq!(analysis.word_count, 2);
        assert_eq!(analysis.duration_secs, Some(60.0));
        assert_eq!(analysis.pace_wpm, Some(2));
        assert_eq!(analysis.pace_rating, Some(PaceRating::Slow));
    }

    #[test]
    fn test_analysis_without_timestamps_uses_text() {
        let analysis = transcript("Uh, I mean, it works.", Vec::new()).analysis();
        assert_eq!(analysis.word_count, 5);
        assert_eq!(analysis.duration_secs, None);
        assert_eq!(analysis.pace_wpm, None);
        assert_eq!(analysis.pace_rating, None);
        assert_eq!(analysis.filler_word_count, 2);
    }

    #[test]
    fn test_display() {
        let words = vec![timed("um", 0.0, 0.5), timed("yes", 0.5, 1.0)];
        let out = transcript("um yes", words).analysis().to_string();
        assert_eq!(
            out,
            "Words: 2\nDuration: 1.0s\nPace: 120 wpm (Good)\nFiller words: 1\n  um: 1\n"
        );

        let out = transcript("hi", Vec::new()).analysis().to_string();
        assert!(out.contains("Pace: unknown"));
    }
}
