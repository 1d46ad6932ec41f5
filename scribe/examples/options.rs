//! Transcribe with a language hint and speaker diarization, printing each cue.
//!
//! Usage: ELEVENLABS_API_KEY=... cargo run --example options -- path/to/interview.mp3

use scribe::{Model, TranscribeOptions};

#[tokio::main]
async fn main() -> scribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: options <audio-file>");

    let opts = TranscribeOptions::new()
        .model(Model::ScribeV1)
        .language("en")?
        .diarize(true)
        .num_speakers(2)?;

    let transcript = scribe::transcribe_file_with_options(&path, &opts).await?;

    println!(
        "language: {} (p={:.2})",
        transcript.language_code, transcript.language_probability
    );

    for cue in transcript.cues() {
        let speaker = cue.speaker_id.as_deref().unwrap_or("-");
        println!("[{:.1}s - {:.1}s] {speaker}: {}", cue.start, cue.end, cue.text);
    }

    Ok(())
}
