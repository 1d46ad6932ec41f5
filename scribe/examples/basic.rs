//! Transcribe a local media file and print the text.
//!
//! Usage: ELEVENLABS_API_KEY=... cargo run --example basic -- path/to/video.mp4

#[tokio::main]
async fn main() -> scribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: basic <media-file>");

    let transcript = scribe::transcribe_file(&path).await?;

    println!("{}", transcript.text());

    Ok(())
}
