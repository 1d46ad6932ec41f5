use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use scribe::{
    ApiKey, ElevenLabsClient, Model, Settings, TimestampsGranularity, TranscribeOptions,
    Transcription,
};

#[derive(Parser)]
#[command(name = "scribe", about = "Transcribe a local audio/video file with ElevenLabs Scribe")]
struct Cli {
    /// Local file path to transcribe.
    #[arg(required_unless_present = "list_models")]
    input: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "report")]
    format: OutputFormat,

    /// Write output to file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model id (default: scribe_v1, or "model" from the config file).
    #[arg(short, long)]
    model: Option<String>,

    /// Language code (e.g. "en", "deu") or "auto" for detection.
    #[arg(short, long, default_value = "auto")]
    language: String,

    /// Label which speaker is talking.
    #[arg(long)]
    diarize: bool,

    /// Maximum number of speakers (1-32).
    #[arg(long)]
    num_speakers: Option<u32>,

    /// Do not tag audio events like (laughter).
    #[arg(long)]
    no_audio_events: bool,

    /// Timestamp granularity.
    #[arg(long, default_value = "word")]
    timestamps: Granularity,

    /// API key (overrides ELEVENLABS_API_KEY and the config file).
    #[arg(long)]
    api_key: Option<String>,

    /// Service base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Settings file (default: <config dir>/scribe/config.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// List known models.
    #[arg(long)]
    list_models: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Report,
    Text,
    Json,
    Srt,
    Vtt,
    /// Filler words and speaking pace.
    Analysis,
}

#[derive(Clone, Copy, ValueEnum)]
enum Granularity {
    None,
    Word,
    Character,
}

impl From<Granularity> for TimestampsGranularity {
    fn from(g: Granularity) -> Self {
        match g {
            Granularity::None => TimestampsGranularity::None,
            Granularity::Word => TimestampsGranularity::Word,
            Granularity::Character => TimestampsGranularity::Character,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scribe=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.list_models {
        println!("{:<24} {}", "MODEL", "DESCRIPTION");
        println!("{:<24} {}", "-----", "-----------");
        for (id, description) in Model::KNOWN {
            println!("{id:<24} {description}");
        }
        return;
    }

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = run(cli, &mut stdout).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, stdout: &mut impl Write) -> scribe::Result<()> {
    let Some(input) = cli.input.clone() else {
        return Err(scribe::Error::InvalidOption("missing input file".into()));
    };

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };

    let opts = build_options(&cli, &settings)?;

    if matches!(cli.format, OutputFormat::Srt | OutputFormat::Vtt)
        && opts.timestamps == TimestampsGranularity::None
    {
        return Err(scribe::Error::InvalidOption(
            "subtitle formats need timestamps; drop --timestamps none".into(),
        ));
    }

    let api_key = ApiKey::resolve(cli.api_key.as_deref(), &settings)?;
    let mut client = ElevenLabsClient::new(api_key);
    if let Some(base_url) = cli.base_url.as_ref().or(settings.base_url.as_ref()) {
        client = client.with_base_url(base_url.as_str());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Transcribing {}", input.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = scribe::run_file(&client, &input, &opts).await;
    spinner.finish_and_clear();
    let run = result?;

    eprintln!(
        "Transcription complete: {} words, language: {} (p={:.2})",
        run.transcript
            .words
            .iter()
            .filter(|w| w.kind == scribe::WordKind::Word)
            .count(),
        run.transcript.language_code,
        run.transcript.language_probability,
    );

    let output_text = render(cli.format, &run)?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &output_text)?;
            eprintln!("Written to {}", path.display());
        }
        None => write!(stdout, "{output_text}")?,
    }
    Ok(())
}

fn build_options(cli: &Cli, settings: &Settings) -> scribe::Result<TranscribeOptions> {
    let model_name = cli
        .model
        .as_deref()
        .or(settings.model.as_deref())
        .unwrap_or("scribe_v1");
    let model = Model::parse_name(model_name).unwrap_or_else(|| {
        tracing::warn!(model = model_name, "unknown model id, passing it through");
        Model::Custom(model_name.to_string())
    });

    let mut opts = TranscribeOptions::new()
        .model(model)
        .language(&cli.language)?
        .diarize(cli.diarize)
        .tag_audio_events(!cli.no_audio_events)
        .timestamps(cli.timestamps.into());

    if let Some(n) = cli.num_speakers {
        opts = opts.num_speakers(n)?;
    }
    opts.validate()?;
    Ok(opts)
}

fn render(format: OutputFormat, run: &Transcription) -> scribe::Result<String> {
    let transcript = &run.transcript;
    if matches!(format, OutputFormat::Srt | OutputFormat::Vtt) && !transcript.has_timestamps() {
        return Err(scribe::Error::MissingTimestamps);
    }

    Ok(match format {
        OutputFormat::Report => run.report().render(),
        OutputFormat::Text => format!("{}\n", transcript.text()),
        OutputFormat::Json => format!("{}\n", transcript.to_json_pretty()?),
        OutputFormat::Srt => transcript.to_srt(),
        OutputFormat::Vtt => transcript.to_vtt(),
        OutputFormat::Analysis => transcript.analysis().to_string(),
    })
}
