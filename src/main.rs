//! Summarize text from a file or stdin.
//!
//! # Examples
//!
//! ```sh
//! # Paragraph summary in a formal tone through the configured backend
//! cat article.txt | alwrity-summarize
//!
//! # Bullet points, custom tone, Spanish, read aloud with espeak
//! alwrity-summarize --file notes.md --format bullets \
//!   --tone Custom --custom-tone "playful" --language Spanish \
//!   --speak --tts-command espeak --voice Female
//!
//! # Call the provider directly with your own key
//! SUMMARIZER_BACKEND=provider alwrity-summarize --api-key "$OPENAI_API_KEY" < memo.txt
//! ```

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{info, warn};

use summarizer::clients::SummarizerClient;
use summarizer::core::config::{AppConfig, BackendKind};
use summarizer::core::models::{Language, SummaryFormat, SummaryOptions, Tone};
use summarizer::core::validation::can_submit;
use summarizer::core::words::ClampedInput;
use summarizer::features::summarize::{SummarizeForm, summarize_form};
use summarizer::prompt::build_prompt;
use summarizer::session::{SessionState, SpeechAction};
use summarizer::speech::{CommandSpeaker, SpeechSynthesizer, VOICE_OPTIONS};

/// Turn long text into clear, actionable summaries.
///
/// Reads the text from --file or stdin.
#[derive(Parser)]
#[command(name = "alwrity-summarize")]
struct Cli {
    // ── Input ──────────────────────────────────────────────────
    /// File to summarize; stdin when omitted
    #[arg(long)]
    file: Option<PathBuf>,

    // ── Options ────────────────────────────────────────────────
    /// Result format: paragraph or bullets
    #[arg(long, default_value = "paragraph")]
    format: SummaryFormat,

    /// Tone: Formal, Friendly, Casual, Professional, Diplomatic, Confident or Custom
    #[arg(long, default_value = "Formal")]
    tone: Tone,

    /// Free-text tone, required with --tone Custom
    #[arg(long, default_value = "")]
    custom_tone: String,

    /// Target language, or Custom
    #[arg(long, default_value = "English")]
    language: Language,

    /// Free-text language, required with --language Custom
    #[arg(long, default_value = "")]
    custom_language: String,

    // ── Backend ────────────────────────────────────────────────
    /// API key for this request; overrides OPENAI_API_KEY
    #[arg(long, env = "SUMMARIZER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Backend to use: proxy or provider (overrides SUMMARIZER_BACKEND)
    #[arg(long)]
    backend: Option<BackendKind>,

    /// Word budget (overrides SUMMARIZER_WORD_LIMIT)
    #[arg(long)]
    word_limit: Option<usize>,

    /// Print the prompt instead of sending it
    #[arg(long)]
    dry_run: bool,

    // ── Read aloud ─────────────────────────────────────────────
    /// Read the summary aloud after printing it
    #[arg(long)]
    speak: bool,

    /// Speech command (overrides TTS_COMMAND)
    #[arg(long)]
    tts_command: Option<String>,

    /// Voice label
    #[arg(long, default_value = "Default")]
    voice: String,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    summarizer::setup_cli_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env().context("loading configuration")?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(limit) = cli.word_limit {
        config.word_limit = limit;
    }

    let raw = read_input(cli.file.as_deref())?;
    let input = ClampedInput::new(&raw, config.word_limit);
    if input.truncated {
        eprintln!("Input truncated to {} words.", config.word_limit);
    }
    eprintln!("{}", input.counter_label());

    let options = SummaryOptions {
        format: cli.format,
        tone: cli.tone,
        custom_tone: cli.custom_tone,
        language: config.language_enabled.then_some(cli.language),
        custom_language: cli.custom_language,
    };

    let check = can_submit(&input.text, &options, config.word_limit);
    if check.blocked {
        eprintln!("{}", check.reason);
        process::exit(2);
    }

    if cli.dry_run {
        println!("{}", build_prompt(&input.text, &options));
        return Ok(());
    }

    let client = SummarizerClient::from_config(&config)?;
    let form = SummarizeForm {
        text: input.text,
        options,
        api_key: cli.api_key,
    };

    let mut session = SessionState::new();
    let ticket = session.submit();
    eprintln!("Summarizing…");

    match summarize_form(&client, &form, config.word_limit).await {
        Ok(summary) => {
            session.result_received(ticket, summary);
        }
        Err(e) => {
            session.error_received(ticket, e.to_string());
        }
    }

    if let Some(message) = session.last_error() {
        bail!("{message}");
    }
    let Some(summary) = session.last_summary() else {
        bail!("no summary was produced");
    };
    println!("{summary}");

    if cli.speak {
        let program = cli
            .tts_command
            .or(config.tts_command)
            .context("--speak needs --tts-command or TTS_COMMAND")?;
        if !VOICE_OPTIONS.contains(&cli.voice.as_str()) {
            bail!(
                "unknown voice {:?}; choose one of {}",
                cli.voice,
                VOICE_OPTIONS.join(", ")
            );
        }
        let mut speaker = CommandSpeaker::new(program, config.tts_voice_flag);
        read_aloud(&mut session, &mut speaker, &cli.voice).await?;
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Plays the current summary; Ctrl-C stops playback.
async fn read_aloud(
    session: &mut SessionState,
    speaker: &mut CommandSpeaker,
    voice: &str,
) -> Result<()> {
    let SpeechAction::Start(text) = session.toggle_speech() else {
        warn!("Nothing to read aloud");
        return Ok(());
    };
    speaker.speak(&text, voice).await?;
    info!("Reading summary aloud; press Ctrl-C to stop");

    let interrupted = tokio::select! {
        result = speaker.wait() => {
            result?;
            false
        }
        _ = tokio::signal::ctrl_c() => true,
    };

    if !interrupted {
        session.speech_finished();
    } else if session.toggle_speech() == SpeechAction::Cancel {
        speaker.cancel().await?;
    }
    Ok(())
}
