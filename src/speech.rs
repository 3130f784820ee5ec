//! Read-aloud support.
//!
//! The engine is external; this module only checks the text, lists the voice
//! labels offered to the user and drives an OS speech command.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::errors::SummarizerError;

/// Voice labels offered next to the read-aloud button.
pub const VOICE_OPTIONS: [&str; 5] = ["Default", "Female", "Male", "Child", "Senior"];

/// Validates text for speech and returns it trimmed.
///
/// # Errors
///
/// Returns `SpeechError` when there is nothing to read.
pub fn speech_text(text: &str) -> Result<&str, SummarizerError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SummarizerError::SpeechError(
            "Text cannot be empty for text-to-speech.".to_string(),
        ));
    }
    Ok(text)
}

/// Fire-and-forget speech engine with start and cancel.
#[async_trait]
pub trait SpeechSynthesizer: Send {
    /// Starts reading `text`, cancelling anything already playing.
    async fn speak(&mut self, text: &str, voice: &str) -> Result<(), SummarizerError>;

    /// Stops playback. No-op when idle.
    async fn cancel(&mut self) -> Result<(), SummarizerError>;

    /// Waits for the current playback to end on its own.
    async fn wait(&mut self) -> Result<(), SummarizerError>;
}

/// Speaks through a local command such as `espeak` or `say`, passing the text
/// as the last argument.
pub struct CommandSpeaker {
    program: String,
    voice_flag: Option<String>,
    child: Option<Child>,
}

impl CommandSpeaker {
    #[must_use]
    pub fn new(program: impl Into<String>, voice_flag: Option<String>) -> Self {
        Self {
            program: program.into(),
            voice_flag,
            child: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.child.is_some()
    }

    fn command(&self, text: &str, voice: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(flag) = &self.voice_flag
            && voice != VOICE_OPTIONS[0]
        {
            cmd.arg(flag).arg(voice.to_ascii_lowercase());
        }
        cmd.arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSpeaker {
    async fn speak(&mut self, text: &str, voice: &str) -> Result<(), SummarizerError> {
        let text = speech_text(text)?;
        if !VOICE_OPTIONS.contains(&voice) {
            return Err(SummarizerError::SpeechError(format!("unknown voice: {voice}")));
        }
        self.cancel().await?;

        let child = self.command(text, voice).spawn().map_err(|e| {
            SummarizerError::SpeechError(format!("failed to start {}: {e}", self.program))
        })?;
        info!(program = %self.program, voice, "Speech started");
        self.child = Some(child);
        Ok(())
    }

    async fn cancel(&mut self) -> Result<(), SummarizerError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        if let Err(e) = child.kill().await {
            warn!("Failed to stop speech process: {}", e);
            return Err(SummarizerError::SpeechError(e.to_string()));
        }
        info!("Speech cancelled");
        Ok(())
    }

    async fn wait(&mut self) -> Result<(), SummarizerError> {
        let Some(child) = self.child.as_mut() else {
            return Ok(());
        };
        let status = child
            .wait()
            .await
            .map_err(|e| SummarizerError::SpeechError(e.to_string()))?;
        self.child = None;
        if !status.success() {
            return Err(SummarizerError::SpeechError(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speech_text_trims_and_rejects_blank() {
        assert_eq!(speech_text("  hello \n").unwrap(), "hello");
        assert!(matches!(
            speech_text(" \t "),
            Err(SummarizerError::SpeechError(_))
        ));
    }

    #[test]
    fn default_voice_is_listed_first() {
        assert_eq!(VOICE_OPTIONS[0], "Default");
        assert_eq!(VOICE_OPTIONS.len(), 5);
    }

    #[tokio::test]
    async fn blank_text_is_rejected_before_spawning() {
        let mut speaker = CommandSpeaker::new("definitely-not-a-real-tts-binary", None);
        let err = speaker.speak("   ", "Default").await.unwrap_err();
        assert!(matches!(err, SummarizerError::SpeechError(_)));
        assert!(!speaker.is_active());
    }

    #[tokio::test]
    async fn missing_program_is_a_speech_error() {
        let mut speaker = CommandSpeaker::new("definitely-not-a-real-tts-binary", None);
        let err = speaker.speak("hello", "Default").await.unwrap_err();
        assert!(err.to_string().contains("failed to start"));
        assert!(!speaker.is_active());
    }

    #[tokio::test]
    async fn cancel_and_wait_are_noops_when_idle() {
        let mut speaker = CommandSpeaker::new("espeak", Some("-v".into()));
        speaker.cancel().await.unwrap();
        speaker.wait().await.unwrap();
    }
}
