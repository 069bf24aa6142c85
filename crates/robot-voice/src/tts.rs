use crate::error::VoiceError;
use async_trait::async_trait;
use robot_types::Language;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Maximum text input size for TTS (4 KiB). Announcements are a sentence at most.
const MAX_TTS_INPUT_BYTES: usize = 4 * 1024;

/// Timeout for the synthesizer process.
const TTS_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for playing one announcement.
const PLAYBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Something that can say a sentence out loud.
///
/// Implementations block (asynchronously) until playback has finished, so
/// callers that need non-overlapping speech only have to call them one at
/// a time.
#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str, language: Language) -> Result<(), VoiceError>;
}

/// Speaker that discards everything. Used when speech is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

#[async_trait]
impl Speaker for SilentSpeaker {
    async fn speak(&self, text: &str, language: Language) -> Result<(), VoiceError> {
        tracing::debug!(%language, text, "speech disabled, dropping announcement");
        Ok(())
    }
}

/// Text-to-speech through a local synthesizer and audio player.
///
/// The synthesizer is invoked as `<synth> -v <lang> --stdout <text>` and must
/// write a WAV file to stdout; the player is invoked as `<player> -q -` and
/// reads that WAV from stdin.
#[derive(Debug, Clone)]
pub struct TtsService {
    synth_binary: PathBuf,
    player_binary: PathBuf,
}

impl TtsService {
    pub fn new(synth_binary: impl AsRef<Path>, player_binary: impl AsRef<Path>) -> Self {
        Self {
            synth_binary: synth_binary.as_ref().to_path_buf(),
            player_binary: player_binary.as_ref().to_path_buf(),
        }
    }

    /// Renders `text` to WAV bytes.
    pub async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, VoiceError> {
        if text.trim().is_empty() {
            return Err(VoiceError::Tts("nothing to say".to_string()));
        }
        if text.len() > MAX_TTS_INPUT_BYTES {
            return Err(VoiceError::Tts(format!(
                "text exceeds maximum size: {} bytes (limit: {} bytes)",
                text.len(),
                MAX_TTS_INPUT_BYTES
            )));
        }
        if self.synth_binary.as_os_str().is_empty() {
            return Err(VoiceError::Config(
                "synth_binary is not configured".to_string(),
            ));
        }

        let mut command = Command::new(&self.synth_binary);
        command
            .arg("-v")
            .arg(language.code())
            .arg("--stdout")
            .arg(text)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| {
            VoiceError::Tts(format!(
                "Failed to spawn {}: {}",
                self.synth_binary.display(),
                e
            ))
        })?;

        let output = tokio::time::timeout(TTS_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                VoiceError::Tts(format!(
                    "TTS process timed out after {} seconds",
                    TTS_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| VoiceError::Tts(format!("Failed to wait for synthesizer: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Tts(format!("Synthesizer failed: {}", stderr)));
        }
        if output.stdout.is_empty() {
            return Err(VoiceError::Tts("Synthesizer produced no audio".to_string()));
        }

        Ok(output.stdout)
    }

    /// Plays WAV bytes to completion.
    pub async fn play(&self, wav: &[u8]) -> Result<(), VoiceError> {
        let mut child = Command::new(&self.player_binary)
            .arg("-q")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                VoiceError::Playback(format!(
                    "Failed to spawn {}: {}",
                    self.player_binary.display(),
                    e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| VoiceError::Playback("Failed to open stdin".to_string()))?;
        let audio = wav.to_vec();

        // Write from a separate task so a player that stops reading cannot deadlock us.
        let write_task = tokio::spawn(async move {
            stdin.write_all(&audio).await?;
            stdin.shutdown().await
        });

        let output = tokio::time::timeout(PLAYBACK_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                VoiceError::Playback(format!(
                    "Playback timed out after {} seconds",
                    PLAYBACK_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| VoiceError::Playback(format!("Failed to wait for player: {}", e)))?;

        match write_task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(VoiceError::Playback(format!(
                    "Failed to write to player stdin: {}",
                    e
                )))
            }
            Err(e) => return Err(VoiceError::Playback(format!("Stdin task failed: {}", e))),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Playback(format!("Player failed: {}", stderr)));
        }

        Ok(())
    }
}

#[async_trait]
impl Speaker for TtsService {
    async fn speak(&self, text: &str, language: Language) -> Result<(), VoiceError> {
        let wav = self.synthesize(text, language).await?;
        self.play(&wav).await
    }
}
