//! Microphone capture and the listen-then-transcribe recognizer.

use crate::error::{RecognitionError, VoiceError};
use crate::stt::SttService;
use async_trait::async_trait;
use robot_types::Language;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Extra time granted to the recorder beyond the requested capture length.
const RECORD_GRACE: Duration = Duration::from_secs(2);

/// Turns the next spoken phrase into text.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Waits at most `timeout` for a phrase and returns its transcription.
    async fn listen(&self, timeout: Duration) -> Result<String, RecognitionError>;
}

/// Fixed-length WAV capture through an `arecord` compatible binary.
#[derive(Debug, Clone)]
pub struct Microphone {
    recorder_binary: PathBuf,
}

impl Microphone {
    pub fn new(recorder_binary: impl AsRef<Path>) -> Self {
        Self {
            recorder_binary: recorder_binary.as_ref().to_path_buf(),
        }
    }

    /// Records `duration` of 16 kHz mono audio and returns it as WAV.
    pub async fn record(&self, duration: Duration) -> Result<Vec<u8>, VoiceError> {
        let secs = duration.as_secs().max(1);
        let child = Command::new(&self.recorder_binary)
            .args(["-q", "-f", "S16_LE", "-r", "16000", "-c", "1", "-t", "wav"])
            .arg("-d")
            .arg(secs.to_string())
            .arg("-")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                VoiceError::Recording(format!(
                    "Failed to spawn {}: {}",
                    self.recorder_binary.display(),
                    e
                ))
            })?;

        let limit = Duration::from_secs(secs) + RECORD_GRACE;
        let output = tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| {
                VoiceError::Recording(format!(
                    "Recorder did not finish within {} seconds",
                    limit.as_secs()
                ))
            })?
            .map_err(|e| VoiceError::Recording(format!("Failed to wait for recorder: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Recording(format!("Recorder failed: {}", stderr)));
        }

        Ok(output.stdout)
    }
}

/// Records a phrase from the microphone and transcribes it with whisper.cpp.
#[derive(Debug, Clone)]
pub struct SpeechRecognizer {
    microphone: Microphone,
    stt: SttService,
    language: Language,
    phrase_limit: Duration,
}

impl SpeechRecognizer {
    pub fn new(
        microphone: Microphone,
        stt: SttService,
        language: Language,
        phrase_limit: Duration,
    ) -> Self {
        Self {
            microphone,
            stt,
            language,
            phrase_limit,
        }
    }
}

#[async_trait]
impl Recognizer for SpeechRecognizer {
    async fn listen(&self, timeout: Duration) -> Result<String, RecognitionError> {
        // The capture itself is bounded by the phrase limit; the listen timeout
        // bounds the whole record-and-transcribe round.
        let capture = self.phrase_limit.min(timeout);
        let attempt = async {
            let audio = self.microphone.record(capture).await?;
            let text = self.stt.transcribe(&audio, self.language).await?;
            Ok::<_, VoiceError>(text)
        };

        let text = tokio::time::timeout(timeout + self.phrase_limit + RECORD_GRACE, attempt)
            .await
            .map_err(|_| RecognitionError::Timeout(timeout.as_secs()))??;

        if text.is_empty() {
            return Err(RecognitionError::NoSpeech);
        }
        Ok(text)
    }
}
