use crate::error::VoiceError;
use robot_types::Language;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Maximum audio input size for STT (10 MiB). A phrase is a few seconds of 16 kHz mono.
const MAX_STT_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Timeout for STT process execution.
const STT_TIMEOUT: Duration = Duration::from_secs(60);

/// Markers whisper.cpp prints instead of text when it hears nothing.
const SILENCE_MARKERS: [&str; 3] = ["[BLANK_AUDIO]", "[SILENCE]", "(silence)"];

#[derive(Debug, Clone)]
pub struct SttService {
    model_path: PathBuf,
    binary_path: PathBuf,
}

impl SttService {
    pub fn new(model_path: impl Into<PathBuf>, binary_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            binary_path: binary_path.into(),
        }
    }

    /// Transcribes a WAV recording. Returns an empty string for silence.
    pub async fn transcribe(&self, audio_data: &[u8], language: Language) -> Result<String, VoiceError> {
        if audio_data.len() > MAX_STT_INPUT_BYTES {
            return Err(VoiceError::Stt(format!(
                "audio data exceeds maximum size: {} bytes (limit: {} bytes)",
                audio_data.len(),
                MAX_STT_INPUT_BYTES
            )));
        }

        // whisper.cpp: -m <model> -l <lang> -nt (no timestamps) -f - (stdin)
        let mut command = Command::new(&self.binary_path);
        command
            .arg("-m")
            .arg(&self.model_path)
            .arg("-l")
            .arg(language.code())
            .arg("-nt")
            .arg("-f")
            .arg("-")
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        let mut child = command
            .spawn()
            .map_err(|e| VoiceError::Stt(format!("Failed to spawn STT binary: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| VoiceError::Stt("Failed to open stdin".to_string()))?;

        stdin
            .write_all(audio_data)
            .await
            .map_err(|e| VoiceError::Stt(format!("Failed to write to stdin: {}", e)))?;
        drop(stdin);

        let output = tokio::time::timeout(STT_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                VoiceError::Stt(format!(
                    "STT process timed out after {} seconds",
                    STT_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| VoiceError::Stt(format!("Failed to read stdout: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Stt(format!("STT binary failed: {}", stderr)));
        }

        Ok(clean_transcript(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Joins output lines and drops silence markers.
fn clean_transcript(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !SILENCE_MARKERS.contains(line))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_cleanup() {
        assert_eq!(clean_transcript("  activar led rojo \n"), "activar led rojo");
        assert_eq!(clean_transcript("[BLANK_AUDIO]\n"), "");
        assert_eq!(clean_transcript("motor uno\nencender\n"), "motor uno encender");
    }
}
