use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("TTS error: {0}")]
    Tts(String),

    #[error("Playback error: {0}")]
    Playback(String),

    #[error("STT error: {0}")]
    Stt(String),

    #[error("Recording error: {0}")]
    Recording(String),
}

/// Outcome of a failed listen attempt.
///
/// None of these are fatal to the recognition loop.
#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("listen timed out after {0} seconds")]
    Timeout(u64),

    #[error("no speech recognised")]
    NoSpeech,

    #[error("recognizer unavailable: {0}")]
    Unavailable(#[from] VoiceError),
}
