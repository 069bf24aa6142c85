use robot_types::Language;
use serde::Deserialize;

fn default_listen_timeout_secs() -> u64 {
    5
}

fn default_phrase_limit_secs() -> u64 {
    5
}

fn default_synth_binary() -> String {
    "espeak-ng".to_string()
}

fn default_player_binary() -> String {
    "aplay".to_string()
}

fn default_recorder_binary() -> String {
    "arecord".to_string()
}

fn default_stt_binary() -> String {
    "whisper-cli".to_string()
}

fn default_stt_model() -> String {
    "models/ggml-base.bin".to_string()
}

fn default_true() -> bool {
    true
}

/// Speech settings: language, external binaries, and listen bounds.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    /// Language for announcements and recognition.
    #[serde(default)]
    pub language: Language,

    /// Whether announcements are spoken at all. When off, a silent speaker is used.
    #[serde(default = "default_true")]
    pub speech_enabled: bool,

    /// Whether the voice-recognition loop is started.
    #[serde(default = "default_true")]
    pub recognition_enabled: bool,

    /// Upper bound, in seconds, on a single listen attempt waiting for a phrase.
    #[serde(default = "default_listen_timeout_secs")]
    pub listen_timeout_secs: u64,

    /// Length, in seconds, of audio captured per phrase.
    #[serde(default = "default_phrase_limit_secs")]
    pub phrase_limit_secs: u64,

    /// Synthesizer writing WAV to stdout (espeak-ng compatible flags).
    #[serde(default = "default_synth_binary")]
    pub synth_binary: String,

    /// Player reading WAV from stdin (aplay compatible flags).
    #[serde(default = "default_player_binary")]
    pub player_binary: String,

    /// Recorder writing WAV to stdout (arecord compatible flags).
    #[serde(default = "default_recorder_binary")]
    pub recorder_binary: String,

    /// whisper.cpp command-line binary.
    #[serde(default = "default_stt_binary")]
    pub stt_binary: String,

    /// GGML model passed to the STT binary.
    #[serde(default = "default_stt_model")]
    pub stt_model: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            speech_enabled: true,
            recognition_enabled: true,
            listen_timeout_secs: default_listen_timeout_secs(),
            phrase_limit_secs: default_phrase_limit_secs(),
            synth_binary: default_synth_binary(),
            player_binary: default_player_binary(),
            recorder_binary: default_recorder_binary(),
            stt_binary: default_stt_binary(),
            stt_model: default_stt_model(),
        }
    }
}
