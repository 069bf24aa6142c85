//! Speech input and output for the robot bridge.
//!
//! Both directions are thin wrappers over local command-line tools:
//! announcements are rendered by an espeak-ng compatible synthesizer and
//! played with an aplay compatible player ([`TtsService`]); spoken commands
//! are captured with an arecord compatible recorder ([`Microphone`]) and
//! transcribed by whisper.cpp ([`SttService`]).
//!
//! The [`Speaker`] and [`Recognizer`] traits are the seams the rest of the
//! workspace depends on, so tests and hosts without audio hardware can swap
//! in [`SilentSpeaker`] or their own fakes.

pub mod config;
pub mod error;
pub mod recognizer;
pub mod stt;
pub mod tts;

pub use config::VoiceConfig;
pub use error::{RecognitionError, VoiceError};
pub use recognizer::{Microphone, Recognizer, SpeechRecognizer};
pub use stt::SttService;
pub use tts::{SilentSpeaker, Speaker, TtsService};
