//! Background tasks for the robot server.
//!
//! Includes:
//! - The voice-recognition loop.

use robot_core::Dispatcher;
use robot_voice::{RecognitionError, Recognizer, VoiceConfig};
use std::sync::Arc;
use tokio::time::{sleep, Duration};

/// Timing of the voice-recognition loop.
#[derive(Debug, Clone, Copy)]
pub struct VoiceLoopSettings {
    /// Upper bound on one listen attempt.
    pub listen_timeout: Duration,
    /// How often voice mode is re-checked while it is off.
    pub idle_poll: Duration,
    /// Pause after the recognizer could not be reached.
    pub error_backoff: Duration,
}

impl Default for VoiceLoopSettings {
    fn default() -> Self {
        Self {
            listen_timeout: Duration::from_secs(5),
            idle_poll: Duration::from_secs(1),
            error_backoff: Duration::from_secs(2),
        }
    }
}

impl VoiceLoopSettings {
    pub fn from_config(config: &VoiceConfig) -> Self {
        Self {
            listen_timeout: Duration::from_secs(config.listen_timeout_secs.max(1)),
            ..Self::default()
        }
    }
}

/// Runs the voice-recognition loop until the task is aborted.
///
/// While voice mode is off the loop only polls the flag. While it is on, each
/// round marks the robot as listening, waits for one phrase and dispatches
/// the transcript. Silence and timeouts just start the next round; an
/// unreachable recognizer is reported on the dashboard and retried after a
/// back-off. No error ends the loop.
pub async fn run_voice_loop(
    dispatcher: Dispatcher,
    recognizer: Arc<dyn Recognizer>,
    settings: VoiceLoopSettings,
) {
    tracing::info!(
        listen_timeout_secs = settings.listen_timeout.as_secs(),
        "starting voice recognition loop"
    );

    let lexicon = *dispatcher.lexicon();
    loop {
        if !dispatcher.store().voice_active() {
            sleep(settings.idle_poll).await;
            continue;
        }

        dispatcher.store().set_message(lexicon.listening());
        tracing::debug!("listening for a voice command");

        match recognizer.listen(settings.listen_timeout).await {
            Ok(text) => {
                tracing::info!(text = %text, "voice command recognized");
                dispatcher.dispatch_voice(&text);
            }
            Err(RecognitionError::Timeout(secs)) => {
                tracing::debug!(secs, "no phrase before timeout");
            }
            Err(RecognitionError::NoSpeech) => {
                tracing::debug!("could not understand audio");
            }
            Err(RecognitionError::Unavailable(e)) => {
                tracing::warn!("voice recognition unavailable: {}", e);
                dispatcher.store().set_message(lexicon.recognition_error());
                sleep(settings.error_backoff).await;
            }
        }
    }
}
