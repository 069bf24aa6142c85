//! Output sink: speech and pin writes.
//!
//! Speech is slow (synthesis plus playback) and must never overlap, so
//! announcements go through a bounded queue drained by a single worker task.
//! Pin writes are quick and synchronous and happen inline.

use robot_gpio::PinDriver;
use robot_types::{Component, Language};
use robot_voice::Speaker;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Maximum number of announcements waiting to be spoken. Further requests
/// are dropped with a warning until the queue drains.
const SPEECH_QUEUE_CAPACITY: usize = 32;

enum SpeechJob {
    Say(String),
    Flush(oneshot::Sender<()>),
}

/// Handle to the speaker queue and the pin driver.
#[derive(Clone)]
pub struct OutputSink {
    speech_tx: mpsc::Sender<SpeechJob>,
    pins: Arc<dyn PinDriver>,
}

impl OutputSink {
    /// Spawns the speech worker and returns the sink together with the
    /// worker's handle. The worker exits once every sink clone is dropped.
    pub fn start(
        speaker: Arc<dyn Speaker>,
        pins: Arc<dyn PinDriver>,
        language: Language,
    ) -> (Self, JoinHandle<()>) {
        let (speech_tx, speech_rx) = mpsc::channel(SPEECH_QUEUE_CAPACITY);
        let worker = tokio::spawn(run_speech_worker(speaker, language, speech_rx));
        (Self { speech_tx, pins }, worker)
    }

    /// Queues `text` for speaking and returns immediately.
    pub fn speak(&self, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            tracing::debug!("ignoring empty announcement");
            return;
        }
        match self.speech_tx.try_send(SpeechJob::Say(text)) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(SpeechJob::Say(text))) => {
                tracing::warn!(text = %text, "speech queue full, dropping announcement");
            }
            Err(e) => {
                tracing::warn!("speech worker unavailable: {}", e);
            }
        }
    }

    /// Waits until every announcement queued before this call has been spoken.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.speech_tx.send(SpeechJob::Flush(done_tx)).await.is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    /// Drives the pin for `component`. Failures are logged, never returned.
    pub fn set_pin(&self, component: Component, on: bool) {
        if let Err(e) = self.pins.set_pin(component, on) {
            tracing::warn!(%component, on, "failed to set pin: {}", e);
        }
    }

    /// Drives all pins low and releases them.
    pub fn release_pins(&self) {
        if let Err(e) = self.pins.release() {
            tracing::warn!("failed to release pins: {}", e);
        }
    }

    /// Whether pin writes reach real hardware.
    pub fn has_hardware(&self) -> bool {
        self.pins.is_hardware()
    }
}

async fn run_speech_worker(
    speaker: Arc<dyn Speaker>,
    language: Language,
    mut rx: mpsc::Receiver<SpeechJob>,
) {
    while let Some(job) = rx.recv().await {
        match job {
            SpeechJob::Say(text) => {
                tracing::debug!(%language, text = %text, "speaking");
                if let Err(e) = speaker.speak(&text, language).await {
                    tracing::warn!(text = %text, "speech failed: {}", e);
                }
            }
            SpeechJob::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!("speech worker stopped");
}
