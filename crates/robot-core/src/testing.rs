//! Recording fakes for the output sink's collaborators and the recognizer.

use async_trait::async_trait;
use robot_gpio::{GpioError, PinDriver};
use robot_types::{Component, Language};
use robot_voice::{RecognitionError, Recognizer, Speaker, VoiceError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Speaker that records every announcement.
#[derive(Debug, Default)]
pub struct RecordingSpeaker {
    spoken: Mutex<Vec<(String, Language)>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingSpeaker {
    /// Speaker that takes `delay` to "play" each announcement.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    pub fn languages(&self) -> Vec<Language> {
        self.spoken.lock().unwrap().iter().map(|(_, l)| *l).collect()
    }

    /// Highest number of announcements that were ever playing at once.
    pub fn max_concurrent(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Speaker for RecordingSpeaker {
    async fn speak(&self, text: &str, language: Language) -> Result<(), VoiceError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), language));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Pin driver that records every successful write.
#[derive(Debug, Default)]
pub struct RecordingPins {
    writes: Mutex<Vec<(Component, bool)>>,
    released: AtomicBool,
}

impl RecordingPins {
    pub fn writes(&self) -> Vec<(Component, bool)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

impl PinDriver for RecordingPins {
    fn set_pin(&self, component: Component, on: bool) -> Result<(), GpioError> {
        if self.is_released() {
            return Err(GpioError::Released);
        }
        self.writes.lock().unwrap().push((component, on));
        Ok(())
    }

    fn release(&self) -> Result<(), GpioError> {
        self.released.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_hardware(&self) -> bool {
        false
    }
}

/// Recognizer that replays a fixed script of results, then reports silence.
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    script: Mutex<VecDeque<Result<String, RecognitionError>>>,
    listens: AtomicUsize,
}

impl ScriptedRecognizer {
    pub fn new(script: impl IntoIterator<Item = Result<String, RecognitionError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            listens: AtomicUsize::new(0),
        }
    }

    /// Number of completed `listen` calls.
    pub fn listens(&self) -> usize {
        self.listens.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Recognizer for ScriptedRecognizer {
    async fn listen(&self, _timeout: Duration) -> Result<String, RecognitionError> {
        let next = self.script.lock().unwrap().pop_front();
        let result = match next {
            Some(result) => result,
            None => {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Err(RecognitionError::NoSpeech)
            }
        };
        self.listens.fetch_add(1, Ordering::SeqCst);
        result
    }
}
