use crate::interpreter::{self, interpret};
use crate::lexicon::Lexicon;
use crate::sink::OutputSink;
use crate::store::RobotStore;
use robot_types::{Command, Origin, Snapshot};

/// Entry point shared by every input adapter.
///
/// Applies a command to the store and hands its side effects to the output
/// sink while the store lock is held, so pin writes and queued announcements
/// follow the same order as the state changes that caused them.
#[derive(Clone)]
pub struct Dispatcher {
    store: RobotStore,
    sink: OutputSink,
    lexicon: Lexicon,
}

impl Dispatcher {
    pub fn new(store: RobotStore, sink: OutputSink, lexicon: Lexicon) -> Self {
        Self {
            store,
            sink,
            lexicon,
        }
    }

    pub fn store(&self) -> &RobotStore {
        &self.store
    }

    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Applies `command` and returns the snapshot taken right after it.
    pub fn dispatch(&self, origin: Origin, summary: &str, command: Command) -> Snapshot {
        let (_, snapshot) = self.store.update(|state| {
            let effects = interpret(state, origin, summary, &command, &self.lexicon);
            for (component, on) in effects.pins {
                self.sink.set_pin(component, on);
            }
            if let Some(text) = effects.speech {
                self.sink.speak(text);
            }
        });
        tracing::debug!(%origin, summary, "dispatched command");
        snapshot
    }

    /// Decodes and dispatches a raw bus payload.
    pub fn dispatch_mqtt(&self, raw: &[u8]) -> Snapshot {
        let payload = interpreter::normalize_payload(raw);
        let command = interpreter::decode_mqtt(&payload, &self.lexicon);
        self.dispatch(Origin::Mqtt, &payload, command)
    }

    /// Decodes and dispatches a control request.
    pub fn dispatch_http(&self, component: &str, action: &str) -> Snapshot {
        let command = interpreter::decode_http(component, action);
        self.dispatch(Origin::Http, &format!("{} {}", component, action), command)
    }

    /// Matches recognized speech against the voice rules and dispatches it.
    pub fn dispatch_voice(&self, text: &str) -> Snapshot {
        let text = text.trim().to_lowercase();
        let command = interpreter::decode_voice(&text, self.lexicon.language());
        self.dispatch(Origin::Voice, &text, command)
    }

    /// Flips voice mode, announces the new mode, and returns it.
    pub fn toggle_voice_mode(&self) -> bool {
        let (active, _) = self.store.update(|state| {
            let active = state.toggle_voice_mode();
            self.sink.speak(self.lexicon.voice_mode(active));
            active
        });
        tracing::info!(active, "voice mode toggled");
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingPins, RecordingSpeaker};
    use robot_types::{Component, IndicatorColor, Language};
    use std::sync::Arc;

    fn setup(language: Language) -> (Dispatcher, Arc<RecordingSpeaker>, Arc<RecordingPins>) {
        let speaker = Arc::new(RecordingSpeaker::default());
        let pins = Arc::new(RecordingPins::default());
        let lexicon = Lexicon::new(language);
        let (sink, _worker) = OutputSink::start(speaker.clone(), pins.clone(), language);
        let store = RobotStore::new(lexicon.waiting());
        (Dispatcher::new(store, sink, lexicon), speaker, pins)
    }

    #[tokio::test]
    async fn mqtt_gpio_drives_pin_and_announces() {
        let (dispatcher, speaker, pins) = setup(Language::Spanish);

        let snapshot = dispatcher.dispatch_mqtt(b"  GPIO=motor1:ON ");
        dispatcher.sink().flush().await;

        assert!(snapshot.gpio.get(Component::Motor1));
        assert_eq!(snapshot.message, "MQTT: gpio=motor1:on");
        assert_eq!(pins.writes(), vec![(Component::Motor1, true)]);
        assert_eq!(speaker.spoken(), vec!["motor1 encendido"]);
    }

    #[tokio::test]
    async fn http_control_is_silent() {
        let (dispatcher, speaker, pins) = setup(Language::Spanish);

        let snapshot = dispatcher.dispatch_http("led_blue", "on");
        dispatcher.sink().flush().await;

        assert!(snapshot.gpio.get(Component::LedBlue));
        assert_eq!(snapshot.color, IndicatorColor::Blue);
        assert_eq!(snapshot.message, "HTTP: led_blue on");
        assert_eq!(pins.writes(), vec![(Component::LedBlue, true)]);
        assert!(speaker.spoken().is_empty());
    }

    #[tokio::test]
    async fn voice_red_led() {
        let (dispatcher, speaker, _pins) = setup(Language::Spanish);

        let snapshot = dispatcher.dispatch_voice("Activar LED rojo");
        dispatcher.sink().flush().await;

        assert!(snapshot.gpio.get(Component::LedRed));
        assert_eq!(snapshot.color.hex(), "#ff0000");
        assert_eq!(snapshot.message, "Voice: activar led rojo");
        assert_eq!(speaker.spoken(), vec!["led red encendido"]);
    }

    #[tokio::test]
    async fn unrecognized_voice_speaks_exactly_once() {
        let (dispatcher, speaker, pins) = setup(Language::Spanish);
        let before = dispatcher.store().snapshot();

        let after = dispatcher.dispatch_voice("cuéntame un chiste");
        dispatcher.sink().flush().await;

        assert_eq!(after.gpio, before.gpio);
        assert_eq!(after.color, before.color);
        assert_ne!(after.message, before.message);
        assert_eq!(speaker.spoken(), vec!["Comando no reconocido"]);
        assert!(pins.writes().is_empty());
    }

    #[tokio::test]
    async fn toggling_voice_twice_restores_and_announces_both_ways() {
        let (dispatcher, speaker, _pins) = setup(Language::English);
        let original = dispatcher.store().voice_active();

        assert_eq!(dispatcher.toggle_voice_mode(), !original);
        assert_eq!(dispatcher.toggle_voice_mode(), original);
        dispatcher.sink().flush().await;

        let spoken = speaker.spoken();
        assert_eq!(spoken, vec!["Voice control enabled", "Voice control disabled"]);
        assert_eq!(dispatcher.store().voice_active(), original);
    }

    #[tokio::test]
    async fn concurrent_dispatches_keep_state_consistent() {
        let (dispatcher, _speaker, _pins) = setup(Language::English);

        let mut tasks = Vec::new();
        for component in Component::ALL {
            let dispatcher = dispatcher.clone();
            tasks.push(tokio::spawn(async move {
                for i in 0..50 {
                    dispatcher.dispatch_http(component.as_str(), if i % 2 == 0 { "on" } else { "off" });
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        // Every writer finished on "off".
        let snapshot = dispatcher.store().snapshot();
        assert_eq!(snapshot.gpio.active().count(), 0);
    }
}
