//! Command interpreter.
//!
//! Decoders turn transport payloads into [`Command`]s; [`interpret`] applies a
//! command to the state and reports the side effects the output sink must
//! perform. `interpret` touches nothing but the state it is handed, so it can
//! run under the store lock and be tested without any I/O.

mod decode;
mod rules;

pub use decode::{decode_http, decode_mqtt, normalize_payload};
pub use rules::decode_voice;

use crate::lexicon::Lexicon;
use crate::store::RobotState;
use robot_types::{Command, Component, IndicatorColor, Origin};

/// Side effects produced by one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    /// Pin writes, in order.
    pub pins: Vec<(Component, bool)>,
    /// At most one announcement.
    pub speech: Option<String>,
}

/// Applies `command` to `state`.
///
/// The last message is always overwritten with `"<origin tag>: <summary>"`,
/// whatever the outcome. Unknown component names are dropped silently.
pub fn interpret(
    state: &mut RobotState,
    origin: Origin,
    summary: &str,
    command: &Command,
    lexicon: &Lexicon,
) -> Effects {
    state.set_message(format!("{}: {}", origin.tag(), summary));

    let mut effects = Effects::default();
    match command {
        Command::SetColor(name) => {
            state.set_color(IndicatorColor::from_name(name));
            effects.speech = Some(lexicon.color_activated(name));
        }
        Command::SetComponent { component, on } => {
            let Ok(component) = component.parse::<Component>() else {
                tracing::debug!(%origin, component = %component, "ignoring unknown component");
                return effects;
            };
            state.set_component(component, *on);
            effects.pins.push((component, *on));

            if origin.links_indicator() {
                if let Some(color) = component.indicator() {
                    state.set_color(if *on { color } else { IndicatorColor::Idle });
                }
            }
            if origin.announces_components() {
                effects.speech = Some(lexicon.component_switched(component, *on));
            }
        }
        Command::SpeakOnly(text) => {
            effects.speech = Some(text.clone());
        }
        Command::AllOff => {
            state.reset_all();
            effects
                .pins
                .extend(Component::ALL.into_iter().map(|c| (c, false)));
            if origin.announces_components() {
                effects.speech = Some(lexicon.all_off().to_string());
            }
        }
        Command::Status => {
            let active: Vec<Component> = state.components().active().collect();
            effects.speech = Some(lexicon.status(&active));
        }
        Command::Malformed(payload) => {
            tracing::debug!(%origin, payload = %payload, "ignoring malformed payload");
        }
        Command::Unrecognized(text) => {
            tracing::info!(%origin, text = %text, "unrecognized command");
            effects.speech = Some(lexicon.unrecognized().to_string());
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RobotStore;
    use robot_types::{Language, Snapshot};

    fn run(store: &RobotStore, origin: Origin, summary: &str, command: Command) -> (Effects, Snapshot) {
        let lexicon = Lexicon::new(Language::Spanish);
        store.update(|state| interpret(state, origin, summary, &command, &lexicon))
    }

    #[test]
    fn structured_color_red() {
        let store = RobotStore::new("init");
        let (effects, snapshot) = run(&store, Origin::Mqtt, "color=red", Command::SetColor("red".into()));
        assert_eq!(snapshot.color.hex(), "#ff0000");
        assert_eq!(snapshot.message, "MQTT: color=red");
        assert_eq!(effects.speech.as_deref(), Some("Color red activado"));
        assert!(effects.pins.is_empty());
    }

    #[test]
    fn structured_color_outside_palette() {
        let store = RobotStore::new("init");
        let (_, snapshot) = run(&store, Origin::Mqtt, "color=purple", Command::SetColor("purple".into()));
        assert_eq!(snapshot.color, IndicatorColor::Unknown);
        assert_eq!(snapshot.color.hex(), "#ffffff");
    }

    #[test]
    fn gpio_on_via_bus_does_not_touch_indicator() {
        let store = RobotStore::new("init");
        let (effects, snapshot) = run(
            &store,
            Origin::Mqtt,
            "gpio=led_red:on",
            Command::SetComponent {
                component: "led_red".into(),
                on: true,
            },
        );
        assert!(snapshot.gpio.get(Component::LedRed));
        assert_eq!(snapshot.color, IndicatorColor::Idle);
        assert_eq!(effects.pins, vec![(Component::LedRed, true)]);
        assert_eq!(effects.speech.as_deref(), Some("led red encendido"));
    }

    #[test]
    fn http_switch_is_silent_and_links_indicator() {
        let store = RobotStore::new("init");
        let (effects, snapshot) = run(
            &store,
            Origin::Http,
            "led_green on",
            Command::SetComponent {
                component: "led_green".into(),
                on: true,
            },
        );
        assert!(snapshot.gpio.get(Component::LedGreen));
        assert_eq!(snapshot.color, IndicatorColor::Green);
        assert_eq!(effects.speech, None);

        let (_, snapshot) = run(
            &store,
            Origin::Http,
            "led_green off",
            Command::SetComponent {
                component: "led_green".into(),
                on: false,
            },
        );
        assert_eq!(snapshot.color, IndicatorColor::Idle);
    }

    #[test]
    fn unknown_component_only_changes_last_message() {
        let store = RobotStore::new("init");
        let before = store.snapshot();
        let (effects, after) = run(
            &store,
            Origin::Http,
            "laser on",
            Command::SetComponent {
                component: "laser".into(),
                on: true,
            },
        );
        assert_eq!(effects, Effects::default());
        assert_eq!(after.gpio, before.gpio);
        assert_eq!(after.color, before.color);
        assert_eq!(after.voice_active, before.voice_active);
        assert_eq!(after.message, "HTTP: laser on");
    }

    #[test]
    fn all_off_resets_regardless_of_prior_state() {
        let store = RobotStore::new("init");
        store.update(|s| {
            for c in Component::ALL {
                s.set_component(c, true);
            }
            s.set_color(IndicatorColor::Yellow);
        });

        let (effects, snapshot) = run(&store, Origin::Voice, "apagar todo", Command::AllOff);
        assert_eq!(snapshot.gpio.active().count(), 0);
        assert_eq!(snapshot.color, IndicatorColor::Idle);
        assert_eq!(effects.pins.len(), Component::COUNT);
        assert!(effects.pins.iter().all(|(_, on)| !on));
        assert_eq!(effects.speech.as_deref(), Some("Todos los componentes apagados"));

        let (effects, _) = run(&store, Origin::Http, "all off", Command::AllOff);
        assert_eq!(effects.speech, None);
    }

    #[test]
    fn status_lists_active_components() {
        let store = RobotStore::new("init");
        let (effects, _) = run(&store, Origin::Voice, "estado", Command::Status);
        assert_eq!(
            effects.speech.as_deref(),
            Some("Todos los componentes están apagados")
        );

        store.update(|s| s.set_component(Component::Motor1, true));
        let (effects, snapshot) = run(&store, Origin::Voice, "estado", Command::Status);
        assert_eq!(effects.speech.as_deref(), Some("Activos: motor1"));
        assert!(snapshot.gpio.get(Component::Motor1));
    }

    #[test]
    fn unrecognized_speaks_once_and_changes_only_message() {
        let store = RobotStore::new("init");
        let before = store.snapshot();
        let (effects, after) = run(
            &store,
            Origin::Voice,
            "hola",
            Command::Unrecognized("hola".into()),
        );
        assert_eq!(effects.speech.as_deref(), Some("Comando no reconocido"));
        assert!(effects.pins.is_empty());
        assert_eq!(after.gpio, before.gpio);
        assert_eq!(after.color, before.color);
        assert_eq!(after.message, "Voice: hola");
    }

    #[test]
    fn malformed_records_message_only() {
        let store = RobotStore::new("init");
        let (effects, snapshot) = run(
            &store,
            Origin::Mqtt,
            "gpio=servo",
            Command::Malformed("gpio=servo".into()),
        );
        assert_eq!(effects, Effects::default());
        assert_eq!(snapshot.message, "MQTT: gpio=servo");
    }

    #[test]
    fn voice_text_matches_structured_equivalent() {
        let lexicon = Lexicon::new(Language::Spanish);

        let spoken = RobotStore::new("init");
        let command = decode_voice("activar led rojo", Language::Spanish);
        let (_, by_voice) = spoken.update(|s| interpret(s, Origin::Voice, "activar led rojo", &command, &lexicon));

        let posted = RobotStore::new("init");
        let command = decode_http("led_red", "on");
        let (_, by_http) = posted.update(|s| interpret(s, Origin::Http, "led_red on", &command, &lexicon));

        let bus = RobotStore::new("init");
        let command = decode_mqtt("gpio=led_red:on", &lexicon);
        let (_, by_bus) = bus.update(|s| interpret(s, Origin::Mqtt, "gpio=led_red:on", &command, &lexicon));

        assert_eq!(by_voice.gpio, by_http.gpio);
        assert_eq!(by_voice.color, by_http.color);
        assert_eq!(by_voice.gpio, by_bus.gpio);
        assert_eq!(by_voice.color.hex(), "#ff0000");
    }
}
