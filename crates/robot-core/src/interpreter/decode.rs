//! Decoding of structured payloads (bus messages and HTTP control bodies).

use crate::lexicon::Lexicon;
use robot_types::Command;

/// Normalizes a raw bus payload: lossy UTF-8, trimmed, lower-cased.
pub fn normalize_payload(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).trim().to_lowercase()
}

/// Classifies a normalized bus payload by prefix.
///
/// | Payload | Command |
/// |---------|---------|
/// | `color=<name>` | `SetColor(name)` |
/// | `gpio=<component>:<on\|off>` | `SetComponent` |
/// | `speak=<text>` | `SpeakOnly(text)` |
/// | anything else | `SpeakOnly("Message received: <payload>")` |
///
/// A `gpio=` body that does not split into exactly two `:` separated parts
/// is [`Command::Malformed`].
pub fn decode_mqtt(payload: &str, lexicon: &Lexicon) -> Command {
    if let Some(rest) = payload.strip_prefix("color=") {
        let name = rest.split('=').next().unwrap_or_default();
        return Command::SetColor(name.to_string());
    }

    if let Some(rest) = payload.strip_prefix("gpio=") {
        let body = rest.split('=').next().unwrap_or_default();
        let parts: Vec<&str> = body.split(':').collect();
        return match parts.as_slice() {
            [component, state] => Command::SetComponent {
                component: component.to_string(),
                on: *state == "on",
            },
            _ => Command::Malformed(payload.to_string()),
        };
    }

    if let Some(text) = payload.strip_prefix("speak=") {
        return Command::SpeakOnly(text.to_string());
    }

    Command::SpeakOnly(lexicon.message_received(payload))
}

/// Decodes the `{component, action}` pair posted to the control endpoint.
///
/// `all` + `off` is the reset sentinel; any other action than `on` means off.
pub fn decode_http(component: &str, action: &str) -> Command {
    if component == "all" && action == "off" {
        return Command::AllOff;
    }
    Command::SetComponent {
        component: component.to_string(),
        on: action == "on",
    }
}
