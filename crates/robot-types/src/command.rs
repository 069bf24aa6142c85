//! Commands decoded by the input adapters, and the adapter that produced them.

use std::fmt;

/// Which input adapter produced a command.
///
/// The adapters do not behave identically for the same logical change; the
/// differences live here so the interpreter does not branch on transport
/// anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The JSON control endpoint.
    Http,
    /// The message-bus subscription.
    Mqtt,
    /// The speech-recognition loop.
    Voice,
}

impl Origin {
    /// Prefix used when recording the last message.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Mqtt => "MQTT",
            Self::Voice => "Voice",
        }
    }

    /// Whether switching a component is announced through the speaker.
    ///
    /// The HTTP control endpoint updates state silently.
    pub fn announces_components(self) -> bool {
        !matches!(self, Self::Http)
    }

    /// Whether switching an LED component also repaints the indicator.
    ///
    /// `gpio=` payloads on the bus only touch the pin and the flag.
    pub fn links_indicator(self) -> bool {
        !matches!(self, Self::Mqtt)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A decoded request to change or report robot state.
///
/// Component names are carried as raw strings; unknown names are dropped by
/// the interpreter rather than rejected at decode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Paint the indicator with a palette color by name.
    SetColor(String),
    /// Switch one component on or off.
    SetComponent { component: String, on: bool },
    /// Say something without touching state.
    SpeakOnly(String),
    /// Switch every component off and idle the indicator.
    AllOff,
    /// Announce which components are on.
    Status,
    /// A structured payload with a known prefix but an unusable body.
    Malformed(String),
    /// Free-form text that matched no rule.
    Unrecognized(String),
}
