//! Shared types for the robot bridge.
//!
//! This crate holds the vocabulary every other crate speaks: the fixed set
//! of controllable [`Component`]s, the indicator palette, the state
//! [`Snapshot`] returned to HTTP callers, and the [`Command`] values that
//! input adapters hand to the interpreter.
//!
//! Nothing here performs I/O.

pub mod color;
pub mod command;
pub mod language;
pub mod state;

pub use color::IndicatorColor;
pub use command::{Command, Origin};
pub use language::Language;
pub use state::{ComponentStatus, Snapshot};

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One addressable unit on the robot.
///
/// The set is fixed at compile time; [`ComponentStatus`] relies on
/// [`Component::ALL`] for its layout and display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Red channel of the indicator LED.
    LedRed,
    /// Green channel of the indicator LED.
    LedGreen,
    /// Blue channel of the indicator LED.
    LedBlue,
    /// First drive motor.
    Motor1,
    /// Second drive motor.
    Motor2,
    /// Servo output.
    Servo,
}

impl Component {
    /// Number of components.
    pub const COUNT: usize = 6;

    /// Every component, in display order.
    pub const ALL: [Component; Component::COUNT] = [
        Component::LedRed,
        Component::LedGreen,
        Component::LedBlue,
        Component::Motor1,
        Component::Motor2,
        Component::Servo,
    ];

    /// Returns the wire name used in MQTT payloads, HTTP bodies and JSON snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LedRed => "led_red",
            Self::LedGreen => "led_green",
            Self::LedBlue => "led_blue",
            Self::Motor1 => "motor1",
            Self::Motor2 => "motor2",
            Self::Servo => "servo",
        }
    }

    /// Name as it should be spoken aloud ("led_red" becomes "led red").
    pub fn spoken_name(self) -> String {
        self.as_str().replace('_', " ")
    }

    /// The indicator color an LED component lights up, or `None` for
    /// components that do not drive the indicator.
    pub fn indicator(self) -> Option<IndicatorColor> {
        match self {
            Self::LedRed => Some(IndicatorColor::Red),
            Self::LedGreen => Some(IndicatorColor::Green),
            Self::LedBlue => Some(IndicatorColor::Blue),
            Self::Motor1 | Self::Motor2 | Self::Servo => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Returned when a component name is not one of [`Component::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component: {0}")]
pub struct UnknownComponent(pub String);

impl FromStr for Component {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownComponent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_names_round_trip() {
        for component in Component::ALL {
            assert_eq!(component.as_str().parse::<Component>(), Ok(component));
        }
    }

    #[test]
    fn unknown_component_is_rejected() {
        assert_eq!(
            "laser".parse::<Component>(),
            Err(UnknownComponent("laser".to_string()))
        );
        // Names are matched exactly; adapters lower-case before parsing.
        assert!("LED_RED".parse::<Component>().is_err());
    }

    #[test]
    fn spoken_name_replaces_underscores() {
        assert_eq!(Component::LedGreen.spoken_name(), "led green");
        assert_eq!(Component::Motor2.spoken_name(), "motor2");
    }

    #[test]
    fn only_leds_drive_the_indicator() {
        assert_eq!(Component::LedRed.indicator(), Some(IndicatorColor::Red));
        assert_eq!(Component::LedBlue.indicator(), Some(IndicatorColor::Blue));
        assert_eq!(Component::Servo.indicator(), None);
    }
}
