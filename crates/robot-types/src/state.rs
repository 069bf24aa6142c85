//! Component on/off flags and the state snapshot returned to callers.

use crate::{Component, IndicatorColor};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// On/off flag for every [`Component`].
///
/// Backed by a fixed array indexed by component, so the set of keys can
/// never grow or shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComponentStatus([bool; Component::COUNT]);

impl ComponentStatus {
    /// Returns whether `component` is on.
    pub fn get(&self, component: Component) -> bool {
        self.0[component.index()]
    }

    /// Sets a single component's flag.
    pub fn set(&mut self, component: Component, on: bool) {
        self.0[component.index()] = on;
    }

    /// Turns every component off.
    pub fn clear(&mut self) {
        self.0 = [false; Component::COUNT];
    }

    /// Components that are currently on, in display order.
    pub fn active(&self) -> impl Iterator<Item = Component> + '_ {
        Component::ALL.into_iter().filter(|c| self.get(*c))
    }

    /// Iterates `(component, on)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Component, bool)> + '_ {
        Component::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl Serialize for ComponentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Component::COUNT))?;
        for (component, on) in self.iter() {
            map.serialize_entry(component.as_str(), &on)?;
        }
        map.end()
    }
}

/// Immutable read of the robot state at one instant.
///
/// Field names on the wire match what the dashboard script expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Indicator color, serialized as a hex code.
    pub color: IndicatorColor,
    /// Summary of the most recently processed event.
    pub message: String,
    /// Per-component on/off flags.
    pub gpio: ComponentStatus,
    /// Whether the voice-recognition loop is listening.
    pub voice_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_always_lists_every_component() {
        let mut status = ComponentStatus::default();
        status.set(Component::Motor1, true);

        let json = serde_json::to_value(status).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), Component::COUNT);
        assert_eq!(map["motor1"], true);
        assert_eq!(map["led_red"], false);
    }

    #[test]
    fn serialized_keys_follow_display_order() {
        let json = serde_json::to_string(&ComponentStatus::default()).unwrap();
        assert_eq!(
            json,
            r#"{"led_red":false,"led_green":false,"led_blue":false,"motor1":false,"motor2":false,"servo":false}"#
        );
    }

    #[test]
    fn active_and_clear() {
        let mut status = ComponentStatus::default();
        status.set(Component::Servo, true);
        status.set(Component::LedRed, true);
        assert_eq!(
            status.active().collect::<Vec<_>>(),
            vec![Component::LedRed, Component::Servo]
        );

        status.clear();
        assert_eq!(status.active().count(), 0);
    }

    #[test]
    fn snapshot_wire_shape() {
        let snapshot = Snapshot {
            color: IndicatorColor::Red,
            message: "MQTT: color=red".to_string(),
            gpio: ComponentStatus::default(),
            voice_active: true,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["color"], "#ff0000");
        assert_eq!(json["message"], "MQTT: color=red");
        assert_eq!(json["voice_active"], true);
        assert!(json["gpio"].is_object());
    }
}
