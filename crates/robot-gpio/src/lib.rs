//! Pin control for the robot's LEDs, motors and servo.
//!
//! Hardware is optional. Callers pick a [`PinDriver`] once at startup:
//! [`GpioPins`] when the `rpi` feature is enabled and the GPIO peripheral
//! can be opened, [`NoopPins`] everywhere else. Command handling never
//! checks which one it got.

mod error;
mod pins;

pub use error::GpioError;
pub use pins::{GpioPins, NoopPins, PinMap};

use robot_types::Component;

/// Drives one output pin per [`Component`].
pub trait PinDriver: Send + Sync {
    /// Drives the pin for `component` high (`on`) or low.
    fn set_pin(&self, component: Component, on: bool) -> Result<(), GpioError>;

    /// Drives every pin low and gives the pins back to the OS.
    ///
    /// Subsequent [`PinDriver::set_pin`] calls fail with [`GpioError::Released`].
    fn release(&self) -> Result<(), GpioError>;

    /// Whether writes reach physical hardware.
    fn is_hardware(&self) -> bool;
}

/// Opens the hardware driver when requested and available, otherwise
/// falls back to [`NoopPins`].
pub fn select_driver(enabled: bool, map: &PinMap) -> Box<dyn PinDriver> {
    if !enabled {
        tracing::info!("gpio disabled by configuration, running in simulation mode");
        return Box::new(NoopPins::new());
    }

    match GpioPins::new(map) {
        Ok(pins) => {
            tracing::info!("gpio initialised");
            Box::new(pins)
        }
        Err(e) => {
            tracing::warn!("gpio not available, running in simulation mode: {}", e);
            Box::new(NoopPins::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_gpio_selects_noop_driver() {
        let driver = select_driver(false, &PinMap::default());
        assert!(!driver.is_hardware());
        assert!(driver.set_pin(Component::Motor1, true).is_ok());
    }

    #[cfg(not(feature = "rpi"))]
    #[test]
    fn missing_hardware_support_falls_back_to_noop() {
        let driver = select_driver(true, &PinMap::default());
        assert!(!driver.is_hardware());
    }
}
