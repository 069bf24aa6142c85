use crate::{GpioError, PinDriver};
use robot_types::Component;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};

/// BCM pin number for each component.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PinMap {
    pub led_red: u8,
    pub led_green: u8,
    pub led_blue: u8,
    pub motor1: u8,
    pub motor2: u8,
    pub servo: u8,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            led_red: 17,
            led_green: 27,
            led_blue: 22,
            motor1: 23,
            motor2: 24,
            servo: 18,
        }
    }
}

impl PinMap {
    /// Returns the BCM pin wired to `component`.
    pub fn pin(&self, component: Component) -> u8 {
        match component {
            Component::LedRed => self.led_red,
            Component::LedGreen => self.led_green,
            Component::LedBlue => self.led_blue,
            Component::Motor1 => self.motor1,
            Component::Motor2 => self.motor2,
            Component::Servo => self.servo,
        }
    }
}

/// Driver used when no GPIO hardware is present. Writes are logged only.
#[derive(Debug, Default)]
pub struct NoopPins {
    released: AtomicBool,
}

impl NoopPins {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PinDriver for NoopPins {
    fn set_pin(&self, component: Component, on: bool) -> Result<(), GpioError> {
        if self.released.load(Ordering::Relaxed) {
            return Err(GpioError::Released);
        }
        tracing::debug!(%component, on, "simulated pin write");
        Ok(())
    }

    fn release(&self) -> Result<(), GpioError> {
        self.released.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn is_hardware(&self) -> bool {
        false
    }
}

#[cfg(feature = "rpi")]
mod hardware {
    use super::PinMap;
    use crate::{GpioError, PinDriver};
    use robot_types::Component;
    use rppal::gpio::{Gpio, OutputPin};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Raspberry Pi output pins, one per component, all starting low.
    #[derive(Debug)]
    pub struct GpioPins {
        pins: Mutex<HashMap<Component, OutputPin>>,
    }

    impl GpioPins {
        pub fn new(map: &PinMap) -> Result<Self, GpioError> {
            let gpio = Gpio::new()?;
            let mut pins = HashMap::with_capacity(Component::COUNT);
            for component in Component::ALL {
                let bcm = map.pin(component);
                let mut pin = gpio.get(bcm)?.into_output_low();
                pin.set_reset_on_drop(true);
                tracing::debug!(%component, bcm, "claimed output pin");
                pins.insert(component, pin);
            }
            Ok(Self {
                pins: Mutex::new(pins),
            })
        }
    }

    impl PinDriver for GpioPins {
        fn set_pin(&self, component: Component, on: bool) -> Result<(), GpioError> {
            let mut pins = self.pins.lock().map_err(|_| GpioError::Poisoned)?;
            let pin = pins.get_mut(&component).ok_or(GpioError::Released)?;
            if on {
                pin.set_high();
            } else {
                pin.set_low();
            }
            Ok(())
        }

        fn release(&self) -> Result<(), GpioError> {
            let mut pins = self.pins.lock().map_err(|_| GpioError::Poisoned)?;
            for pin in pins.values_mut() {
                pin.set_low();
            }
            // Dropping the pins resets them to inputs.
            pins.clear();
            tracing::info!("released gpio pins");
            Ok(())
        }

        fn is_hardware(&self) -> bool {
            true
        }
    }
}

#[cfg(feature = "rpi")]
pub use hardware::GpioPins;

/// Placeholder when the crate is built without the `rpi` feature; it can
/// never be constructed.
#[cfg(not(feature = "rpi"))]
#[derive(Debug)]
pub struct GpioPins {
    _private: (),
}

#[cfg(not(feature = "rpi"))]
impl GpioPins {
    pub fn new(_map: &PinMap) -> Result<Self, GpioError> {
        Err(GpioError::Unsupported)
    }
}

#[cfg(not(feature = "rpi"))]
impl PinDriver for GpioPins {
    fn set_pin(&self, _component: Component, _on: bool) -> Result<(), GpioError> {
        Err(GpioError::Unsupported)
    }

    fn release(&self) -> Result<(), GpioError> {
        Ok(())
    }

    fn is_hardware(&self) -> bool {
        false
    }
}
