use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpioError {
    #[cfg(feature = "rpi")]
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("GPIO support not compiled in (enable the `rpi` feature)")]
    Unsupported,

    #[error("pins already released")]
    Released,

    #[error("pin lock poisoned")]
    Poisoned,
}
