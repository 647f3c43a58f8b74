use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoorError {
    /// Failures from [`OutputPins`](super::OutputPins) implementations that
    /// are not backed by a GPIO character device.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(target_os = "linux")]
    #[error("GPIO error: {0}")]
    Gpio(#[from] gpio_cdev::errors::Error),
}

pub type Result<T> = std::result::Result<T, DoorError>;
