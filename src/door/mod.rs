pub mod error;
pub mod sequence;

#[cfg(target_os = "linux")]
pub mod gpio;

pub use error::{DoorError, Result};
pub use sequence::{DoorSequence, Level, OutputPins, Step, run_sequence};

#[cfg(target_os = "linux")]
pub use gpio::{DoorConfig, GpioPins, Pins, open_door};
