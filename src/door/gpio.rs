use gpio_cdev::{Chip, LineHandle, LineRequestFlags};
use tracing::info;

use super::error::Result;
use super::sequence::{DoorSequence, Level, OutputPins, run_sequence};

/// BCM line offsets of the two stepper inputs.
#[derive(Clone, Copy, Debug)]
pub struct Pins {
    pub a: u32,
    pub b: u32,
}

impl Default for Pins {
    fn default() -> Self {
        Self { a: 17, b: 27 }
    }
}

pub struct DoorConfig {
    pub gpio_chip: String,
    pub pins: Pins,
    pub sequence: DoorSequence,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            gpio_chip: "/dev/gpiochip0".to_string(),
            pins: Pins::default(),
            sequence: DoorSequence::default(),
        }
    }
}

/// Output lines requested from a GPIO character device. The kernel takes the
/// lines back when this is dropped.
pub struct GpioPins {
    pin_a: LineHandle,
    pin_b: LineHandle,
}

impl GpioPins {
    pub fn new(gpio_chip: &str, pins: Pins) -> Result<Self> {
        let mut chip = Chip::new(gpio_chip)?;

        let pin_a = chip
            .get_line(pins.a)?
            .request(LineRequestFlags::OUTPUT, 0, "latchkey-a")?;
        let pin_b = chip
            .get_line(pins.b)?
            .request(LineRequestFlags::OUTPUT, 0, "latchkey-b")?;

        drop(chip);

        info!(chip = gpio_chip, pin_a = pins.a, pin_b = pins.b, "Requested door pins");
        Ok(Self { pin_a, pin_b })
    }
}

impl OutputPins for GpioPins {
    fn set_levels(&mut self, pin_a: Level, pin_b: Level) -> Result<()> {
        self.pin_a.set_value(pin_a.value())?;
        self.pin_b.set_value(pin_b.value())?;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.set_levels(Level::Low, Level::Low)
    }
}

/// Runs the configured sequence once against real hardware, blocking for
/// its full duration.
pub fn open_door(config: &DoorConfig) -> Result<()> {
    let mut pins = GpioPins::new(&config.gpio_chip, config.pins)?;
    run_sequence(&mut pins, &config.sequence, std::thread::sleep)
}
