use std::time::Duration;

use tracing::{info, warn};

use super::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn value(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

/// Pin levels to apply, then how long to hold them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub pin_a: Level,
    pub pin_b: Level,
    pub hold: Duration,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoorSequence {
    steps: Vec<Step>,
}

impl DoorSequence {
    /// Unlock drive, open window with the motor stopped, lock drive.
    pub fn new(unlock: Duration, hold_open: Duration, lock: Duration) -> Self {
        Self {
            steps: vec![
                Step {
                    pin_a: Level::High,
                    pin_b: Level::Low,
                    hold: unlock,
                },
                Step {
                    pin_a: Level::Low,
                    pin_b: Level::Low,
                    hold: hold_open,
                },
                Step {
                    pin_a: Level::Low,
                    pin_b: Level::High,
                    hold: lock,
                },
            ],
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.hold).sum()
    }
}

impl Default for DoorSequence {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(3),
            Duration::from_secs(20),
            Duration::from_secs(3),
        )
    }
}

/// Two digital outputs driving the lock stepper.
pub trait OutputPins {
    fn set_levels(&mut self, pin_a: Level, pin_b: Level) -> Result<()>;

    /// Stop driving the motor. Called once after the sequence, even on failure.
    fn release(&mut self) -> Result<()>;
}

/// Plays `sequence` on `pins`, using `sleep` between steps, then releases
/// the pins. The first step error wins over a release error.
pub fn run_sequence<P, F>(pins: &mut P, sequence: &DoorSequence, mut sleep: F) -> Result<()>
where
    P: OutputPins + ?Sized,
    F: FnMut(Duration),
{
    info!(total_ms = sequence.total_duration().as_millis() as u64, "Starting door sequence");
    let outcome: Result<()> = sequence
        .steps()
        .iter()
        .enumerate()
        .try_for_each(|(index, step)| {
            info!(
                step = index,
                pin_a = step.pin_a.value(),
                pin_b = step.pin_b.value(),
                hold_ms = step.hold.as_millis() as u64,
                "Applying door step"
            );
            pins.set_levels(step.pin_a, step.pin_b)?;
            sleep(step.hold);
            Ok(())
        });

    let released = pins.release();
    if let Err(e) = &released {
        warn!(error = %e, "Failed releasing door pins");
    }
    outcome?;
    released?;
    info!("Door sequence complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::door::error::DoorError;

    #[derive(Default)]
    struct RecordingPins {
        levels: Vec<(Level, Level)>,
        released: usize,
        fail_on_step: Option<usize>,
    }

    impl OutputPins for RecordingPins {
        fn set_levels(&mut self, pin_a: Level, pin_b: Level) -> Result<()> {
            if self.fail_on_step == Some(self.levels.len()) {
                return Err(DoorError::Io(std::io::Error::other("line busy")));
            }
            self.levels.push((pin_a, pin_b));
            Ok(())
        }

        fn release(&mut self) -> Result<()> {
            self.released += 1;
            Ok(())
        }
    }

    #[test]
    fn default_sequence_timings() {
        let seq = DoorSequence::default();
        let holds: Vec<u64> = seq.steps().iter().map(|s| s.hold.as_secs()).collect();
        assert_eq!(holds, vec![3, 20, 3]);
        assert_eq!(seq.total_duration(), Duration::from_secs(26));
    }

    #[test]
    fn applies_levels_in_order_and_releases() {
        let mut pins = RecordingPins::default();
        let mut slept = Vec::new();

        run_sequence(&mut pins, &DoorSequence::default(), |d| slept.push(d)).unwrap();

        assert_eq!(
            pins.levels,
            vec![
                (Level::High, Level::Low),
                (Level::Low, Level::Low),
                (Level::Low, Level::High),
            ]
        );
        assert_eq!(
            slept,
            vec![
                Duration::from_secs(3),
                Duration::from_secs(20),
                Duration::from_secs(3),
            ]
        );
        assert_eq!(pins.released, 1);
    }

    #[test]
    fn failed_step_stops_sequence_but_still_releases() {
        let mut pins = RecordingPins {
            fail_on_step: Some(1),
            ..RecordingPins::default()
        };
        let mut sleeps = 0;

        let res = run_sequence(&mut pins, &DoorSequence::default(), |_| sleeps += 1);

        assert!(matches!(res, Err(DoorError::Io(_))));
        assert_eq!(pins.levels, vec![(Level::High, Level::Low)]);
        assert_eq!(sleeps, 1);
        assert_eq!(pins.released, 1);
    }
}
