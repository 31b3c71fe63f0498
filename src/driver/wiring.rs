//! H-bridge wiring schemes and the speed-to-signal mapping.
//!
//! This is the whole drive law; [`super::MotorDriver`] only writes the result
//! to pins.

use embedded_hal::digital::PinState;
use serde::Deserialize;

use crate::config::units::{Deadzone, Duty, Speed};

/// How an axis's H-bridge is wired.
///
/// Chosen per axis from configuration; a driver never mixes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum WiringMode {
    /// One direction pin plus one PWM enable pin (the "two-enable" driver).
    ///
    /// The enable line is active-low for forward motion, so forward duty is
    /// written inverted. Stop holds direction HIGH with full duty.
    SingleDirection,
    /// Two direction pins plus one PWM pin (four-transistor bridge).
    ///
    /// Exactly one direction pin is asserted while moving. Stop asserts both
    /// with zero duty.
    DualDirection,
}

/// Output levels for one drive command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveSignals {
    /// Signals for [`WiringMode::SingleDirection`].
    SingleDirection {
        /// Direction pin level.
        direction: PinState,
        /// Enable duty.
        duty: Duty,
    },
    /// Signals for [`WiringMode::DualDirection`].
    DualDirection {
        /// First direction pin (asserted for positive speed).
        forward: PinState,
        /// Second direction pin (asserted for negative speed).
        reverse: PinState,
        /// PWM duty.
        duty: Duty,
    },
}

impl DriveSignals {
    /// PWM duty written by these signals.
    pub fn duty(&self) -> Duty {
        match *self {
            DriveSignals::SingleDirection { duty, .. } => duty,
            DriveSignals::DualDirection { duty, .. } => duty,
        }
    }

    /// Wiring scheme these signals belong to.
    pub fn wiring(&self) -> WiringMode {
        match self {
            DriveSignals::SingleDirection { .. } => WiringMode::SingleDirection,
            DriveSignals::DualDirection { .. } => WiringMode::DualDirection,
        }
    }

    /// True if these are the explicit stop signals of their scheme.
    pub fn is_stop(&self) -> bool {
        *self == self.wiring().stop_signals()
    }
}

impl WiringMode {
    /// Explicit stop state for this scheme.
    pub const fn stop_signals(self) -> DriveSignals {
        match self {
            WiringMode::SingleDirection => DriveSignals::SingleDirection {
                direction: PinState::High,
                duty: Duty::FULL,
            },
            WiringMode::DualDirection => DriveSignals::DualDirection {
                forward: PinState::High,
                reverse: PinState::High,
                duty: Duty::OFF,
            },
        }
    }

    /// Map a speed command to output levels.
    ///
    /// The speed is clamped to `-255..=255`; anything inside the deadzone
    /// maps to [`WiringMode::stop_signals`].
    pub fn signals(self, speed: Speed, deadzone: Deadzone) -> DriveSignals {
        match self {
            WiringMode::SingleDirection => {
                let (direction, duty) = single_direction_levels(speed, deadzone);
                DriveSignals::SingleDirection { direction, duty }
            }
            WiringMode::DualDirection => {
                let (forward, reverse, duty) = dual_direction_levels(speed, deadzone);
                DriveSignals::DualDirection {
                    forward,
                    reverse,
                    duty,
                }
            }
        }
    }
}

/// Direction level and enable duty for [`WiringMode::SingleDirection`].
pub(crate) fn single_direction_levels(speed: Speed, deadzone: Deadzone) -> (PinState, Duty) {
    let speed = speed.clamped();
    if speed.is_within(deadzone) {
        return (PinState::High, Duty::FULL);
    }

    let magnitude = speed.magnitude();
    if speed.is_forward() {
        // Forward enable is active-low on this driver
        (PinState::High, magnitude.inverted())
    } else {
        (PinState::Low, magnitude)
    }
}

/// Forward level, reverse level and duty for [`WiringMode::DualDirection`].
pub(crate) fn dual_direction_levels(
    speed: Speed,
    deadzone: Deadzone,
) -> (PinState, PinState, Duty) {
    let speed = speed.clamped();
    if speed.is_within(deadzone) {
        return (PinState::High, PinState::High, Duty::OFF);
    }

    let forward = speed.is_forward();
    (
        PinState::from(forward),
        PinState::from(!forward),
        speed.magnitude(),
    )
}
