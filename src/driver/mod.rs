//! Motor driver module for positioner-actuator.
//!
//! Maps a signed speed command to direction and PWM outputs for one of two
//! H-bridge wiring schemes.

mod bridge;
mod builder;
mod wiring;

pub use bridge::MotorDriver;
pub use builder::MotorDriverBuilder;
pub use wiring::{DriveSignals, WiringMode};

use crate::config::units::Speed;
use crate::error::Result;

/// A motor that can be commanded with a signed speed.
pub trait Drive {
    /// Apply a speed command and return the signals written.
    ///
    /// Out-of-range speeds are clamped; speeds inside the deadzone stop the
    /// motor explicitly.
    fn drive(&mut self, speed: Speed) -> Result<DriveSignals>;

    /// Put the motor in its explicit stop state.
    fn stop(&mut self) -> Result<()> {
        self.drive(Speed::ZERO).map(|_| ())
    }
}
