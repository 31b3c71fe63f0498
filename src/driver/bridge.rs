//! H-bridge motor driver.
//!
//! Generic over embedded-hal 1.0 output and PWM types. The wiring scheme is a
//! runtime variant, so both schemes can coexist in one binary.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use crate::config::units::{Deadzone, Duty, Speed};
use crate::error::{DriverError, Result};

use super::builder::MotorDriverBuilder;
use super::wiring::{dual_direction_levels, single_direction_levels, DriveSignals, WiringMode};
use super::Drive;

/// Pins for one wiring scheme.
enum Bridge<DIR, PWM> {
    SingleDirection {
        direction: DIR,
        enable: PWM,
    },
    DualDirection {
        forward: DIR,
        reverse: DIR,
        pwm: PWM,
    },
}

/// DC motor driver for one axis.
///
/// Holds no command history: every [`Drive::drive`] call rewrites all outputs
/// from the speed alone, so repeating a command repeats the same writes.
///
/// With dual-direction wiring the opposing pin is released before the active
/// one is asserted, and a stop zeroes duty before asserting both pins, so the
/// two halves never conduct against each other. Single-direction wiring has
/// no such ordering: direction is written before duty, and a reversal drives
/// the new direction at the previous duty until the duty write lands.
pub struct MotorDriver<DIR, PWM>
where
    DIR: OutputPin,
    PWM: SetDutyCycle,
{
    /// Output pins for the selected scheme.
    bridge: Bridge<DIR, PWM>,

    /// Speeds at or below this magnitude stop the motor.
    deadzone: Deadzone,

    /// Negate speed before mapping (motor wired backwards).
    invert_direction: bool,
}

impl<DIR, PWM> MotorDriver<DIR, PWM>
where
    DIR: OutputPin,
    PWM: SetDutyCycle,
{
    /// Create a builder.
    pub fn builder() -> MotorDriverBuilder<DIR, PWM> {
        MotorDriverBuilder::new()
    }

    /// Driver for the one-direction-pin scheme, with default deadzone.
    ///
    /// The bridge is put in its stop state before returning.
    pub fn single_direction(direction: DIR, enable: PWM) -> Result<Self> {
        Self::builder()
            .wiring(WiringMode::SingleDirection)
            .direction_pin(direction)
            .pwm(enable)
            .build()
    }

    /// Driver for the two-direction-pin scheme, with default deadzone.
    ///
    /// The bridge is put in its stop state before returning.
    pub fn dual_direction(forward: DIR, reverse: DIR, pwm: PWM) -> Result<Self> {
        Self::builder()
            .wiring(WiringMode::DualDirection)
            .forward_pin(forward)
            .reverse_pin(reverse)
            .pwm(pwm)
            .build()
    }

    pub(crate) fn single_direction_parts(
        direction: DIR,
        enable: PWM,
        deadzone: Deadzone,
        invert_direction: bool,
    ) -> Self {
        Self {
            bridge: Bridge::SingleDirection { direction, enable },
            deadzone,
            invert_direction,
        }
    }

    pub(crate) fn dual_direction_parts(
        forward: DIR,
        reverse: DIR,
        pwm: PWM,
        deadzone: Deadzone,
        invert_direction: bool,
    ) -> Self {
        Self {
            bridge: Bridge::DualDirection {
                forward,
                reverse,
                pwm,
            },
            deadzone,
            invert_direction,
        }
    }

    /// Wiring scheme of this driver.
    #[inline]
    pub fn wiring(&self) -> WiringMode {
        match self.bridge {
            Bridge::SingleDirection { .. } => WiringMode::SingleDirection,
            Bridge::DualDirection { .. } => WiringMode::DualDirection,
        }
    }

    /// Configured deadzone.
    #[inline]
    pub fn deadzone(&self) -> Deadzone {
        self.deadzone
    }

    /// Whether speed is negated before mapping.
    #[inline]
    pub fn is_direction_inverted(&self) -> bool {
        self.invert_direction
    }

    /// Signals a command would produce, without writing them.
    pub fn signals_for(&self, speed: Speed) -> DriveSignals {
        self.wiring().signals(self.effective(speed), self.deadzone)
    }

    fn effective(&self, speed: Speed) -> Speed {
        let speed = speed.clamped();
        if self.invert_direction {
            -speed
        } else {
            speed
        }
    }
}

impl<DIR, PWM> Drive for MotorDriver<DIR, PWM>
where
    DIR: OutputPin,
    PWM: SetDutyCycle,
{
    fn drive(&mut self, speed: Speed) -> Result<DriveSignals> {
        let effective = self.effective(speed);
        let deadzone = self.deadzone;

        let signals = match &mut self.bridge {
            Bridge::SingleDirection { direction, enable } => {
                let (level, duty) = single_direction_levels(effective, deadzone);
                write_pin(direction, level)?;
                write_duty(enable, duty)?;
                DriveSignals::SingleDirection {
                    direction: level,
                    duty,
                }
            }
            Bridge::DualDirection {
                forward,
                reverse,
                pwm,
            } => {
                let (fwd, rev, duty) = dual_direction_levels(effective, deadzone);
                match (fwd, rev) {
                    (PinState::High, PinState::High) => {
                        // Stop: remove drive before braking both halves
                        write_duty(pwm, Duty::OFF)?;
                        write_pin(forward, PinState::High)?;
                        write_pin(reverse, PinState::High)?;
                    }
                    (PinState::High, _) => {
                        write_pin(reverse, PinState::Low)?;
                        write_pin(forward, PinState::High)?;
                        write_duty(pwm, duty)?;
                    }
                    _ => {
                        write_pin(forward, PinState::Low)?;
                        write_pin(reverse, PinState::High)?;
                        write_duty(pwm, duty)?;
                    }
                }
                DriveSignals::DualDirection {
                    forward: fwd,
                    reverse: rev,
                    duty,
                }
            }
        };

        debug!("drive {} -> duty {}", speed, signals.duty());
        Ok(signals)
    }
}

fn write_pin<P: OutputPin>(pin: &mut P, level: PinState) -> Result<()> {
    pin.set_state(level).map_err(|_| DriverError::PinError)?;
    Ok(())
}

fn write_duty<P: SetDutyCycle>(pwm: &mut P, duty: Duty) -> Result<()> {
    pwm.set_duty_cycle_fraction(u16::from(duty.value()), Duty::SCALE)
        .map_err(|_| DriverError::PwmError)?;
    Ok(())
}
