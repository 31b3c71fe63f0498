//! Builder pattern for MotorDriver.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::units::Deadzone;
use crate::config::{AxisConfig, AxisId, SystemConfig};
use crate::error::{ConfigError, Error, Result};

use super::bridge::MotorDriver;
use super::wiring::WiringMode;
use super::Drive;

/// Builder for creating MotorDriver instances.
///
/// Which pins are required depends on the wiring mode:
/// - `SingleDirection`: `direction_pin` and `pwm`
/// - `DualDirection`: `forward_pin`, `reverse_pin` and `pwm`
pub struct MotorDriverBuilder<DIR, PWM>
where
    DIR: OutputPin,
    PWM: SetDutyCycle,
{
    wiring: Option<WiringMode>,
    direction: Option<DIR>,
    forward: Option<DIR>,
    reverse: Option<DIR>,
    pwm: Option<PWM>,
    deadzone: Deadzone,
    invert_direction: bool,
}

impl<DIR, PWM> Default for MotorDriverBuilder<DIR, PWM>
where
    DIR: OutputPin,
    PWM: SetDutyCycle,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<DIR, PWM> MotorDriverBuilder<DIR, PWM>
where
    DIR: OutputPin,
    PWM: SetDutyCycle,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            wiring: None,
            direction: None,
            forward: None,
            reverse: None,
            pwm: None,
            deadzone: Deadzone::DEFAULT,
            invert_direction: false,
        }
    }

    /// Set the wiring mode.
    pub fn wiring(mut self, wiring: WiringMode) -> Self {
        self.wiring = Some(wiring);
        self
    }

    /// Set the direction pin (single-direction wiring).
    pub fn direction_pin(mut self, pin: DIR) -> Self {
        self.direction = Some(pin);
        self
    }

    /// Set the forward direction pin (dual-direction wiring).
    pub fn forward_pin(mut self, pin: DIR) -> Self {
        self.forward = Some(pin);
        self
    }

    /// Set the reverse direction pin (dual-direction wiring).
    pub fn reverse_pin(mut self, pin: DIR) -> Self {
        self.reverse = Some(pin);
        self
    }

    /// Set the PWM channel (enable line for single-direction wiring).
    pub fn pwm(mut self, pwm: PWM) -> Self {
        self.pwm = Some(pwm);
        self
    }

    /// Set the stop deadzone.
    pub fn deadzone(mut self, deadzone: Deadzone) -> Self {
        self.deadzone = deadzone;
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Configure from an AxisConfig.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.wiring = Some(config.wiring);
        self.deadzone = config.deadzone;
        self.invert_direction = config.invert_direction;
        self
    }

    /// Configure from SystemConfig by axis.
    pub fn from_config(self, config: &SystemConfig, axis: AxisId) -> Result<Self> {
        let axis_config = config
            .axis(axis)
            .ok_or(Error::Config(ConfigError::AxisNotConfigured(axis.name())))?;

        Ok(self.from_axis_config(axis_config))
    }

    /// Build the MotorDriver and put the bridge in its stop state.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the wiring mode is unset or the supplied pins
    /// do not match it, and a `DriverError` if the initial stop write fails.
    pub fn build(self) -> Result<MotorDriver<DIR, PWM>> {
        let wiring = self
            .wiring
            .ok_or(Error::Config(ConfigError::MissingWiringMode))?;
        let pwm = self.pwm.ok_or(Error::Config(ConfigError::MissingPin("pwm")))?;

        let mut driver = match wiring {
            WiringMode::SingleDirection => {
                reject_unused(self.forward.is_some(), "forward")?;
                reject_unused(self.reverse.is_some(), "reverse")?;
                let direction = self
                    .direction
                    .ok_or(Error::Config(ConfigError::MissingPin("direction")))?;
                MotorDriver::single_direction_parts(
                    direction,
                    pwm,
                    self.deadzone,
                    self.invert_direction,
                )
            }
            WiringMode::DualDirection => {
                reject_unused(self.direction.is_some(), "direction")?;
                let forward = self
                    .forward
                    .ok_or(Error::Config(ConfigError::MissingPin("forward")))?;
                let reverse = self
                    .reverse
                    .ok_or(Error::Config(ConfigError::MissingPin("reverse")))?;
                MotorDriver::dual_direction_parts(
                    forward,
                    reverse,
                    pwm,
                    self.deadzone,
                    self.invert_direction,
                )
            }
        };

        driver.stop()?;
        info!("motor driver ready ({})", wiring);
        Ok(driver)
    }
}

fn reject_unused(present: bool, pin: &'static str) -> Result<()> {
    if present {
        return Err(Error::Config(ConfigError::UnexpectedPin(pin)));
    }
    Ok(())
}
