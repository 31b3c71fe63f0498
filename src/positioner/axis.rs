//! Per-axis context.
//!
//! Bundles what one axis owns: a position source, a reference to its
//! interrupt-updated home latch, and a motor driver.

use heapless::String;

use crate::config::units::Speed;
use crate::config::{AxisId, SystemConfig};
use crate::driver::{Drive, DriveSignals};
use crate::encoder::PositionSource;
use crate::error::{ConfigError, Error, Result};
use crate::home::HomeLatch;

use super::telemetry::AxisSnapshot;

/// One axis of the positioner.
///
/// Generic over:
/// - `E`: position source ([`crate::PolledEncoder`] or `&LatchedEncoder`)
/// - `D`: motor driver (usually [`crate::MotorDriver`])
pub struct Axis<'a, E, D>
where
    E: PositionSource,
    D: Drive,
{
    /// Which axis this is.
    id: AxisId,

    /// Name for logging/debugging.
    name: String<32>,

    /// Position source.
    encoder: E,

    /// Home flag, written from the home-switch interrupt.
    home: &'a HomeLatch,

    /// Motor driver.
    driver: D,
}

impl<'a, E, D> Axis<'a, E, D>
where
    E: PositionSource,
    D: Drive,
{
    /// Create an axis named after its id.
    pub fn new(id: AxisId, encoder: E, home: &'a HomeLatch, driver: D) -> Self {
        Self {
            id,
            name: String::try_from(id.name()).unwrap_or_default(),
            encoder,
            home,
            driver,
        }
    }

    /// Create an axis named from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AxisNotConfigured` if the axis has no section.
    pub fn from_config(
        config: &SystemConfig,
        id: AxisId,
        encoder: E,
        home: &'a HomeLatch,
        driver: D,
    ) -> Result<Self> {
        let axis_config = config
            .axis(id)
            .ok_or(Error::Config(ConfigError::AxisNotConfigured(id.name())))?;

        let mut axis = Self::new(id, encoder, home, driver);
        axis.name = axis_config.name.clone();
        Ok(axis)
    }

    /// Axis id.
    #[inline]
    pub fn id(&self) -> AxisId {
        self.id
    }

    /// Axis name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current position count.
    pub fn read_position(&mut self) -> Result<i32> {
        self.encoder.read_position()
    }

    /// True if the axis is at its home switch.
    #[inline]
    pub fn is_home(&self) -> bool {
        self.home.is_home()
    }

    /// Command a signed speed.
    pub fn set_speed(&mut self, speed: Speed) -> Result<DriveSignals> {
        self.driver.drive(speed)
    }

    /// Stop the motor.
    pub fn stop(&mut self) -> Result<()> {
        self.driver.stop()
    }

    /// Read position and home state together.
    pub fn snapshot(&mut self) -> Result<AxisSnapshot> {
        Ok(AxisSnapshot {
            position: self.read_position()?,
            home: self.is_home(),
        })
    }

    /// Position source.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Motor driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Release the encoder and driver.
    pub fn free(self) -> (E, D) {
        (self.encoder, self.driver)
    }
}
