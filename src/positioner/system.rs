//! Two-axis positioner facade.
//!
//! The boundary the control loop talks to: read positions and home flags,
//! write speeds.

use crate::config::units::Speed;
use crate::config::AxisId;
use crate::driver::{Drive, DriveSignals};
use crate::encoder::PositionSource;
use crate::error::{ConfigError, Error, Result};

use super::axis::Axis;
use super::telemetry::Snapshot;

/// Azimuth/elevation positioner.
///
/// The elevation axis is optional so the same facade serves single-axis
/// builds. Addressing a missing axis returns `ConfigError::AxisNotConfigured`.
///
/// Each axis has its own encoder and driver types, since HAL pins and PWM
/// channels are usually distinct types. They default to the azimuth types.
///
/// # Example
///
/// ```rust,ignore
/// use positioner_actuator::{AxisId, Positioner, Speed};
///
/// let mut positioner = Positioner::dual_axis(azimuth, elevation);
/// positioner.set_speed(AxisId::Azimuth, Speed(120))?;
///
/// if gate.poll(now_ms) {
///     let snapshot = positioner.snapshot()?;
///     // render snapshot
/// }
/// ```
pub struct Positioner<'a, EA, DA, EE = EA, DE = DA>
where
    EA: PositionSource,
    DA: Drive,
    EE: PositionSource,
    DE: Drive,
{
    azimuth: Axis<'a, EA, DA>,
    elevation: Option<Axis<'a, EE, DE>>,
}

impl<'a, E, D> Positioner<'a, E, D>
where
    E: PositionSource,
    D: Drive,
{
    /// Positioner with only an azimuth axis.
    pub fn single_axis(azimuth: Axis<'a, E, D>) -> Self {
        Self {
            azimuth,
            elevation: None,
        }
    }
}

impl<'a, EA, DA, EE, DE> Positioner<'a, EA, DA, EE, DE>
where
    EA: PositionSource,
    DA: Drive,
    EE: PositionSource,
    DE: Drive,
{
    /// Positioner with both axes.
    pub fn dual_axis(azimuth: Axis<'a, EA, DA>, elevation: Axis<'a, EE, DE>) -> Self {
        Self {
            azimuth,
            elevation: Some(elevation),
        }
    }

    /// Check if an axis is present.
    pub fn has_axis(&self, id: AxisId) -> bool {
        match id {
            AxisId::Azimuth => true,
            AxisId::Elevation => self.elevation.is_some(),
        }
    }

    /// Azimuth axis.
    pub fn azimuth(&self) -> &Axis<'a, EA, DA> {
        &self.azimuth
    }

    /// Azimuth axis, mutably.
    pub fn azimuth_mut(&mut self) -> &mut Axis<'a, EA, DA> {
        &mut self.azimuth
    }

    /// Elevation axis.
    pub fn elevation(&self) -> Result<&Axis<'a, EE, DE>> {
        self.elevation
            .as_ref()
            .ok_or(not_configured(AxisId::Elevation))
    }

    /// Elevation axis, mutably.
    pub fn elevation_mut(&mut self) -> Result<&mut Axis<'a, EE, DE>> {
        self.elevation
            .as_mut()
            .ok_or(not_configured(AxisId::Elevation))
    }

    /// Current position count of an axis.
    pub fn read_position(&mut self, id: AxisId) -> Result<i32> {
        match id {
            AxisId::Azimuth => self.azimuth.read_position(),
            AxisId::Elevation => self.elevation_mut()?.read_position(),
        }
    }

    /// True if an axis is at its home switch.
    pub fn is_home(&self, id: AxisId) -> Result<bool> {
        match id {
            AxisId::Azimuth => Ok(self.azimuth.is_home()),
            AxisId::Elevation => Ok(self.elevation()?.is_home()),
        }
    }

    /// Command a signed speed on an axis.
    pub fn set_speed(&mut self, id: AxisId, speed: Speed) -> Result<DriveSignals> {
        match id {
            AxisId::Azimuth => self.azimuth.set_speed(speed),
            AxisId::Elevation => self.elevation_mut()?.set_speed(speed),
        }
    }

    /// Stop every axis.
    ///
    /// All axes are attempted; the first error is returned.
    pub fn stop_all(&mut self) -> Result<()> {
        let azimuth = self.azimuth.stop();
        let elevation = match self.elevation.as_mut() {
            Some(axis) => axis.stop(),
            None => Ok(()),
        };
        azimuth.and(elevation)
    }

    /// Read every axis.
    pub fn snapshot(&mut self) -> Result<Snapshot> {
        let azimuth = self.azimuth.snapshot()?;
        let elevation = match self.elevation.as_mut() {
            Some(axis) => Some(axis.snapshot()?),
            None => None,
        };
        Ok(Snapshot { azimuth, elevation })
    }

    /// Release both axes.
    pub fn free(self) -> (Axis<'a, EA, DA>, Option<Axis<'a, EE, DE>>) {
        (self.azimuth, self.elevation)
    }
}

fn not_configured(id: AxisId) -> Error {
    Error::Config(ConfigError::AxisNotConfigured(id.name()))
}
