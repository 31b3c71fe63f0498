//! Per-axis configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::units::Deadzone;
use crate::driver::WiringMode;
use crate::encoder::PositionMode;
use crate::error::ConfigError;
use crate::home::HomeLatch;

/// The two axes of a positioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisId {
    /// Horizontal rotation (yaw).
    Azimuth,
    /// Vertical rotation (pitch).
    Elevation,
}

impl AxisId {
    /// Both axes, azimuth first.
    pub const ALL: [AxisId; 2] = [AxisId::Azimuth, AxisId::Elevation];

    /// Configuration table name.
    pub const fn name(self) -> &'static str {
        match self {
            AxisId::Azimuth => "azimuth",
            AxisId::Elevation => "elevation",
        }
    }
}

/// Complete axis configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// H-bridge wiring scheme for this axis.
    pub wiring: WiringMode,

    /// Speeds with magnitude at or below this are forced to a stop.
    #[serde(default)]
    pub deadzone: Deadzone,

    /// Wrap position modulo this value. Absent means unbounded.
    #[serde(default)]
    pub wrap_modulus: Option<u32>,

    /// Home switch reads LOW when the axis is at home.
    #[serde(default = "default_home_active_low")]
    pub home_active_low: bool,

    /// Negate commanded speed (motor wired backwards).
    #[serde(default)]
    pub invert_direction: bool,
}

fn default_home_active_low() -> bool {
    true
}

impl AxisConfig {
    /// Create an axis configuration with defaults for everything but wiring.
    ///
    /// Names longer than 32 bytes are truncated at a character boundary.
    pub fn new(name: &str, wiring: WiringMode) -> Self {
        Self {
            name: truncated_name(name),
            wiring,
            deadzone: Deadzone::DEFAULT,
            wrap_modulus: None,
            home_active_low: true,
            invert_direction: false,
        }
    }

    /// Home latch with this axis's switch polarity.
    ///
    /// Latches shared with an interrupt handler are usually `static`; use
    /// `HomeLatch::new(active_low)` directly for those.
    pub fn home_latch(&self) -> HomeLatch {
        HomeLatch::new(self.home_active_low)
    }

    /// Resolve the position counting mode.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWrapModulus` for a zero or oversized modulus.
    pub fn position_mode(&self) -> Result<PositionMode, ConfigError> {
        match self.wrap_modulus {
            None => Ok(PositionMode::Unbounded),
            Some(modulus) => {
                PositionMode::wrapping(modulus).ok_or(ConfigError::InvalidWrapModulus(modulus))
            }
        }
    }
}

/// Longest prefix of `name` that fits in an axis name.
fn truncated_name(name: &str) -> String<32> {
    let mut out = String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
