//! System configuration - root configuration structure.

use serde::Deserialize;

use super::axis::{AxisConfig, AxisId};

/// Default telemetry cadence in milliseconds.
pub const DEFAULT_REPORT_INTERVAL_MS: u32 = 500;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Telemetry/report cadence in milliseconds.
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u32,

    /// Azimuth axis (always present).
    pub azimuth: AxisConfig,

    /// Elevation axis (absent on single-axis builds).
    #[serde(default)]
    pub elevation: Option<AxisConfig>,
}

fn default_report_interval_ms() -> u32 {
    DEFAULT_REPORT_INTERVAL_MS
}

impl SystemConfig {
    /// Configuration with only an azimuth axis.
    pub fn single_axis(azimuth: AxisConfig) -> Self {
        Self {
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            azimuth,
            elevation: None,
        }
    }

    /// Configuration with both axes.
    pub fn dual_axis(azimuth: AxisConfig, elevation: AxisConfig) -> Self {
        Self {
            report_interval_ms: DEFAULT_REPORT_INTERVAL_MS,
            azimuth,
            elevation: Some(elevation),
        }
    }

    /// Get an axis configuration.
    pub fn axis(&self, id: AxisId) -> Option<&AxisConfig> {
        match id {
            AxisId::Azimuth => Some(&self.azimuth),
            AxisId::Elevation => self.elevation.as_ref(),
        }
    }

    /// Iterate over the configured axes.
    pub fn axes(&self) -> impl Iterator<Item = (AxisId, &AxisConfig)> {
        AxisId::ALL
            .into_iter()
            .filter_map(move |id| self.axis(id).map(|axis| (id, axis)))
    }

    /// True if the elevation axis is configured.
    pub fn is_dual_axis(&self) -> bool {
        self.elevation.is_some()
    }
}
