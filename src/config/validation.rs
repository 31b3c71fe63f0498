//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Report interval is non-zero
/// - Each axis wrap modulus (if set) is in `1..=i32::MAX`
///
/// Deadzone range is enforced while deserializing.
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    if config.report_interval_ms == 0 {
        return Err(Error::Config(ConfigError::InvalidReportInterval));
    }

    for (_, axis) in config.axes() {
        validate_axis(axis)?;
    }

    Ok(())
}

fn validate_axis(axis: &AxisConfig) -> Result<()> {
    axis.position_mode()?;
    Ok(())
}
