//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use positioner_actuator::load_config;
///
/// let config = load_config("positioner.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(truncate(e.message(), 128)).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxisId;
    use crate::driver::WiringMode;
    use crate::encoder::PositionMode;

    #[test]
    fn test_parse_single_axis_config() {
        let toml = r#"
[azimuth]
name = "Yaw"
wiring = "single_direction"
wrap_modulus = 1000000
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.report_interval_ms, 500);
        assert!(!config.is_dual_axis());

        let yaw = config.axis(AxisId::Azimuth).unwrap();
        assert_eq!(yaw.wiring, WiringMode::SingleDirection);
        assert_eq!(yaw.deadzone.value(), 10);
        assert!(yaw.home_active_low);
        assert_eq!(
            yaw.position_mode().unwrap(),
            PositionMode::Wrapping { modulus: 1_000_000 }
        );
    }

    #[test]
    fn test_parse_dual_axis_config() {
        let toml = r#"
report_interval_ms = 250

[azimuth]
name = "Azimuth"
wiring = "dual_direction"

[elevation]
name = "Elevation"
wiring = "dual_direction"
deadzone = 20
invert_direction = true
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.report_interval_ms, 250);

        let el = config.axis(AxisId::Elevation).unwrap();
        assert_eq!(el.deadzone.value(), 20);
        assert!(el.invert_direction);
        assert_eq!(el.position_mode().unwrap(), PositionMode::Unbounded);
    }

    #[test]
    fn test_unknown_wiring_rejected() {
        let toml = r#"
[azimuth]
name = "Azimuth"
wiring = "both"
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/positioner.toml"),
            Err(Error::Config(ConfigError::IoError(_)))
        ));
    }
}
