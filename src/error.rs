//! Error types for positioner-actuator.
//!
//! The decode, latch and drive computations themselves cannot fail. Errors only
//! come from configuration, driver construction, and the embedded-hal pins.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all positioner-actuator operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing, validation or construction error
    Config(ConfigError),
    /// Motor driver output error
    Driver(DriverError),
    /// Sensor input error
    Sensor(SensorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Deadzone wider than the speed range
    InvalidDeadzone(u16),
    /// Wrap modulus outside 1..=i32::MAX
    InvalidWrapModulus(u32),
    /// Report interval of zero
    InvalidReportInterval,
    /// No wiring mode was selected for a motor driver
    MissingWiringMode,
    /// A pin required by the selected wiring mode was not supplied
    MissingPin(&'static str),
    /// A pin was supplied that the selected wiring mode does not use
    UnexpectedPin(&'static str),
    /// The addressed axis is not part of this positioner
    AxisNotConfigured(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor driver output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Direction pin write failed
    PinError,
    /// PWM duty write failed
    PwmError,
}

/// Sensor input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Phase input read failed
    PhasePinError,
    /// Home input read failed
    HomePinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Driver(e) => write!(f, "Driver error: {}", e),
            Error::Sensor(e) => write!(f, "Sensor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidDeadzone(v) => {
                write!(f, "Invalid deadzone: {}. Must be 0-255", v)
            }
            ConfigError::InvalidWrapModulus(v) => {
                write!(f, "Invalid wrap modulus: {}. Must be 1-{}", v, i32::MAX)
            }
            ConfigError::InvalidReportInterval => write!(f, "Report interval must be > 0 ms"),
            ConfigError::MissingWiringMode => write!(f, "Motor driver wiring mode is required"),
            ConfigError::MissingPin(pin) => write!(f, "Wiring mode requires pin '{}'", pin),
            ConfigError::UnexpectedPin(pin) => {
                write!(f, "Pin '{}' is not used by the selected wiring mode", pin)
            }
            ConfigError::AxisNotConfigured(axis) => write!(f, "Axis '{}' is not configured", axis),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::PinError => write!(f, "Direction pin write failed"),
            DriverError::PwmError => write!(f, "PWM duty write failed"),
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::PhasePinError => write!(f, "Phase input read failed"),
            SensorError::HomePinError => write!(f, "Home input read failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::Sensor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}

#[cfg(feature = "std")]
impl std::error::Error for SensorError {}
