//! Configuration module for positioner-actuator.
//!
//! Provides types for loading and validating per-axis configuration from TOML
//! files (with `std` feature) or pre-parsed data.

mod axis;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::{AxisConfig, AxisId};
pub use system::{SystemConfig, DEFAULT_REPORT_INTERVAL_MS};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Deadzone, Duty, Speed, MAX_SPEED};
