//! # positioner-actuator
//!
//! Actuator control for two-axis (azimuth/elevation) positioners, on
//! embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Quadrature tracking**: 1x decoding (count on phase A rising, direction from phase B),
//!   either polled from the main loop or latched from interrupts
//! - **Home latching**: interrupt-updated, lock-free home flag per axis
//! - **Two H-bridge schemes**: one-direction-pin (inverted forward enable) and
//!   two-direction-pin, selected at runtime from configuration
//! - **Explicit stop**: commands inside the deadzone drive a defined stop state
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use positioner_actuator::{
//!     Axis, AxisId, HomeLatch, LatchedEncoder, MotorDriver, PositionMode, Positioner, Speed,
//! };
//!
//! static AZ_ENCODER: LatchedEncoder = LatchedEncoder::new(PositionMode::Unbounded);
//! static AZ_HOME: HomeLatch = HomeLatch::active_low();
//!
//! // Interrupt handlers call PhaseInputs::on_interrupt / HomeInput::on_interrupt,
//! // which feed AZ_ENCODER and AZ_HOME.
//!
//! let driver = MotorDriver::builder()
//!     .from_config(&config, AxisId::Azimuth)?
//!     .forward_pin(in1)
//!     .reverse_pin(in2)
//!     .pwm(pwm)
//!     .build()?;
//!
//! let azimuth = Axis::from_config(&config, AxisId::Azimuth, &AZ_ENCODER, &AZ_HOME, driver)?;
//! let mut positioner = Positioner::single_axis(azimuth);
//!
//! positioner.set_speed(AxisId::Azimuth, Speed(120))?;
//! let position = positioner.read_position(AxisId::Azimuth)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod driver;
pub mod edge;
pub mod encoder;
pub mod error;
pub mod home;
pub mod positioner;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisConfig, AxisId, SystemConfig};
pub use driver::{Drive, DriveSignals, MotorDriver, MotorDriverBuilder, WiringMode};
pub use edge::{HomeInput, LevelListener, PhaseInputs, PhaseListener};
pub use encoder::{
    Direction, LatchedEncoder, PolledEncoder, PositionMode, PositionSource, QuadratureDecoder,
};
pub use error::{Error, Result};
pub use home::HomeLatch;
pub use positioner::{Axis, AxisSnapshot, Positioner, ReportGate, Snapshot};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Deadzone, Duty, Speed, MAX_SPEED};
