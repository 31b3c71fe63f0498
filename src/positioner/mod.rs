//! Positioner module for positioner-actuator.
//!
//! Composes encoders, home latches and motor drivers into axes, and axes into
//! an azimuth/elevation positioner.

mod axis;
mod system;
pub mod telemetry;

pub use axis::Axis;
pub use system::Positioner;
pub use telemetry::{AxisSnapshot, ReportGate, Snapshot};
