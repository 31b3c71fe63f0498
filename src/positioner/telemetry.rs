//! Telemetry support for the control loop.
//!
//! Only the reading side lives here: a cadence gate and plain snapshots.
//! Rendering them to a display or serial port is the caller's business.

use crate::config::SystemConfig;

/// Fixed-interval gate over a free-running millisecond clock.
///
/// Fires when strictly more than `interval_ms` has elapsed since it last
/// fired. Uses wrapping arithmetic, so a 32-bit clock rollover is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportGate {
    interval_ms: u32,
    last_ms: u32,
}

impl ReportGate {
    /// Create a gate whose reference time is 0.
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: 0,
        }
    }

    /// Gate with the configured report interval.
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.report_interval_ms)
    }

    /// Check the clock. Returns `true` (and restarts the interval) when due.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) > self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Report interval in milliseconds.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

/// One axis's sensed state at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisSnapshot {
    /// Position count.
    pub position: i32,
    /// Home switch state.
    pub home: bool,
}

impl AxisSnapshot {
    /// Low three bits of the position, for a three-LED indicator.
    #[inline]
    pub fn indicator_bits(&self) -> u8 {
        (self.position & 0b111) as u8
    }
}

/// Sensed state of the whole positioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Azimuth axis.
    pub azimuth: AxisSnapshot,
    /// Elevation axis, if configured.
    pub elevation: Option<AxisSnapshot>,
}
