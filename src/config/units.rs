//! Unit types for drive commands.
//!
//! Provides type-safe representations of commanded speed, PWM duty and the
//! stop deadzone so that raw integers do not leak across the driver boundary.

use core::ops::Neg;

use serde::Deserialize;

use crate::error::ConfigError;

/// Largest commanded speed magnitude (full forward or full reverse).
pub const MAX_SPEED: i16 = 255;

/// Signed speed command.
///
/// The logical range is `-255..=255`. Values outside it are accepted here and
/// clamped by [`Speed::clamped`] before they reach the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Speed(pub i16);

impl Speed {
    /// Stopped.
    pub const ZERO: Self = Self(0);
    /// Full forward.
    pub const FULL_FORWARD: Self = Self(MAX_SPEED);
    /// Full reverse.
    pub const FULL_REVERSE: Self = Self(-MAX_SPEED);

    /// Create a new Speed value.
    #[inline]
    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i16 {
        self.0
    }

    /// Clamp into `-255..=255`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self(self.0.clamp(-MAX_SPEED, MAX_SPEED))
    }

    /// Magnitude of the clamped speed, as a duty value.
    #[inline]
    pub fn magnitude(self) -> Duty {
        // clamped() bounds the magnitude to 255
        Duty(self.clamped().0.unsigned_abs() as u8)
    }

    /// True if the clamped speed falls inside the deadzone.
    #[inline]
    pub fn is_within(self, deadzone: Deadzone) -> bool {
        self.magnitude().0 <= deadzone.0
    }

    /// True for positive (forward) commands.
    #[inline]
    pub const fn is_forward(self) -> bool {
        self.0 > 0
    }
}

impl Neg for Speed {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.saturating_neg())
    }
}

impl From<i16> for Speed {
    fn from(value: i16) -> Self {
        Self(value)
    }
}

/// PWM duty on the 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Duty(pub u8);

impl Duty {
    /// Output off.
    pub const OFF: Self = Self(0);
    /// Output fully on.
    pub const FULL: Self = Self(u8::MAX);

    /// Denominator of the duty fraction.
    pub const SCALE: u16 = u8::MAX as u16;

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// `255 - duty`, for enable lines that are active-low.
    #[inline]
    pub const fn inverted(self) -> Self {
        Self(u8::MAX - self.0)
    }
}

/// Band of speeds around zero that are forced to an explicit stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadzone(u8);

impl Deadzone {
    /// Design deadzone of 10.
    pub const DEFAULT: Self = Self(10);
    /// No deadzone; only zero stops.
    pub const NONE: Self = Self(0);

    /// Create a deadzone with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDeadzone` if the value exceeds the speed range.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if value <= MAX_SPEED as u16 {
            Ok(Self(value as u8))
        } else {
            Err(ConfigError::InvalidDeadzone(value))
        }
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Deadzone {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u16> for Deadzone {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Deadzone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Deadzone::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
