//! Position counting for quadrature encoders.
//!
//! Keeps a signed count and applies the configured range behaviour on every step.

/// Six display digits.
pub const DISPLAY_MODULUS: u32 = 1_000_000;

/// Rotation direction of one decoded edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Phase B high on the A rising edge.
    Forward,
    /// Phase B low on the A rising edge.
    Reverse,
}

impl Direction {
    /// `+1` or `-1`.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// How the position count behaves at the ends of its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PositionMode {
    /// Count stays in `0..modulus`; stepping back from 0 gives `modulus - 1`.
    Wrapping {
        /// Size of the range (1..=i32::MAX).
        modulus: i32,
    },
    /// Count is limited only by the 32-bit width (wraps at i32 bounds).
    #[default]
    Unbounded,
}

impl PositionMode {
    /// Wrapping mode, or `None` if the modulus is zero or exceeds `i32::MAX`.
    pub const fn wrapping(modulus: u32) -> Option<Self> {
        if modulus == 0 || modulus > i32::MAX as u32 {
            None
        } else {
            Some(PositionMode::Wrapping {
                modulus: modulus as i32,
            })
        }
    }

    /// Wrapping at [`DISPLAY_MODULUS`].
    pub const fn display() -> Self {
        PositionMode::Wrapping {
            modulus: DISPLAY_MODULUS as i32,
        }
    }

    /// Apply a step of `delta` counts to `position`.
    #[inline]
    pub fn apply(self, position: i32, delta: i32) -> i32 {
        match self {
            PositionMode::Wrapping { modulus } => {
                (position as i64 + delta as i64).rem_euclid(modulus as i64) as i32
            }
            PositionMode::Unbounded => position.wrapping_add(delta),
        }
    }
}

/// Encoder position counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Current count since start.
    count: i32,
    /// Range behaviour.
    mode: PositionMode,
}

impl Position {
    /// Create a counter at zero.
    #[inline]
    pub const fn new(mode: PositionMode) -> Self {
        Self { count: 0, mode }
    }

    /// Get the current count.
    #[inline]
    pub const fn count(&self) -> i32 {
        self.count
    }

    /// Get the range behaviour.
    #[inline]
    pub const fn mode(&self) -> PositionMode {
        self.mode
    }

    /// Apply one decoded edge.
    #[inline]
    pub fn step(&mut self, direction: Direction) {
        self.count = self.mode.apply(self.count, direction.sign());
    }
}
