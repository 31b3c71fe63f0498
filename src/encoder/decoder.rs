//! Single-edge (1x) quadrature decoding.
//!
//! A count is taken only on the rising edge of phase A; phase B at that moment
//! gives the direction. Falling A edges and B-only changes are ignored.

use super::position::{Direction, Position, PositionMode};

/// 1x quadrature decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureDecoder {
    /// Phase A level seen on the previous sample.
    last_a: bool,
    /// Accumulated position.
    position: Position,
}

impl QuadratureDecoder {
    /// Create a decoder at position zero with phase A assumed low.
    pub const fn new(mode: PositionMode) -> Self {
        Self {
            last_a: false,
            position: Position::new(mode),
        }
    }

    /// True if `a` would be a rising edge, without recording it.
    #[inline]
    pub const fn is_rising(&self, a: bool) -> bool {
        a && !self.last_a
    }

    /// Record a phase A sample. Returns `true` on a rising edge.
    #[inline]
    pub fn update_phase_a(&mut self, a: bool) -> bool {
        let rising = self.is_rising(a);
        self.last_a = a;
        rising
    }

    /// Count one rising edge of phase A given phase B's level.
    #[inline]
    pub fn count_edge(&mut self, b: bool) -> Direction {
        let direction = if b {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        self.position.step(direction);
        direction
    }

    /// Feed one sample of both phases.
    ///
    /// Returns the direction counted, if this sample was a rising edge of A.
    pub fn sample(&mut self, a: bool, b: bool) -> Option<Direction> {
        if self.update_phase_a(a) {
            Some(self.count_edge(b))
        } else {
            None
        }
    }

    /// Current position.
    #[inline]
    pub const fn position(&self) -> i32 {
        self.position.count()
    }

    /// Range behaviour.
    #[inline]
    pub const fn mode(&self) -> PositionMode {
        self.position.mode()
    }
}
