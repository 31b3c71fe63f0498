//! Interrupt-fed encoder.
//!
//! Phase edges arrive through [`PhaseListener`] from interrupt context and are
//! accumulated into an atomic count that the main cycle reads at any time.
//! Only the interrupt writes the count, so a plain load/store suffices and no
//! compare-and-swap is needed.

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use embedded_hal::digital::PinState;

use super::position::{Direction, PositionMode};
use super::PositionSource;
use crate::edge::PhaseListener;
use crate::error::Result;

/// Edge-latching quadrature encoder.
///
/// `new` is `const`, so the encoder can be a `static` shared with the ISR.
#[derive(Debug)]
pub struct LatchedEncoder {
    count: AtomicI32,
    last_a: AtomicBool,
    mode: PositionMode,
}

impl LatchedEncoder {
    /// Create an encoder at position zero with phase A assumed low.
    pub const fn new(mode: PositionMode) -> Self {
        Self {
            count: AtomicI32::new(0),
            last_a: AtomicBool::new(false),
            mode,
        }
    }

    /// Accumulated position.
    #[inline]
    pub fn position(&self) -> i32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Range behaviour.
    #[inline]
    pub fn mode(&self) -> PositionMode {
        self.mode
    }
}

impl PhaseListener for LatchedEncoder {
    fn on_phase_edge(&self, a: PinState, b: PinState) {
        let high = a == PinState::High;
        let was_high = self.last_a.load(Ordering::Relaxed);
        self.last_a.store(high, Ordering::Relaxed);
        if !high || was_high {
            return;
        }

        let direction = if b == PinState::High {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        let next = self
            .mode
            .apply(self.count.load(Ordering::Relaxed), direction.sign());
        self.count.store(next, Ordering::Relaxed);
        trace!("encoder edge {} -> {}", direction, next);
    }
}

impl PositionSource for &LatchedEncoder {
    fn read_position(&mut self) -> Result<i32> {
        Ok(self.position())
    }
}
