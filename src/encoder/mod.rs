//! Quadrature position tracking.
//!
//! Two variants share the same 1x decoding rule: [`PolledEncoder`] samples the
//! phase pins from the main cycle, [`LatchedEncoder`] is fed edges from
//! interrupt context.

mod decoder;
mod latched;
mod polled;
mod position;

pub use decoder::QuadratureDecoder;
pub use latched::LatchedEncoder;
pub use polled::PolledEncoder;
pub use position::{Direction, Position, PositionMode, DISPLAY_MODULUS};

use crate::error::Result;

/// Anything that can report an axis position.
pub trait PositionSource {
    /// Current position count.
    fn read_position(&mut self) -> Result<i32>;
}
