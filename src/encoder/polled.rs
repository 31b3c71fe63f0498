//! Polled encoder.
//!
//! Samples both phase inputs from the main cycle. Edges that come and go
//! between two polls are not seen; the poll cadence bounds the trackable speed.

use embedded_hal::digital::InputPin;

use super::decoder::QuadratureDecoder;
use super::position::{Direction, PositionMode};
use super::PositionSource;
use crate::error::{Result, SensorError};

/// Quadrature encoder sampled at poll time.
pub struct PolledEncoder<A, B>
where
    A: InputPin,
    B: InputPin,
{
    /// Phase A input.
    phase_a: A,

    /// Phase B input (only read on an A rising edge).
    phase_b: B,

    /// Edge decoder and position.
    decoder: QuadratureDecoder,
}

impl<A, B> PolledEncoder<A, B>
where
    A: InputPin,
    B: InputPin,
{
    /// Create a polled encoder at position zero.
    pub fn new(phase_a: A, phase_b: B, mode: PositionMode) -> Self {
        Self {
            phase_a,
            phase_b,
            decoder: QuadratureDecoder::new(mode),
        }
    }

    /// Sample the phases once.
    ///
    /// Returns the direction counted if phase A rose since the last poll. If
    /// reading phase B fails the edge stays pending and the next poll that
    /// still sees A high counts it.
    pub fn poll(&mut self) -> Result<Option<Direction>> {
        let a = self
            .phase_a
            .is_high()
            .map_err(|_| SensorError::PhasePinError)?;

        if !self.decoder.is_rising(a) {
            self.decoder.update_phase_a(a);
            return Ok(None);
        }

        // Commit A only after B has been read
        let b = self
            .phase_b
            .is_high()
            .map_err(|_| SensorError::PhasePinError)?;
        self.decoder.update_phase_a(a);
        Ok(Some(self.decoder.count_edge(b)))
    }

    /// Position as of the last poll.
    #[inline]
    pub fn position(&self) -> i32 {
        self.decoder.position()
    }

    /// Range behaviour.
    #[inline]
    pub fn mode(&self) -> PositionMode {
        self.decoder.mode()
    }

    /// Release the pins.
    pub fn free(self) -> (A, B) {
        (self.phase_a, self.phase_b)
    }
}

impl<A, B> PositionSource for PolledEncoder<A, B>
where
    A: InputPin,
    B: InputPin,
{
    fn read_position(&mut self) -> Result<i32> {
        self.poll()?;
        Ok(self.position())
    }
}
