//! Edge notification between the platform's interrupt handlers and the sensors.
//!
//! Sensors implement a listener trait and never touch pins themselves. A
//! binding owns the physical pins plus a reference to its listener; the
//! platform ISR calls [`PhaseInputs::on_interrupt`] or
//! [`HomeInput::on_interrupt`], which samples the pins and notifies. Tests call
//! the listener methods directly to inject synthetic edges.
//!
//! Listener methods take `&self` and must stay short: they run in interrupt
//! context while the main cycle may be reading the same sensor.

use embedded_hal::digital::{InputPin, PinState};

use crate::error::{Result, SensorError};

/// Receives quadrature phase edges.
pub trait PhaseListener {
    /// Called on any change of phase A with both phase levels sampled.
    fn on_phase_edge(&self, a: PinState, b: PinState);
}

/// Receives level changes of a single digital input.
pub trait LevelListener {
    /// Called on any logic change with the level after the change.
    fn on_level_change(&self, level: PinState);
}

fn read_level<P: InputPin>(pin: &mut P, err: SensorError) -> Result<PinState> {
    Ok(PinState::from(pin.is_high().map_err(|_| err)?))
}

/// Binding of two quadrature phase inputs to a [`PhaseListener`].
pub struct PhaseInputs<'a, A, B, L>
where
    A: InputPin,
    B: InputPin,
    L: PhaseListener + ?Sized,
{
    phase_a: A,
    phase_b: B,
    listener: &'a L,
}

impl<'a, A, B, L> PhaseInputs<'a, A, B, L>
where
    A: InputPin,
    B: InputPin,
    L: PhaseListener + ?Sized,
{
    /// Bind phase pins to a listener.
    pub fn new(phase_a: A, phase_b: B, listener: &'a L) -> Self {
        Self {
            phase_a,
            phase_b,
            listener,
        }
    }

    /// Sample both phases and notify the listener.
    ///
    /// Call from the phase A change interrupt.
    pub fn on_interrupt(&mut self) -> Result<()> {
        let a = read_level(&mut self.phase_a, SensorError::PhasePinError)?;
        let b = read_level(&mut self.phase_b, SensorError::PhasePinError)?;
        self.listener.on_phase_edge(a, b);
        Ok(())
    }

    /// Release the pins.
    pub fn free(self) -> (A, B) {
        (self.phase_a, self.phase_b)
    }
}

/// Binding of a home/limit input to a [`LevelListener`].
pub struct HomeInput<'a, P, L>
where
    P: InputPin,
    L: LevelListener + ?Sized,
{
    pin: P,
    listener: &'a L,
}

impl<'a, P, L> HomeInput<'a, P, L>
where
    P: InputPin,
    L: LevelListener + ?Sized,
{
    /// Bind a home pin to a listener.
    pub fn new(pin: P, listener: &'a L) -> Self {
        Self { pin, listener }
    }

    /// Sample the pin and notify the listener.
    ///
    /// Call from the pin-change interrupt, and once at startup so the
    /// listener starts from the current level.
    pub fn on_interrupt(&mut self) -> Result<()> {
        let level = read_level(&mut self.pin, SensorError::HomePinError)?;
        self.listener.on_level_change(level);
        Ok(())
    }

    /// Release the pin.
    pub fn free(self) -> P {
        self.pin
    }
}
