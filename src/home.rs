//! Home/limit switch state.
//!
//! The flag is a projection of the switch level, rewritten on every transition
//! from interrupt context. There is no debounce and no edge counting; a missed
//! interrupt leaves the flag stale until the next transition.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::PinState;

use crate::edge::LevelListener;

/// Interrupt-updated home flag for one axis.
///
/// The interrupt writes, the main cycle reads. Both are single atomic
/// accesses, so no lock is taken.
#[derive(Debug)]
pub struct HomeLatch {
    home: AtomicBool,
    active_low: bool,
}

impl HomeLatch {
    /// Create a latch reading "not home".
    ///
    /// `active_low` selects which level means "at home"; the usual switch
    /// wiring pulls the input LOW at home.
    pub const fn new(active_low: bool) -> Self {
        Self {
            home: AtomicBool::new(false),
            active_low,
        }
    }

    /// Latch for an active-low switch.
    pub const fn active_low() -> Self {
        Self::new(true)
    }

    /// True if the axis was at home as of the last transition.
    #[inline]
    pub fn is_home(&self) -> bool {
        self.home.load(Ordering::Relaxed)
    }

    /// Polarity of the switch.
    #[inline]
    pub fn is_active_low(&self) -> bool {
        self.active_low
    }
}

impl Default for HomeLatch {
    fn default() -> Self {
        Self::active_low()
    }
}

impl LevelListener for HomeLatch {
    fn on_level_change(&self, level: PinState) {
        let home = match level {
            PinState::Low => self.active_low,
            PinState::High => !self.active_low,
        };
        self.home.store(home, Ordering::Relaxed);
        trace!("home -> {}", home);
    }
}
