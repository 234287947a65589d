//! # Pilot heater energy history
//!
//! Compresses the per-slot on/off stream into heating load percentages at
//! three time resolutions without keeping the raw stream beyond the short
//! term window.
//!
//! * short term: load over the last `short_size` slots (10 minutes with
//!   1 s slots),
//! * medium term: mean of the last `M` short term loads, one taken each
//!   time the short window completes (2 hours),
//! * long term: mean of the last `L` medium term means, one taken each time
//!   the medium window completes (1 day).

use serde::Serialize;

use crate::bit_history::BitWindowHistory;
use crate::error::ConfigurationError;
use crate::statistics::WindowedAverage;

/// Heating load in percent at the three resolutions.
#[derive(Serialize, Copy, Clone, Debug, Default, PartialEq)]
pub struct Energy {
    pub short: f32,
    pub medium: f32,
    pub long: f32,
}

/// Cascade of a bit window and two numeric windows.
///
/// `WORDS` sizes the short term bit storage, `M` and `L` are the medium and
/// long term window lengths.
pub struct EnergyHistory<const WORDS: usize, const M: usize, const L: usize> {
    short: BitWindowHistory<WORDS>,
    medium: WindowedAverage<M>,
    long: WindowedAverage<L>,
    short_counter: usize,
    medium_counter: usize,
}

impl<const WORDS: usize, const M: usize, const L: usize>
    EnergyHistory<WORDS, M, L>
{
    /// Construct an empty history whose short window spans `short_size`
    /// slots.
    pub fn new(short_size: usize) -> Result<Self, ConfigurationError> {
        Ok(Self {
            short: BitWindowHistory::new(short_size)?,
            medium: WindowedAverage::new(),
            long: WindowedAverage::new(),
            short_counter: 0,
            medium_counter: 0,
        })
    }

    /// Record one heating slot.
    ///
    /// A medium term sample is taken exactly when `short_size` slots were
    /// pushed since the previous one, a long term sample exactly when `M`
    /// medium samples were taken since the previous one.
    pub fn push(&mut self, bit: bool) {
        self.short.push(bit);
        self.short_counter += 1;
        if self.short_counter < self.short.capacity() {
            return;
        }
        self.short_counter = 0;
        self.medium.push(self.short_term_energy());

        self.medium_counter += 1;
        if self.medium_counter < M {
            return;
        }
        self.medium_counter = 0;
        self.long.push(self.medium_term_energy());
    }

    pub fn short_term_energy(&self) -> f32 {
        self.short.load_percentage().unwrap_or(0.)
    }

    pub fn medium_term_energy(&self) -> f32 {
        self.medium.mean(0.)
    }

    pub fn long_term_energy(&self) -> f32 {
        self.long.mean(0.)
    }

    pub fn energy(&self) -> Energy {
        Energy {
            short: self.short_term_energy(),
            medium: self.medium_term_energy(),
            long: self.long_term_energy(),
        }
    }

    /// Slot history backing the short term load.
    pub fn slots(&self) -> &BitWindowHistory<WORDS> {
        &self.short
    }

    /// Number of medium and long term samples currently held.
    pub fn depth(&self) -> (usize, usize) {
        (self.medium.len(), self.long.len())
    }
}
