//! # Pilot heater
//!
//! Regulation core of an electric heater driven over a pilot wire. A
//! time-proportioning PID loop decides in each heating cycle how many
//! slots the heater runs in comfort. The slot stream is folded into
//! short, medium and long term heating load.
//!
//! The crate is `no_std`. Time comes from a free-running millisecond
//! counter polled through [scheduler::Scheduler], temperatures and mode
//! changes are pushed in by the caller, and the pilot wire is driven
//! through the [pilot_wire::PilotWire] trait.
#![cfg_attr(not(test), no_std)]

pub mod bit_history;
pub mod energy;
pub mod error;
pub mod mode;
pub mod pilot_wire;
pub mod regulator;
pub mod scheduler;
pub mod settings;
pub mod statistics;
pub mod telemetry;

pub use error::ConfigurationError;
pub use mode::Mode;
pub use pilot_wire::{PilotOrder, PilotWire};
pub use regulator::HeatingRegulator;
pub use settings::Settings;
pub use telemetry::Telemetry;

/// Room temperature measurements averaged for the control law.
pub const TEMPERATURE_WINDOW: usize = 5;

/// Span of the short term energy window in milliseconds.
pub const SHORT_TERM_PERIOD_MS: u32 = 600_000;

/// Storage of the short term window in 32-bit words (1280 slots). Slots
/// shorter than 469 ms do not fit.
pub const SHORT_TERM_WORDS: usize = 40;

/// Short term samples averaged into the medium term (2 hours).
pub const MEDIUM_TERM_SIZE: usize = 12;

/// Medium term samples averaged into the long term (1 day).
pub const LONG_TERM_SIZE: usize = 12;

/// Energy history of one heater.
pub type HeatingHistory =
    energy::EnergyHistory<SHORT_TERM_WORDS, MEDIUM_TERM_SIZE, LONG_TERM_SIZE>;
