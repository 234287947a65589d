//! # Pilot heater configuration errors

use thiserror_no_std::Error;

/// Invalid parameters rejected before a regulator is built.
///
/// Nothing fails once a regulator exists: empty windows fall back to
/// defaults and saturated demands are clamped.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("a heating cycle needs at least one slot")]
    NoSlots,
    #[error("slot duration must be non-zero")]
    ZeroSlotDuration,
    #[error("temperature measurement period must be non-zero")]
    ZeroMeasurementPeriod,
    #[error("telemetry period must be non-zero")]
    ZeroTelemetryPeriod,
    #[error("heating cycle overflows the millisecond counter")]
    CycleTooLong,
    /// The anti-windup clamp assumes a non-negative integral gain.
    #[error("integral gain must not be negative")]
    NegativeIntegralGain,
    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
    #[error("window must hold at least one sample")]
    EmptyWindow,
    #[error("window of {requested} samples exceeds its storage of {capacity}")]
    WindowTooLarge { requested: usize, capacity: usize },
}
