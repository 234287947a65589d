//! # Pilot heater settings
//!
//! Runtime settings tree of one heater. The tree can be exposed to a
//! settings client (e.g. over MQTT); the regulator reads it once when it is
//! constructed.

use fugit::MillisDurationU32;
use miniconf::Tree;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::mode::Mode;
use crate::SHORT_TERM_PERIOD_MS;

#[derive(Clone, Debug, Tree, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Proportional gain.
    ///
    /// # Value
    /// Slots per kelvin of error.
    pub kp: f32,

    /// Integral gain.
    ///
    /// # Value
    /// Slots per accumulated kelvin. Must not be negative.
    pub ki: f32,

    /// Derivative gain.
    ///
    /// # Value
    /// Slots per kelvin of change between two cycles.
    pub kd: f32,

    /// Number of slots in a heating cycle.
    pub slot_count: u32,

    /// Duration of a slot in milliseconds.
    pub slot_duration_ms: u32,

    /// Period of the room temperature measurement in milliseconds.
    pub measurement_period_ms: u32,

    /// Room temperature assumed before the first measurement, also the
    /// setpoint until one is received.
    ///
    /// # Value
    /// °C
    pub default_temperature: f32,

    /// Offset added to every raw sensor reading.
    ///
    /// # Value
    /// K
    pub temperature_offset: f32,

    /// Mode applied at startup.
    #[tree(with=miniconf::leaf)]
    pub mode: Mode,

    /// Telemetry output period in milliseconds.
    pub telemetry_period_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        const SLOTS: u32 = 30;
        Self {
            kp: SLOTS as f32 * 0.8,
            ki: 0.5,
            kd: 20.0,
            slot_count: SLOTS,
            slot_duration_ms: 1000,
            measurement_period_ms: 6000,
            default_temperature: 19.0,
            temperature_offset: 0.0,
            mode: Mode::Eco,
            telemetry_period_ms: 60_000,
        }
    }
}

impl Settings {
    /// Validate the settings.
    ///
    /// # Returns
    /// The regulator configuration, or the first invalid parameter.
    pub fn config(&self) -> Result<RegulatorConfig, ConfigurationError> {
        if self.slot_count == 0 {
            return Err(ConfigurationError::NoSlots);
        }
        if self.slot_duration_ms == 0 {
            return Err(ConfigurationError::ZeroSlotDuration);
        }
        if self.measurement_period_ms == 0 {
            return Err(ConfigurationError::ZeroMeasurementPeriod);
        }
        if self.telemetry_period_ms == 0 {
            return Err(ConfigurationError::ZeroTelemetryPeriod);
        }
        if self.slot_duration_ms.checked_mul(self.slot_count).is_none() {
            return Err(ConfigurationError::CycleTooLong);
        }
        for (name, value) in [
            ("kp", self.kp),
            ("ki", self.ki),
            ("kd", self.kd),
            ("default_temperature", self.default_temperature),
            ("temperature_offset", self.temperature_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite(name));
            }
        }
        if self.ki < 0.0 {
            return Err(ConfigurationError::NegativeIntegralGain);
        }
        Ok(RegulatorConfig {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
            slot_count: self.slot_count,
            slot_duration: MillisDurationU32::from_ticks(self.slot_duration_ms),
            measurement_period: MillisDurationU32::from_ticks(
                self.measurement_period_ms,
            ),
            default_temperature: self.default_temperature,
            short_term_size: (SHORT_TERM_PERIOD_MS / self.slot_duration_ms)
                as usize,
        })
    }

    /// Apply the sensor offset to a raw reading.
    pub fn calibrate(&self, raw: f32) -> f32 {
        raw + self.temperature_offset
    }
}

/// Validated regulator parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegulatorConfig {
    pub(crate) kp: f32,
    pub(crate) ki: f32,
    pub(crate) kd: f32,
    pub(crate) slot_count: u32,
    pub(crate) slot_duration: MillisDurationU32,
    pub(crate) measurement_period: MillisDurationU32,
    pub(crate) default_temperature: f32,
    pub(crate) short_term_size: usize,
}

impl RegulatorConfig {
    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    pub fn slot_duration(&self) -> MillisDurationU32 {
        self.slot_duration
    }

    /// Duration of a heating cycle. Fits a `u32` by construction.
    pub fn cycle_duration(&self) -> MillisDurationU32 {
        self.slot_duration * self.slot_count
    }

    pub fn measurement_period(&self) -> MillisDurationU32 {
        self.measurement_period
    }

    /// Number of slots in the short term energy window.
    pub fn short_term_size(&self) -> usize {
        self.short_term_size
    }

    /// Duty offset: half of the cycle.
    pub fn pwm_offset(&self) -> f32 {
        self.slot_count as f32 / 2.0
    }
}
