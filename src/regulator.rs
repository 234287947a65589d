//! # Pilot heater regulator
//!
//! A heating cycle is split into `slot_count` slots. At the start of every
//! cycle in `Auto` mode a PID law turns the error between the setpoint and
//! the mean room temperature into a number of "on" slots. The heater is
//! then driven in comfort for that many slots and stopped for the rest of
//! the cycle. Every slot is recorded in the energy history.
//!
//! The integral term is clamped so that on its own it can never move the
//! duty by more than half a cycle, which leaves headroom to the
//! proportional and derivative terms and bounds the overshoot after a long
//! deviation (e.g. a cold start).

use num_traits::Float as _;

use crate::error::ConfigurationError;
use crate::mode::Mode;
use crate::pilot_wire::{PilotOrder, PilotWire};
use crate::settings::Settings;
use crate::statistics::WindowedAverage;
use crate::telemetry::Telemetry;
use crate::{HeatingHistory, TEMPERATURE_WINDOW};

/// Regulation of one heater.
pub struct HeatingRegulator<P: PilotWire> {
    wire: P,
    mode: Mode,

    kp: f32,
    ki: f32,
    kd: f32,
    pwm_offset: f32,
    slot_count: u32,
    default_temperature: f32,

    setpoint: f32,
    integral_component: f32,
    last_mean_temperature: f32,
    derivative: f32,
    actual_pwm: u32,
    slot_counter: u32,

    temperature: WindowedAverage<TEMPERATURE_WINDOW>,
    history: HeatingHistory,
}

impl<P: PilotWire> HeatingRegulator<P> {
    /// Construct a regulator in `Eco` mode.
    ///
    /// # Args
    /// * `settings` - Settings, validated here and not read again.
    /// * `wire` - The pilot wire of the heater. It is set to eco right away.
    pub fn new(
        settings: &Settings,
        wire: P,
    ) -> Result<Self, ConfigurationError> {
        let config = settings.config()?;
        let mut regulator = Self {
            wire,
            mode: Mode::Eco,
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
            pwm_offset: config.pwm_offset(),
            slot_count: config.slot_count,
            default_temperature: config.default_temperature,
            setpoint: config.default_temperature,
            integral_component: 0.,
            last_mean_temperature: config.default_temperature,
            derivative: 0.,
            actual_pwm: 0,
            slot_counter: 0,
            temperature: WindowedAverage::new(),
            history: HeatingHistory::new(config.short_term_size)?,
        };
        regulator.apply_fixed_order();
        Ok(regulator)
    }

    /// Change the operating mode.
    ///
    /// Entering `Auto` starts a fresh cycle at slot 0. Fixed modes drive
    /// their order immediately, also when already active.
    pub fn set_mode(&mut self, mode: Mode) {
        if let Some(next) = self.mode.transition(mode) {
            log::info!(
                "Heater mode {} -> {}",
                self.mode.as_ref(),
                next.as_ref()
            );
            self.mode = next;
            self.slot_counter = 0;
        }
        self.apply_fixed_order();
    }

    /// Set the desired temperature. Used from the next cycle on.
    pub fn set_setpoint(&mut self, temperature: f32) {
        self.setpoint = temperature;
    }

    /// Record a room temperature measurement.
    ///
    /// Non-finite readings (e.g. a failed sensor read) are dropped.
    pub fn observe_temperature(&mut self, temperature: f32) {
        if !temperature.is_finite() {
            log::warn!("Dropping room temperature {temperature}");
            return;
        }
        self.temperature.push(temperature);
    }

    /// Advance by one slot.
    ///
    /// # Returns
    /// Whether the heater is commanded on during this slot.
    pub fn tick(&mut self) -> bool {
        if let Some(bit) = self.mode.accounting_bit() {
            self.history.push(bit);
            self.slot_counter = 0;
            return false;
        }

        if self.slot_counter == 0 {
            self.update_duty();
        }

        let on = self.slot_counter < self.actual_pwm;
        self.wire.set_order(if on {
            PilotOrder::Comfort
        } else {
            PilotOrder::Stop
        });
        self.history.push(on);

        self.slot_counter += 1;
        if self.slot_counter == self.slot_count {
            self.slot_counter = 0;
        }
        on
    }

    /// Evaluate the control law at the start of a cycle.
    fn update_duty(&mut self) {
        let current = self.mean_room_temperature();
        let error = self.setpoint - current;
        self.integral_component += error;
        self.derivative = current - self.last_mean_temperature;
        self.last_mean_temperature = current;

        // Never true with a zero integral gain, so the division is safe.
        if (self.integral_component * self.ki).abs() > self.pwm_offset {
            let limit = self.pwm_offset / self.ki;
            self.integral_component = if self.integral_component > 0. {
                limit
            } else {
                -limit
            };
            log::trace!("Integral clamped to {}", self.integral_component);
        }

        let duty = error * self.kp + self.integral_component * self.ki
            - self.derivative * self.kd
            + self.pwm_offset
            + 0.5;
        // Saturating cast, NaN maps to 0.
        self.actual_pwm = (duty as i64).clamp(0, self.slot_count as i64) as u32;

        log::debug!(
            "Cycle start: temperature {current:.2}, error {error:.2}, duty {duty:.1}, pwm {}",
            self.actual_pwm
        );
    }

    fn apply_fixed_order(&mut self) {
        if let Some(order) = self.mode.fixed_order() {
            self.wire.set_order(order);
        }
    }

    pub fn current_mode(&self) -> Mode {
        self.mode
    }

    pub fn setpoint(&self) -> f32 {
        self.setpoint
    }

    /// "On" slots in the current cycle.
    pub fn actual_pwm(&self) -> u32 {
        self.actual_pwm
    }

    /// Position in the current cycle.
    pub fn slot_counter(&self) -> u32 {
        self.slot_counter
    }

    pub fn integral_component(&self) -> f32 {
        self.integral_component
    }

    pub fn derivative(&self) -> f32 {
        self.derivative
    }

    /// Mean of the measurement window, or the default temperature before
    /// the first measurement.
    pub fn mean_room_temperature(&self) -> f32 {
        self.temperature.mean(self.default_temperature)
    }

    pub fn short_term_energy(&self) -> f32 {
        self.history.short_term_energy()
    }

    pub fn medium_term_energy(&self) -> f32 {
        self.history.medium_term_energy()
    }

    pub fn long_term_energy(&self) -> f32 {
        self.history.long_term_energy()
    }

    pub fn history(&self) -> &HeatingHistory {
        &self.history
    }

    pub fn pilot_wire(&self) -> &P {
        &self.wire
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            mode: self.mode,
            setpoint: self.setpoint,
            temperature: self.mean_room_temperature(),
            pwm: self.actual_pwm,
            integral: self.integral_component,
            derivative: self.derivative,
            energy: self.history.energy(),
        }
    }
}
