//! # Pilot heater telemetry
//!
//! Status of the regulator, reported regularly by the messaging
//! collaborator. All values are in °C, slots and percent, encoded as
//! compact JSON.

use heapless::Vec;
use serde::Serialize;

use crate::energy::Energy;
use crate::mode::Mode;

/// Snapshot of the regulator state.
#[derive(Serialize, Copy, Clone, Debug, PartialEq)]
pub struct Telemetry {
    pub mode: Mode,
    /// Desired room temperature.
    pub setpoint: f32,
    /// Mean room temperature over the measurement window.
    pub temperature: f32,
    /// "On" slots in the current cycle.
    pub pwm: u32,
    pub integral: f32,
    /// Change of the mean temperature over the last cycle.
    pub derivative: f32,
    pub energy: Energy,
}

impl Telemetry {
    /// Encode as JSON into a buffer of `N` bytes.
    pub fn to_json<const N: usize>(
        &self,
    ) -> Result<Vec<u8, N>, serde_json_core::ser::Error> {
        serde_json_core::to_vec(self)
    }
}
