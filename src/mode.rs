//! # Pilot heater operating modes

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::pilot_wire::PilotOrder;

/// Commanded operating mode of the heater.
///
/// Only `Auto` runs the control loop. The other modes hold a fixed
/// pilot-wire order for as long as they are active.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    EnumIter,
)]
pub enum Mode {
    #[serde(rename = "stop")]
    #[strum(serialize = "stop")]
    Stop,
    #[serde(rename = "auto")]
    #[strum(serialize = "auto")]
    Auto,
    #[serde(rename = "anti")]
    #[strum(serialize = "anti")]
    Antifreeze,
    #[default]
    #[serde(rename = "eco")]
    #[strum(serialize = "eco")]
    Eco,
}

impl Mode {
    /// Parse a mode name, falling back to `Eco` for anything unknown.
    pub fn parse_or_eco(name: &str) -> Self {
        Self::from_str(name).unwrap_or_else(|_| {
            log::warn!("Unknown heater mode {name:?}, falling back to eco");
            Self::Eco
        })
    }

    /// Transition to `next`.
    ///
    /// # Returns
    /// The new mode, or `None` if `next` is the current mode and nothing
    /// has to happen.
    pub fn transition(self, next: Mode) -> Option<Mode> {
        (self != next).then_some(next)
    }

    /// Pilot-wire order held while in this mode. `None` in `Auto` where
    /// the order is decided slot by slot.
    pub fn fixed_order(self) -> Option<PilotOrder> {
        match self {
            Mode::Stop => Some(PilotOrder::Stop),
            Mode::Antifreeze => Some(PilotOrder::Antifreeze),
            Mode::Eco => Some(PilotOrder::Eco),
            Mode::Auto => None,
        }
    }

    /// Bit recorded in the energy history for a slot spent in this mode.
    ///
    /// The heater may still run on its own thermostat in `Eco` or
    /// `Antifreeze` but that heat is not commanded by the regulator and is
    /// not accounted. `Auto` slots record the control decision instead.
    pub fn accounting_bit(self) -> Option<bool> {
        match self {
            Mode::Stop | Mode::Antifreeze | Mode::Eco => Some(false),
            Mode::Auto => None,
        }
    }
}
