//! # Pilot wire orders
//!
//! The pilot wire is driven through two optotriacs, one passing the
//! positive and one the negative mains half-waves:
//!
//! | antifreeze | stop | order      |
//! |------------|------|------------|
//! | low        | low  | comfort    |
//! | low        | high | stop       |
//! | high       | low  | antifreeze |
//! | high       | high | eco        |
//!
//! Toggling the pins is left to the [PilotWire] implementation.

use serde::Serialize;
use strum::{AsRefStr, EnumIter};

/// Order sent to the heater over the pilot wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PilotOrder {
    Comfort,
    Eco,
    Stop,
    Antifreeze,
}

/// Level of an optotriac control pin.
#[derive(Copy, Clone, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// Levels of the two optotriac control pins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pins {
    pub antifreeze: Level,
    pub stop: Level,
}

impl PilotOrder {
    pub fn pins(self) -> Pins {
        let (antifreeze, stop) = match self {
            PilotOrder::Comfort => (false, false),
            PilotOrder::Stop => (false, true),
            PilotOrder::Antifreeze => (true, false),
            PilotOrder::Eco => (true, true),
        };
        Pins {
            antifreeze: antifreeze.into(),
            stop: stop.into(),
        }
    }

    /// Whether the heater element is commanded on by the regulator.
    pub fn is_heating(self) -> bool {
        self == PilotOrder::Comfort
    }
}

/// Actuator driving the pilot wire of one heater.
pub trait PilotWire {
    fn set_order(&mut self, order: PilotOrder);
}

impl<T: PilotWire + ?Sized> PilotWire for &mut T {
    fn set_order(&mut self, order: PilotOrder) {
        (**self).set_order(order)
    }
}
