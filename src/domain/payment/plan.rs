//! Membership plans and the pricing table.
//!
//! The price of an order is derived from its plan here and nowhere else.
//! Request payloads never carry an amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The single currency every order is charged in.
pub const CURRENCY: &str = "INR";

/// Minor units per whole currency unit (paise per rupee).
pub const MINOR_UNITS_PER_UNIT: u64 = 100;

/// Membership plan sold by the gym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    /// Gym floor access.
    Standard,

    /// Gym floor plus group classes.
    Ultimate,

    /// Everything plus personal training sessions.
    Professional,
}

impl Plan {
    /// Every plan in the pricing table.
    pub const ALL: [Plan; 3] = [Plan::Standard, Plan::Ultimate, Plan::Professional];

    /// Price in whole currency units.
    pub fn price(&self) -> u32 {
        match self {
            Plan::Standard => 999,
            Plan::Ultimate => 1999,
            Plan::Professional => 2999,
        }
    }

    /// Price in minor units, as the payment provider expects it.
    pub fn price_minor_units(&self) -> u64 {
        u64::from(self.price()) * MINOR_UNITS_PER_UNIT
    }

    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Standard => "STANDARD",
            Plan::Ultimate => "ULTIMATE",
            Plan::Professional => "PROFESSIONAL",
        }
    }
}

impl FromStr for Plan {
    type Err = ValidationError;

    /// Case-insensitive lookup in the pricing table.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STANDARD" => Ok(Plan::Standard),
            "ULTIMATE" => Ok(Plan::Ultimate),
            "PROFESSIONAL" => Ok(Plan::Professional),
            "" => Err(ValidationError::empty_field("plan")),
            _ => Err(ValidationError::invalid_format(
                "plan",
                format!("unknown plan '{}'", s.trim()),
            )),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
