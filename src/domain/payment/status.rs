//! Order status state machine.
//!
//! An order starts `Pending` and is finalized exactly once, to either
//! `Success` or `Failed`. Both terminal states have no exits.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created with the provider, awaiting payment confirmation.
    Pending,

    /// Payment confirmed with a valid provider signature.
    Success,

    /// Confirmation attempted with an invalid signature.
    Failed,
}

impl OrderStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Success => "success",
            OrderStatus::Failed => "failed",
        }
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!((self, target), (Pending, Success) | (Pending, Failed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![Success, Failed],
            Success | Failed => vec![],
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "success" => Ok(OrderStatus::Success),
            "failed" => Ok(OrderStatus::Failed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown order status '{}'", other),
            )),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_finalize_either_way() {
        assert_eq!(
            OrderStatus::Pending.transition_to(OrderStatus::Success),
            Ok(OrderStatus::Success)
        );
        assert_eq!(
            OrderStatus::Pending.transition_to(OrderStatus::Failed),
            Ok(OrderStatus::Failed)
        );
    }

    #[test]
    fn terminal_states_do_not_move() {
        for terminal in [OrderStatus::Success, OrderStatus::Failed] {
            assert!(terminal.is_terminal());
            for target in [OrderStatus::Pending, OrderStatus::Success, OrderStatus::Failed] {
                assert!(terminal.transition_to(target).is_err());
            }
        }
    }

    #[test]
    fn pending_cannot_stay_pending() {
        assert!(!OrderStatus::Pending.can_transition_to(&OrderStatus::Pending));
    }

    #[test]
    fn storage_strings_round_trip() {
        for status in [OrderStatus::Pending, OrderStatus::Success, OrderStatus::Failed] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OrderStatus::Success).unwrap(), "\"success\"");
    }
}
