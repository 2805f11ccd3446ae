use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{ProjectionError, Result};
use crate::health_factor::HealthFactor;
use crate::ratio::Ratio;

/// A user's aggregate lending position, in base currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountPosition {
    pub total_collateral_base: Decimal,
    pub total_debt_base: Decimal,
    /// Value-weighted average liquidation threshold of the collateral set
    pub current_liquidation_threshold: Ratio,
    pub ltv: Ratio,
    pub health_factor: HealthFactor,
}

/// Per-asset parameters needed to project a single-asset change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveParameters {
    /// Price of one token in base currency
    pub price: Decimal,
    pub liquidation_threshold: Ratio,
    pub usage_as_collateral_enabled: bool,
}

impl ReserveParameters {
    /// Converts a token amount to its base-currency value (`price × amount`)
    pub fn to_base_currency(&self, amount: Decimal) -> Result<Decimal> {
        if self.price < Decimal::ZERO {
            return Err(ProjectionError::invalid_input(format!(
                "price cannot be negative, got {}",
                self.price
            )));
        }
        if amount < Decimal::ZERO {
            return Err(ProjectionError::invalid_input(format!(
                "amount cannot be negative, got {}",
                amount
            )));
        }

        self.price
            .checked_mul(amount)
            .ok_or(ProjectionError::Overflow {
                operation: "amount in base currency",
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionAction {
    Supply,
    Withdraw,
    Borrow,
    Repay,
}

/// A hypothetical change of one asset, amount in token units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionDelta {
    pub action: PositionAction,
    pub amount: Decimal,
}

impl PositionDelta {
    pub fn new(action: PositionAction, amount: Decimal) -> Self {
        Self { action, amount }
    }
}

/// Outcome of projecting a `PositionDelta` onto an `AccountPosition`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub action: PositionAction,
    pub amount_in_base_currency: Decimal,
    pub total_collateral_base: Decimal,
    pub total_debt_base: Decimal,
    /// `None` once the projected collateral is zero
    pub liquidation_threshold: Option<Ratio>,
    pub health_factor: HealthFactor,
}
