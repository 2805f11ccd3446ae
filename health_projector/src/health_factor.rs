use std::cmp::Ordering;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants::{DISPLAY_DECIMALS, INFINITE_DISPLAY, LIQUIDATION_HEALTH_FACTOR};
use crate::errors::{ProjectionError, Result};

/// Health factor of a borrowing position.
///
/// A position without debt has no meaningful ratio and is `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HealthFactor {
    Finite(Decimal),
    Infinite,
}

/// Risk bucket a health factor falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Liquidatable,
    AtRisk,
    Healthy,
}

impl HealthFactor {
    pub const ZERO: HealthFactor = HealthFactor::Finite(Decimal::ZERO);

    pub fn finite(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(ProjectionError::invalid_input(format!(
                "health factor cannot be negative, got {}",
                value
            )));
        }
        Ok(Self::Finite(value))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// The finite ratio, `None` when there is no debt
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Finite(value) => Some(*value),
            Self::Infinite => None,
        }
    }

    /// Classifies the health factor.
    ///
    /// Below 1 is liquidatable, up to and including `at_risk_threshold` is at
    /// risk, anything else (including no debt) is healthy.
    pub fn status(&self, at_risk_threshold: Decimal) -> HealthStatus {
        match self {
            Self::Infinite => HealthStatus::Healthy,
            Self::Finite(value) if *value < LIQUIDATION_HEALTH_FACTOR => {
                HealthStatus::Liquidatable
            }
            Self::Finite(value) if *value <= at_risk_threshold => HealthStatus::AtRisk,
            Self::Finite(_) => HealthStatus::Healthy,
        }
    }

    /// Two decimal places, halves rounded away from zero; `∞` without debt.
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Finite(value) => {
                let rounded = value.round_dp_with_strategy(
                    DISPLAY_DECIMALS,
                    RoundingStrategy::MidpointAwayFromZero,
                );
                format!("{:.2}", rounded)
            }
            Self::Infinite => INFINITE_DISPLAY.to_string(),
        }
    }
}

impl PartialOrd for HealthFactor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HealthFactor {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => a.cmp(b),
            (Self::Finite(_), Self::Infinite) => Ordering::Less,
            (Self::Infinite, Self::Finite(_)) => Ordering::Greater,
            (Self::Infinite, Self::Infinite) => Ordering::Equal,
        }
    }
}

impl fmt::Display for HealthFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{}", value),
            Self::Infinite => f.write_str(INFINITE_DISPLAY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_buckets() {
        let at_risk = dec!(1.1);
        assert_eq!(
            HealthFactor::Finite(dec!(0.99)).status(at_risk),
            HealthStatus::Liquidatable
        );
        assert_eq!(
            HealthFactor::Finite(dec!(1)).status(at_risk),
            HealthStatus::AtRisk
        );
        assert_eq!(
            HealthFactor::Finite(dec!(1.1)).status(at_risk),
            HealthStatus::AtRisk
        );
        assert_eq!(
            HealthFactor::Finite(dec!(1.11)).status(at_risk),
            HealthStatus::Healthy
        );
        assert_eq!(HealthFactor::Infinite.status(at_risk), HealthStatus::Healthy);
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(HealthFactor::Finite(dec!(2.4)).to_display_string(), "2.40");
        assert_eq!(HealthFactor::Finite(dec!(1.005)).to_display_string(), "1.01");
        assert_eq!(HealthFactor::Finite(dec!(1.0049)).to_display_string(), "1.00");
        assert_eq!(HealthFactor::ZERO.to_display_string(), "0.00");
        assert_eq!(HealthFactor::Infinite.to_display_string(), "∞");
    }

    #[test]
    fn test_infinite_orders_above_any_ratio() {
        assert!(HealthFactor::Infinite > HealthFactor::Finite(dec!(1000000000)));
        assert!(HealthFactor::Finite(dec!(1.2)) > HealthFactor::Finite(dec!(1.19)));
    }

    #[test]
    fn test_negative_health_factor_is_rejected() {
        assert!(HealthFactor::finite(dec!(-1)).is_err());
        assert_eq!(
            HealthFactor::finite(dec!(1.5)).unwrap().value(),
            Some(dec!(1.5))
        );
    }

    #[test]
    fn test_serialization_is_tagged() {
        let json = serde_json::to_value(HealthFactor::Finite(dec!(2.4))).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "finite", "value": "2.4" }));

        let json = serde_json::to_value(HealthFactor::Infinite).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "infinite" }));
    }
}
