//! Conversion of raw on-chain account data into an `AccountPosition`.
//!
//! The account-data query returns unsigned 256-bit fixed-point integers:
//! totals scaled by `10^8`, the health factor scaled by `10^18` (with the max
//! uint as the "no debt" marker) and thresholds in basis points.

use alloy::primitives::U256;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{BASE_CURRENCY_DECIMALS, HEALTH_FACTOR_DECIMALS, MAX_DECIMAL_SCALE};
use crate::errors::{ProjectionError, Result};
use crate::health_factor::HealthFactor;
use crate::models::AccountPosition;
use crate::ratio::Ratio;

/// Fixed-point scaling of the values returned by the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPointScale {
    pub base_currency_decimals: u32,
    pub health_factor_decimals: u32,
}

impl Default for FixedPointScale {
    fn default() -> Self {
        Self {
            base_currency_decimals: BASE_CURRENCY_DECIMALS,
            health_factor_decimals: HEALTH_FACTOR_DECIMALS,
        }
    }
}

/// Account data exactly as the chain query returns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAccountData {
    pub total_collateral_base: U256,
    pub total_debt_base: U256,
    /// Basis points
    pub current_liquidation_threshold: U256,
    /// Basis points
    pub ltv: U256,
    pub health_factor: U256,
}

impl RawAccountData {
    pub fn normalize(&self, scale: FixedPointScale) -> Result<AccountPosition> {
        let total_collateral_base =
            fixed_point_to_decimal(self.total_collateral_base, scale.base_currency_decimals)?;
        let total_debt_base =
            fixed_point_to_decimal(self.total_debt_base, scale.base_currency_decimals)?;

        Ok(AccountPosition {
            total_collateral_base,
            total_debt_base,
            current_liquidation_threshold: bps_to_ratio(self.current_liquidation_threshold)?,
            ltv: bps_to_ratio(self.ltv)?,
            health_factor: health_factor_from_fixed_point(
                self.health_factor,
                scale.health_factor_decimals,
                total_debt_base,
            )?,
        })
    }
}

/// Divides `value` by `10^decimals` without going through floating point.
///
/// The integer and fractional parts are converted separately so values whose
/// raw integer exceeds the 96-bit `Decimal` mantissa still convert as long as
/// the integer part fits.
pub fn fixed_point_to_decimal(value: U256, decimals: u32) -> Result<Decimal> {
    if decimals > MAX_DECIMAL_SCALE {
        return Err(ProjectionError::invalid_input(format!(
            "at most {} fixed-point decimals are supported, got {}",
            MAX_DECIMAL_SCALE, decimals
        )));
    }

    let precision = U256::from(10u64).pow(U256::from(decimals));
    let quotient = value / precision;
    let remainder = value % precision;

    let whole = u128::try_from(quotient)
        .ok()
        .and_then(Decimal::from_u128)
        .ok_or(ProjectionError::Overflow {
            operation: "fixed-point integer part",
        })?;

    // remainder < 10^28, which always fits an i128 mantissa
    let fraction = u128::try_from(remainder)
        .ok()
        .and_then(|remainder| i128::try_from(remainder).ok())
        .and_then(|remainder| Decimal::try_from_i128_with_scale(remainder, decimals).ok())
        .ok_or(ProjectionError::Overflow {
            operation: "fixed-point fractional part",
        })?;

    whole
        .checked_add(fraction)
        .map(|value| value.normalize())
        .ok_or(ProjectionError::Overflow {
            operation: "fixed-point value",
        })
}

pub fn bps_to_ratio(value: U256) -> Result<Ratio> {
    let bps = u32::try_from(value).map_err(|_| ProjectionError::RatioOutOfRange {
        value: format!("{} bps", value),
    })?;
    Ratio::from_bps(bps)
}

/// The max uint health factor, or any position without debt, is `Infinite`.
pub fn health_factor_from_fixed_point(
    value: U256,
    decimals: u32,
    total_debt_base: Decimal,
) -> Result<HealthFactor> {
    if value == U256::MAX || total_debt_base.is_zero() {
        return Ok(HealthFactor::Infinite);
    }
    HealthFactor::finite(fixed_point_to_decimal(value, decimals)?)
}
