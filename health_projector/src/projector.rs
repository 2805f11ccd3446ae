//! Health factor projection
//!
//! Pure functions projecting a position's health factor after a hypothetical
//! supply, withdraw, borrow or repay of a single asset. No I/O, no shared
//! state; every function is safe to call from any number of threads.
//!
//! All amounts are base-currency values. Arithmetic is checked `Decimal`
//! arithmetic without intermediate rounding.

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::errors::{ProjectionError, Result};
use crate::health_factor::HealthFactor;
use crate::models::{AccountPosition, PositionAction, PositionDelta, Projection, ReserveParameters};
use crate::ratio::Ratio;

fn ensure_non_negative(value: Decimal, name: &str) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(ProjectionError::invalid_input(format!(
            "{} cannot be negative, got {}",
            name, value
        )));
    }
    Ok(())
}

fn checked(value: Option<Decimal>, operation: &'static str) -> Result<Decimal> {
    value.ok_or(ProjectionError::Overflow { operation })
}

/// Collateral value weighted by its liquidation threshold
fn weighted(amount: Decimal, threshold: Ratio) -> Result<Decimal> {
    checked(
        amount.checked_mul(threshold.value()),
        "threshold-weighted collateral",
    )
}

/// `C × lt + A × lt_asset`
fn weighted_collateral_after_supply(
    total_collateral_base: Decimal,
    amount_to_supply_in_base_currency: Decimal,
    current_liquidation_threshold: Ratio,
    asset_liquidation_threshold: Ratio,
) -> Result<Decimal> {
    let current = weighted(total_collateral_base, current_liquidation_threshold)?;
    let added = weighted(amount_to_supply_in_base_currency, asset_liquidation_threshold)?;
    checked(current.checked_add(added), "weighted collateral after supply")
}

/// `C × lt − A × lt_asset`, which can only go negative when the asset
/// threshold is inconsistent with the position's blended threshold
fn weighted_collateral_after_withdraw(
    total_collateral_base: Decimal,
    amount_to_withdraw_in_base_currency: Decimal,
    current_liquidation_threshold: Ratio,
    asset_liquidation_threshold: Ratio,
) -> Result<Decimal> {
    let current = weighted(total_collateral_base, current_liquidation_threshold)?;
    let removed = weighted(amount_to_withdraw_in_base_currency, asset_liquidation_threshold)?;
    let remaining = checked(
        current.checked_sub(removed),
        "weighted collateral after withdraw",
    )?;

    if remaining < Decimal::ZERO {
        return Err(ProjectionError::invalid_input(format!(
            "withdrawn collateral weight {} exceeds the position's weighted collateral {}",
            removed, current
        )));
    }
    Ok(remaining)
}

/// `weighted collateral / debt`, `Infinite` without debt
fn health_factor_from_weighted(
    weighted_collateral: Decimal,
    total_debt_base: Decimal,
) -> Result<HealthFactor> {
    if total_debt_base.is_zero() {
        return Ok(HealthFactor::Infinite);
    }

    let value = checked(
        weighted_collateral.checked_div(total_debt_base),
        "health factor",
    )?;
    HealthFactor::finite(value)
}

/// Value-weighted liquidation threshold of a collateral set, `None` when
/// there is no collateral to weight
pub fn blended_liquidation_threshold(
    weighted_collateral: Decimal,
    total_collateral_base: Decimal,
) -> Result<Option<Ratio>> {
    if total_collateral_base.is_zero() {
        return Ok(None);
    }

    let value = checked(
        weighted_collateral.checked_div(total_collateral_base),
        "blended liquidation threshold",
    )?;
    Ratio::new(value).map(Some)
}

/// Projects the health factor after supplying collateral.
///
/// The new liquidation threshold is the value-weighted blend of the existing
/// collateral and the supplied asset, so the health factor becomes
/// `(C × lt + A × lt_asset) / D`. Without debt the result stays `Infinite`.
pub fn project_after_supply(
    total_collateral_base: Decimal,
    amount_to_supply_in_base_currency: Decimal,
    current_liquidation_threshold: Ratio,
    asset_liquidation_threshold: Ratio,
    total_debt_base: Decimal,
    current_health_factor: HealthFactor,
) -> Result<HealthFactor> {
    ensure_non_negative(total_collateral_base, "total collateral")?;
    ensure_non_negative(amount_to_supply_in_base_currency, "supply amount")?;
    ensure_non_negative(total_debt_base, "total debt")?;

    if total_debt_base.is_zero() {
        trace!(%current_health_factor, "no debt, health factor stays infinite");
        return Ok(HealthFactor::Infinite);
    }

    // With debt outstanding and no collateral at all this yields 0
    let weighted_collateral = weighted_collateral_after_supply(
        total_collateral_base,
        amount_to_supply_in_base_currency,
        current_liquidation_threshold,
        asset_liquidation_threshold,
    )?;
    health_factor_from_weighted(weighted_collateral, total_debt_base)
}

/// Projects the health factor after withdrawing collateral.
///
/// Withdrawing an asset that does not count as collateral leaves the health
/// factor untouched. Otherwise the weighting is reversed:
/// `(C × lt − A × lt_asset) / D`. Draining the collateral to exactly zero
/// with debt outstanding is the worst case, a health factor of 0.
///
/// The withdrawal is not clamped: withdrawing more collateral than the
/// position holds is an `InvalidInput` error.
pub fn project_after_withdraw(
    total_collateral_base: Decimal,
    amount_to_withdraw_in_base_currency: Decimal,
    current_liquidation_threshold: Ratio,
    asset_liquidation_threshold: Ratio,
    total_debt_base: Decimal,
    current_health_factor: HealthFactor,
    asset_usage_as_collateral_enabled: bool,
) -> Result<HealthFactor> {
    ensure_non_negative(total_collateral_base, "total collateral")?;
    ensure_non_negative(amount_to_withdraw_in_base_currency, "withdraw amount")?;
    ensure_non_negative(total_debt_base, "total debt")?;

    if total_debt_base.is_zero() {
        return Ok(HealthFactor::Infinite);
    }

    if !asset_usage_as_collateral_enabled {
        return Ok(current_health_factor);
    }

    let new_total_collateral_base = checked(
        total_collateral_base.checked_sub(amount_to_withdraw_in_base_currency),
        "collateral after withdraw",
    )?;
    if new_total_collateral_base < Decimal::ZERO {
        return Err(ProjectionError::invalid_input(format!(
            "withdraw amount {} exceeds total collateral {}",
            amount_to_withdraw_in_base_currency, total_collateral_base
        )));
    }
    if new_total_collateral_base.is_zero() {
        return Ok(HealthFactor::ZERO);
    }

    let weighted_collateral = weighted_collateral_after_withdraw(
        total_collateral_base,
        amount_to_withdraw_in_base_currency,
        current_liquidation_threshold,
        asset_liquidation_threshold,
    )?;
    health_factor_from_weighted(weighted_collateral, total_debt_base)
}

/// Projects the health factor after borrowing: `C × lt / (D + A)`
pub fn project_after_borrow(
    total_collateral_base: Decimal,
    current_liquidation_threshold: Ratio,
    total_debt_base: Decimal,
    amount_to_borrow_in_base_currency: Decimal,
) -> Result<HealthFactor> {
    ensure_non_negative(total_collateral_base, "total collateral")?;
    ensure_non_negative(total_debt_base, "total debt")?;
    ensure_non_negative(amount_to_borrow_in_base_currency, "borrow amount")?;

    let new_total_debt_base = checked(
        total_debt_base.checked_add(amount_to_borrow_in_base_currency),
        "debt after borrow",
    )?;
    let weighted_collateral = weighted(total_collateral_base, current_liquidation_threshold)?;
    health_factor_from_weighted(weighted_collateral, new_total_debt_base)
}

/// Projects the health factor after repaying debt: `C × lt / (D − A)`.
///
/// Repaying everything makes the health factor `Infinite`; repaying more than
/// the outstanding debt is an `InvalidInput` error.
pub fn project_after_repay(
    total_collateral_base: Decimal,
    current_liquidation_threshold: Ratio,
    total_debt_base: Decimal,
    amount_to_repay_in_base_currency: Decimal,
) -> Result<HealthFactor> {
    ensure_non_negative(total_collateral_base, "total collateral")?;
    ensure_non_negative(total_debt_base, "total debt")?;
    ensure_non_negative(amount_to_repay_in_base_currency, "repay amount")?;

    if amount_to_repay_in_base_currency > total_debt_base {
        return Err(ProjectionError::invalid_input(format!(
            "repay amount {} exceeds total debt {}",
            amount_to_repay_in_base_currency, total_debt_base
        )));
    }

    let new_total_debt_base = checked(
        total_debt_base.checked_sub(amount_to_repay_in_base_currency),
        "debt after repay",
    )?;
    let weighted_collateral = weighted(total_collateral_base, current_liquidation_threshold)?;
    health_factor_from_weighted(weighted_collateral, new_total_debt_base)
}

/// Projects a token-denominated change of one asset onto a position.
///
/// The amount is converted to base currency with the reserve price, then the
/// matching projection runs. Newly supplied assets always count as collateral.
pub fn project(
    position: &AccountPosition,
    reserve: &ReserveParameters,
    delta: PositionDelta,
) -> Result<Projection> {
    let amount = reserve.to_base_currency(delta.amount)?;
    let collateral = position.total_collateral_base;
    let debt = position.total_debt_base;
    let threshold = position.current_liquidation_threshold;

    let current_threshold =
        || blended_liquidation_threshold(weighted(collateral, threshold)?, collateral);

    let projection = match delta.action {
        PositionAction::Supply => {
            let health_factor = project_after_supply(
                collateral,
                amount,
                threshold,
                reserve.liquidation_threshold,
                debt,
                position.health_factor,
            )?;
            let total_collateral_base =
                checked(collateral.checked_add(amount), "collateral after supply")?;
            let weighted_collateral = weighted_collateral_after_supply(
                collateral,
                amount,
                threshold,
                reserve.liquidation_threshold,
            )?;

            Projection {
                action: delta.action,
                amount_in_base_currency: amount,
                total_collateral_base,
                total_debt_base: debt,
                liquidation_threshold: blended_liquidation_threshold(
                    weighted_collateral,
                    total_collateral_base,
                )?,
                health_factor,
            }
        }
        PositionAction::Withdraw if !reserve.usage_as_collateral_enabled => Projection {
            action: delta.action,
            amount_in_base_currency: amount,
            total_collateral_base: collateral,
            total_debt_base: debt,
            liquidation_threshold: current_threshold()?,
            health_factor: project_after_withdraw(
                collateral,
                amount,
                threshold,
                reserve.liquidation_threshold,
                debt,
                position.health_factor,
                false,
            )?,
        },
        PositionAction::Withdraw => {
            let health_factor = project_after_withdraw(
                collateral,
                amount,
                threshold,
                reserve.liquidation_threshold,
                debt,
                position.health_factor,
                true,
            )?;
            let total_collateral_base =
                checked(collateral.checked_sub(amount), "collateral after withdraw")?;
            if total_collateral_base < Decimal::ZERO {
                return Err(ProjectionError::invalid_input(format!(
                    "withdraw amount {} exceeds total collateral {}",
                    amount, collateral
                )));
            }
            let liquidation_threshold = if total_collateral_base.is_zero() {
                None
            } else {
                let weighted_collateral = weighted_collateral_after_withdraw(
                    collateral,
                    amount,
                    threshold,
                    reserve.liquidation_threshold,
                )?;
                blended_liquidation_threshold(weighted_collateral, total_collateral_base)?
            };

            Projection {
                action: delta.action,
                amount_in_base_currency: amount,
                total_collateral_base,
                total_debt_base: debt,
                liquidation_threshold,
                health_factor,
            }
        }
        PositionAction::Borrow => Projection {
            action: delta.action,
            amount_in_base_currency: amount,
            total_collateral_base: collateral,
            total_debt_base: checked(debt.checked_add(amount), "debt after borrow")?,
            liquidation_threshold: current_threshold()?,
            health_factor: project_after_borrow(collateral, threshold, debt, amount)?,
        },
        PositionAction::Repay => {
            let health_factor = project_after_repay(collateral, threshold, debt, amount)?;
            Projection {
                action: delta.action,
                amount_in_base_currency: amount,
                total_collateral_base: collateral,
                total_debt_base: checked(debt.checked_sub(amount), "debt after repay")?,
                liquidation_threshold: current_threshold()?,
                health_factor,
            }
        }
    };

    debug!(
        action = ?projection.action,
        amount_in_base_currency = %projection.amount_in_base_currency,
        current = %position.health_factor,
        projected = %projection.health_factor,
        "Projected position"
    );

    Ok(projection)
}
