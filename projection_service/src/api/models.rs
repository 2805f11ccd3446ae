use std::str::FromStr;

use alloy::primitives::U256;
use health_projector::{
    HealthFactor, HealthStatus, PositionAction, Projection, ProjectionError, Ratio,
    RawAccountData, ReserveParameters,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// Account data as returned by the chain query, integers as decimal strings
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDataPayload {
    pub total_collateral_base: String,
    pub total_debt_base: String,
    pub current_liquidation_threshold: String,
    pub ltv: String,
    pub health_factor: String,
}

impl AccountDataPayload {
    pub fn to_raw(&self) -> Result<RawAccountData, ApiError> {
        Ok(RawAccountData {
            total_collateral_base: parse_uint("total_collateral_base", &self.total_collateral_base)?,
            total_debt_base: parse_uint("total_debt_base", &self.total_debt_base)?,
            current_liquidation_threshold: parse_uint(
                "current_liquidation_threshold",
                &self.current_liquidation_threshold,
            )?,
            ltv: parse_uint("ltv", &self.ltv)?,
            health_factor: parse_uint("health_factor", &self.health_factor)?,
        })
    }
}

fn parse_uint(field: &'static str, value: &str) -> Result<U256, ApiError> {
    U256::from_str(value.trim()).map_err(|_| ApiError::InvalidField {
        field,
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReservePayload {
    /// Base currency per token
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub liquidation_threshold_bps: u32,
    pub usage_as_collateral_enabled: bool,
}

impl ReservePayload {
    pub fn to_parameters(&self) -> Result<ReserveParameters, ProjectionError> {
        Ok(ReserveParameters {
            price: self.price,
            liquidation_threshold: Ratio::from_bps(self.liquidation_threshold_bps)?,
            usage_as_collateral_enabled: self.usage_as_collateral_enabled,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionRequest {
    pub account: AccountDataPayload,
    pub reserve: ReservePayload,
    /// Token amount of the hypothetical change
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResponse {
    pub action: PositionAction,
    pub amount_in_base_currency: Decimal,
    pub current: HealthFactor,
    pub projected: HealthFactor,
    pub status: HealthStatus,
    pub current_display: String,
    pub projected_display: String,
    pub collateral_base: Decimal,
    pub debt_base: Decimal,
    pub liquidation_threshold: Option<Ratio>,
}

impl ProjectionResponse {
    pub fn new(current: HealthFactor, projection: Projection, at_risk_threshold: Decimal) -> Self {
        Self {
            action: projection.action,
            amount_in_base_currency: projection.amount_in_base_currency,
            current,
            projected: projection.health_factor,
            status: projection.health_factor.status(at_risk_threshold),
            current_display: current.to_display_string(),
            projected_display: projection.health_factor.to_display_string(),
            collateral_base: projection.total_collateral_base,
            debt_base: projection.total_debt_base,
            liquidation_threshold: projection.liquidation_threshold,
        }
    }
}
