use anyhow::{ensure, Result};
use health_projector::{
    constants::{BASE_CURRENCY_DECIMALS, HEALTH_FACTOR_DECIMALS, MAX_DECIMAL_SCALE},
    FixedPointScale,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::env_helper::{load_env_var, load_env_var_or};

#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub port: u16,
    /// Health factors up to this value are reported as at risk
    pub at_risk_health_factor: Decimal,
    pub base_currency_decimals: u32,
    pub health_factor_decimals: u32,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            at_risk_health_factor: dec!(1.1),
            base_currency_decimals: BASE_CURRENCY_DECIMALS,
            health_factor_decimals: HEALTH_FACTOR_DECIMALS,
        }
    }
}

impl LocalConfig {
    pub fn load_from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            port: load_env_var_or("PORT", defaults.port)?,
            at_risk_health_factor: load_env_var("AT_RISK_HEALTH_FACTOR")?,
            base_currency_decimals: load_env_var_or(
                "BASE_CURRENCY_DECIMALS",
                defaults.base_currency_decimals,
            )?,
            health_factor_decimals: load_env_var_or(
                "HEALTH_FACTOR_DECIMALS",
                defaults.health_factor_decimals,
            )?,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.at_risk_health_factor >= Decimal::ONE,
            "AT_RISK_HEALTH_FACTOR must be at least 1, got {}",
            self.at_risk_health_factor
        );
        ensure!(
            self.base_currency_decimals <= MAX_DECIMAL_SCALE,
            "BASE_CURRENCY_DECIMALS must be at most {}",
            MAX_DECIMAL_SCALE
        );
        ensure!(
            self.health_factor_decimals <= MAX_DECIMAL_SCALE,
            "HEALTH_FACTOR_DECIMALS must be at most {}",
            MAX_DECIMAL_SCALE
        );
        Ok(())
    }

    pub fn fixed_point_scale(&self) -> FixedPointScale {
        FixedPointScale {
            base_currency_decimals: self.base_currency_decimals,
            health_factor_decimals: self.health_factor_decimals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LocalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fixed_point_scale(), FixedPointScale::default());
    }

    #[test]
    fn test_at_risk_below_liquidation_is_rejected() {
        let config = LocalConfig {
            at_risk_health_factor: dec!(0.9),
            ..LocalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scale_above_decimal_precision_is_rejected() {
        let config = LocalConfig {
            health_factor_decimals: 36,
            ..LocalConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
