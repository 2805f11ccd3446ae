use rust_decimal::Decimal;

/// Fixed-point decimals of the on-chain health factor
pub const HEALTH_FACTOR_DECIMALS: u32 = 18;

/// Fixed-point decimals of collateral and debt totals in base currency
pub const BASE_CURRENCY_DECIMALS: u32 = 8;

/// Basis points carry four implied decimals (10_000 = 100%)
pub const BASIS_POINT_DECIMALS: u32 = 4;

/// Largest scale a `Decimal` can hold
pub const MAX_DECIMAL_SCALE: u32 = 28;

/// Positions strictly below this health factor can be liquidated
pub const LIQUIDATION_HEALTH_FACTOR: Decimal = Decimal::ONE;

/// Decimal places shown to users
pub const DISPLAY_DECIMALS: u32 = 2;

pub const INFINITE_DISPLAY: &str = "∞";
