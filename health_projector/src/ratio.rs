//! Normalized `[0, 1]` ratio used for every liquidation threshold.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::BASIS_POINT_DECIMALS;
use crate::errors::{ProjectionError, Result};

/// A fraction in `[0, 1]`, e.g. `0.80` for an 80% liquidation threshold.
///
/// Basis points and percentages are converted once through the constructors
/// below; the projection formulas only ever accept a `Ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Ratio(Decimal);

impl Ratio {
    pub const ZERO: Ratio = Ratio(Decimal::ZERO);
    pub const ONE: Ratio = Ratio(Decimal::ONE);

    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(ProjectionError::RatioOutOfRange {
                value: value.to_string(),
            });
        }
        Ok(Self(value.normalize()))
    }

    /// `8000` basis points becomes `0.8`
    pub fn from_bps(bps: u32) -> Result<Self> {
        Self::new(Decimal::new(i64::from(bps), BASIS_POINT_DECIMALS))
    }

    /// `80` percent becomes `0.8`
    pub fn from_percent(percent: Decimal) -> Result<Self> {
        let value = percent
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or(ProjectionError::Overflow {
                operation: "percent to ratio",
            })?;
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for Ratio {
    type Error = ProjectionError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Ratio> for Decimal {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
