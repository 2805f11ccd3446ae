//! Health factor projection for lending positions.
//!
//! Given a user's aggregate position and a hypothetical change of one asset
//! (supply, withdraw, borrow, repay), computes the resulting health factor
//! with exact decimal arithmetic. Thresholds are normalized `Ratio`s and a
//! position without debt is `HealthFactor::Infinite`, never a magic number.

pub mod constants;
pub mod debounce;
pub mod errors;
pub mod health_factor;
pub mod models;
pub mod normalize;
pub mod projector;
pub mod ratio;

// Re-exports
pub use debounce::Debouncer;
pub use errors::*;
pub use health_factor::*;
pub use models::*;
pub use normalize::*;
pub use projector::*;
pub use ratio::*;
