pub mod convert;
pub mod data;
pub mod donation;
pub mod engine;
pub mod error;
pub mod household;
pub mod interpolate;
pub mod types;

#[cfg(feature = "live-rates")]
pub mod live_rates;

pub use error::GlobalIncomeError;
pub use types::*;

/// Standard result type for all income-comparison operations
pub type GlobalIncomeResult<T> = Result<T, GlobalIncomeError>;
