//! Common types and utilities for the fund tracker
//!
//! This library contains the types shared by the storage layer and the HTTP
//! gateway: the unified error type, the fund model, and database bootstrap
//! helpers.

pub mod error;
pub mod model;
pub mod db;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use model::fund::{InvestmentFund, NewFund};

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
