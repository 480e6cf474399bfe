//! API handlers
//!
//! Each handler follows a consistent pattern:
//! - Extract state and parameters using Axum extractors
//! - Call the fund service, which validates and performs one storage call
//! - Map the result to a response or an `ApiError`

pub mod fund;
pub mod health;
pub mod response;

pub use response::{Created, MessageResponse};
