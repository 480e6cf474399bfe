// This is a metapackage for tests
// Re-export crates as modules

pub use api_gateway;
pub use common;
pub use fund_service;
