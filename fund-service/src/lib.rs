//! Fund service: storage port, adapters, and payload validation for investment funds

pub mod service;
pub mod repository;
pub mod config;
pub mod validation;

pub use service::FundService;
pub use repository::{FundRepository, InMemoryFundRepository, PostgresFundRepository};
pub use config::{FundServiceConfig, StorageBackend};
