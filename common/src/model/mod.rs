//! Domain models for the fund tracker

pub mod fund;
