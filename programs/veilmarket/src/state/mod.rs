//! Account state for the confidential prediction market protocol

pub mod bet;
pub mod config;
pub mod market;

pub use bet::*;
pub use config::*;
pub use market::*;
