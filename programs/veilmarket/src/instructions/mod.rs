//! Instruction handlers for the confidential prediction market
//!
//! Grouped by concern:
//! - `initialize` - Set up the protocol (admin only, once)
//! - `market` - Market lifecycle: create, change oracle, close, settle, cancel
//! - `betting` - Encrypted bet submission and refunds
//! - `settlement` - Gateway resolution, payout claims, fee collection
//! - `admin` - Config updates and the emergency pause

pub mod admin;
pub mod betting;
pub mod initialize;
pub mod market;
pub mod settlement;

pub use admin::*;
pub use betting::*;
pub use initialize::*;
pub use market::*;
pub use settlement::*;
