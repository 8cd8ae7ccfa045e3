//! Encrypted bet submission and refunds

pub mod place_bet;
pub mod refund_bet;

pub use place_bet::*;
pub use refund_bet::*;
