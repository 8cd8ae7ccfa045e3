//! Settlement and payout engine
//!
//! The gateway resolves encrypted bets after settlement in two steps
//! (winning pool, then per-bet outcomes); bettors claim afterwards and
//! the admin sweeps the platform fee.

pub mod claim_payout;
pub mod collect_fees;
pub mod finalize_winning_pool;
pub mod post_bet_outcome;

pub use claim_payout::*;
pub use collect_fees::*;
pub use finalize_winning_pool::*;
pub use post_bet_outcome::*;
