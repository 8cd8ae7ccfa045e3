//! Market lifecycle instructions
//!
//! Active -> Closed -> Settled, with cancellation possible from Active
//! or Closed. Terminal states persist for historical query.

pub mod cancel_market;
pub mod change_oracle;
pub mod close_market;
pub mod create_market;
pub mod settle_market;

pub use cancel_market::*;
pub use change_oracle::*;
pub use close_market::*;
pub use create_market::*;
pub use settle_market::*;
