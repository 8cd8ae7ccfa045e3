//! Client error taxonomy
//!
//! Every failure carries a specific message; nothing fails silently.
//! Client-side precondition failures surface before any network call,
//! and on-chain rejections keep the program's revert reason verbatim.

use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable execution context (cluster endpoint missing)
    #[error("no execution context: {0}")]
    Environment(String),

    /// None of the configured signer sources produced a provider
    #[error("no signing provider available from the configured sources")]
    ProviderUnavailable,

    /// The encryption engine could not be initialized
    #[error("encryption engine failed to load: {0}")]
    EngineLoad(String),

    /// An address failed validation
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// An operation requiring a signer ran on a read-only session
    #[error("wallet not connected")]
    WalletNotConnected,

    /// Amount failed lossless conversion to base units
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Stake is outside the market's min/max bounds
    #[error("stake {stake} is outside the market bounds [{min}, {max}]")]
    AmountOutOfBounds { stake: u64, min: u64, max: u64 },

    /// Option index does not exist on the market
    #[error("option index {index} is out of range for {count} options")]
    InvalidOption { index: u8, count: usize },

    /// Option list is outside the 2-10 range
    #[error("markets carry between 2 and 10 options, got {0}")]
    InvalidOptions(usize),

    /// Stake bounds must satisfy 0 < min <= max
    #[error("invalid bet bounds: min {min}, max {max}")]
    InvalidBetBounds { min: u64, max: u64 },

    /// Market is not accepting bets
    #[error("market {0} is not accepting bets")]
    MarketNotActive(u64),

    /// A bet submission is already awaiting confirmation
    #[error("a bet submission is already in flight")]
    SubmissionInFlight,

    /// Market account does not exist
    #[error("market {0} not found")]
    MarketNotFound(u64),

    /// Protocol config account does not exist
    #[error("protocol is not initialized on this cluster")]
    NotInitialized,

    /// Ledger account bytes did not decode as the expected type
    #[error("account decode failed: {0}")]
    Decode(String),

    /// Transport-level failure; on-chain rejections keep their reason
    #[error(transparent)]
    Transport(#[from] TransportError),
}
