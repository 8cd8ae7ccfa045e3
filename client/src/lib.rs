//! # VeilMarket Client
//!
//! Rust SDK for the VeilMarket confidential prediction market: builds
//! ciphertext bundles for encrypted bets, submits them atomically, and
//! exposes the read-only market projections.
//!
//! ## Usage
//!
//! ```ignore
//! let config = SessionConfig::new(ClusterConfig::devnet(), USDC_MINT, 6)?;
//! let session = BetSession::connect(config, rpc_transport)?;
//!
//! session.place_bet(42, 0, "0.5").await?;
//! ```
//!
//! The session is the only entry point. Construct it once, share it by
//! reference; the encryption engine inside loads lazily on the first
//! encrypted operation and is reused for the rest of the process.

pub mod engine;
pub mod error;
pub mod pda;
pub mod provider;
pub mod query;
pub mod session;
pub mod transport;
pub mod units;

pub use engine::{BetBundle, CiphertextBundle, EncryptedInput, FieldKind, KeystreamEngine};
pub use error::ClientError;
pub use provider::{default_sources, ProviderSource, SignerProvider};
pub use query::MarketView;
pub use session::{parse_address, BetSession, ClusterConfig, SessionConfig};
pub use transport::{LedgerTransport, TransportError};
