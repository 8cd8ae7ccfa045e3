//! Ledger Transport Seam
//!
//! The session talks to the cluster through this trait so the RPC
//! client stays swappable (and mockable in tests). Submitted
//! transactions have no protocol-level cancellation: a timeout here
//! only stops the local wait, the transaction may still land later.

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// Account fetch failed at the RPC layer
    #[error("account fetch failed: {0}")]
    Fetch(String),

    /// The cluster rejected the transaction; the message carries the
    /// program's revert reason verbatim
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// The endpoint could not be reached
    #[error("network unavailable: {0}")]
    Network(String),
}

#[async_trait]
pub trait LedgerTransport: Send + Sync {
    /// Raw account bytes, or None if the account does not exist
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, TransportError>;

    /// Broadcast a signed transaction and wait for confirmation
    async fn send_transaction(&self, transaction: Transaction) -> Result<Signature, TransportError>;

    /// A recent blockhash for transaction assembly
    async fn latest_blockhash(&self) -> Result<Hash, TransportError>;
}
