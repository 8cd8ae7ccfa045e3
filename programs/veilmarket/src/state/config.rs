//! Global Protocol Configuration
//!
//! This account stores protocol-wide settings that apply to all markets.

use anchor_lang::prelude::*;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Protocol administrator with special privileges
    pub admin: Pubkey,

    /// Settlement gateway authorized to post decrypted aggregates.
    /// This is the identity of the FHE coprocessor that performs the
    /// homomorphic resolution off-chain and reports the results back.
    pub gateway: Pubkey,

    /// Destination wallet for creation fees and platform fees
    pub treasury: Pubkey,

    /// Collateral token mint (e.g., USDC, SOL wrapped)
    pub collateral_mint: Pubkey,

    /// Platform fee in basis points, taken from settled pools
    /// (100 = 1%, max 10000 = 100%)
    pub protocol_fee_bps: u64,

    /// Flat fee charged on market creation, in collateral base units
    pub creation_fee: u64,

    /// Total markets created (used as incrementing ID)
    pub market_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Whether the protocol is paused
    pub paused: bool,
}

impl Config {
    pub const SEED: &'static [u8] = b"config";
}
