//! Encrypted Bet State
//!
//! One account per (market, bettor) pair. Repeat submissions fold into
//! the existing account instead of creating duplicate records, so the
//! accumulation path stays single per bettor.

use anchor_lang::prelude::*;

/// A bettor's encrypted position on one market
///
/// Seeds: ["bet", market, bettor]
#[account]
#[derive(InitSpace)]
pub struct EncryptedBet {
    /// Market this bet belongs to
    pub market: Pubkey,

    /// Bet owner
    pub bettor: Pubkey,

    /// Ciphertext handle for the chosen option index.
    /// Opaque to the program; only the gateway can resolve it.
    pub option_handle: [u8; 32],

    /// Ciphertext handle for the logical stake amount
    pub amount_handle: [u8; 32],

    /// Plaintext collateral backing the bet. This is the refundable
    /// unit on cancellation, not the encrypted amount commitment.
    pub deposited: u64,

    /// Unix timestamp of the first accepted submission
    pub placed_at: i64,

    /// This bettor's stake on the winning option, posted by the
    /// gateway after settlement (zero for losing bets)
    pub winning_stake: u64,

    /// Whether the gateway has posted this bet's outcome
    pub outcome_posted: bool,

    /// Whether the payout was claimed (exactly-once)
    pub claimed: bool,

    /// Whether the deposit was refunded (exactly-once)
    pub refunded: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl EncryptedBet {
    pub const SEED: &'static [u8] = b"bet";

    /// Whether this account holds a live position (first submission done)
    pub fn is_placed(&self) -> bool {
        self.bettor != Pubkey::default()
    }
}
