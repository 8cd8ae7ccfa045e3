//! # VeilMarket: Confidential Prediction Markets
//!
//! A prediction market on Solana where bets stay encrypted until
//! settlement.
//!
//! ## Overview
//!
//! Users open markets with 2-10 answer options, stake collateral on an
//! option without revealing 1. which option they picked, or 2. how much
//! of their stake logically backs it, and claim a proportional payout
//! once the oracle settles the market.
//!
//! ## How it works
//! - Bets arrive as opaque ciphertext handles plus a proof binding them
//!   to this program and the bettor.
//! - The aggregate pool size is public; its composition is not.
//! - After settlement, the FHE gateway resolves the encrypted pool and
//!   posts the winning-side totals, unlocking claims.

use anchor_lang::prelude::*;

pub mod cipher;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;

declare_id!("5UAhemfaML4RSGQ6GvDYLBHBC4JdAAQ2qZWdQi7LXgdr");

/// Main VeilMarket program
#[program]
pub mod veilmarket {
    use super::*;

    /// Initialize the protocol with global configuration
    pub fn initialize(
        ctx: Context<Initialize>,
        protocol_fee_bps: u64,
        creation_fee: u64,
        gateway: Pubkey,
        treasury: Pubkey,
    ) -> Result<()> {
        ctx.accounts
            .initialize(protocol_fee_bps, creation_fee, gateway, treasury, &ctx.bumps)
    }

    /// Open a prediction market (fee-gated, permissionless)
    pub fn create_market(
        ctx: Context<CreateMarket>,
        question: String,
        options: Vec<String>,
        end_time: i64,
        min_bet: u64,
        max_bet: u64,
        fee: u64,
    ) -> Result<()> {
        ctx.accounts
            .create_market(question, options, end_time, min_bet, max_bet, fee, &ctx.bumps)
    }

    /// Reassign the market oracle (creator or oracle, Active only)
    pub fn change_oracle(ctx: Context<ChangeOracle>, new_oracle: Pubkey) -> Result<()> {
        ctx.accounts.change_oracle(new_oracle)
    }

    /// Close betting on a market
    pub fn close_market(ctx: Context<CloseMarket>) -> Result<()> {
        ctx.accounts.close_market()
    }

    /// Settle a closed market with the winning option (oracle only)
    pub fn settle_market(ctx: Context<SettleMarket>, winning_option: u8) -> Result<()> {
        ctx.accounts.settle_market(winning_option)
    }

    /// Void a market and open the refund path
    pub fn cancel_market(ctx: Context<CancelMarket>, reason: String) -> Result<()> {
        ctx.accounts.cancel_market(reason)
    }

    /// Submit an encrypted bet with the stake attached as collateral
    pub fn place_bet(
        ctx: Context<PlaceBet>,
        option_handle: [u8; 32],
        amount_handle: [u8; 32],
        proof: [u8; 32],
        stake: u64,
    ) -> Result<()> {
        let bump = ctx.bumps.bet;
        ctx.accounts
            .place_bet(option_handle, amount_handle, proof, stake, bump)
    }

    /// Refund the deposit of a bet on a cancelled market
    pub fn refund_bet(ctx: Context<RefundBet>) -> Result<()> {
        ctx.accounts.refund_bet()
    }

    /// Publish the decrypted winning-side total (gateway only)
    pub fn finalize_winning_pool(
        ctx: Context<FinalizeWinningPool>,
        total_winning_stake: u64,
    ) -> Result<()> {
        ctx.accounts.finalize_winning_pool(total_winning_stake)
    }

    /// Post one bet's resolved winning stake (gateway only)
    pub fn post_bet_outcome(ctx: Context<PostBetOutcome>, winning_stake: u64) -> Result<()> {
        ctx.accounts.post_bet_outcome(winning_stake)
    }

    /// Claim a winning bet's proportional payout
    pub fn claim_payout(ctx: Context<ClaimPayout>) -> Result<()> {
        ctx.accounts.claim_payout()
    }

    /// Sweep the platform fee of a settled market to the treasury
    pub fn collect_fees(ctx: Context<CollectFees>) -> Result<()> {
        ctx.accounts.collect_fees()
    }

    /// Update treasury and fee configuration (admin only)
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        new_treasury: Option<Pubkey>,
        new_creation_fee: Option<u64>,
        new_protocol_fee_bps: Option<u64>,
    ) -> Result<()> {
        ctx.accounts
            .update_config(new_treasury, new_creation_fee, new_protocol_fee_bps)
    }

    /// Toggle the emergency pause (admin only)
    pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
        ctx.accounts.set_pause(paused)
    }
}
