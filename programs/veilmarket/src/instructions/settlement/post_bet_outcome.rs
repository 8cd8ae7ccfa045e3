//! Per-Bet Outcome Posting
//!
//! For every encrypted bet the gateway homomorphically compares the
//! option ciphertext against the winning option and posts the bettor's
//! stake on that option: the full logical amount for winners, zero for
//! losers. This is the moment attribution becomes public, which the
//! privacy model permits once a market is settled.

use anchor_lang::prelude::*;

use crate::instructions::settlement::finalize_winning_pool::GatewayError;
use crate::state::{Config, EncryptedBet, Market, MarketStatus};

/// Event emitted when a bet's outcome is posted
#[event]
pub struct BetOutcomePosted {
    pub market_id: u64,
    pub bettor: Pubkey,
    pub winning_stake: u64,
}

#[derive(Accounts)]
pub struct PostBetOutcome<'info> {
    #[account(
        constraint = gateway.key() == config.gateway @ GatewayError::Unauthorized
    )]
    pub gateway: Signer<'info>,

    #[account(seeds = [Config::SEED], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        constraint = market.status == MarketStatus::Settled @ GatewayError::NotSettled,
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        constraint = bet.market == market.key() @ PostOutcomeError::MarketMismatch,
        constraint = !bet.outcome_posted @ PostOutcomeError::AlreadyPosted,
    )]
    pub bet: Account<'info, EncryptedBet>,
}

impl<'info> PostBetOutcome<'info> {
    pub fn post_bet_outcome(&mut self, winning_stake: u64) -> Result<()> {
        // The logical winning stake can never exceed the collateral
        // that actually backed the position.
        require!(
            winning_stake <= self.bet.deposited,
            PostOutcomeError::ExceedsDeposit
        );

        self.bet.winning_stake = winning_stake;
        self.bet.outcome_posted = true;

        emit!(BetOutcomePosted {
            market_id: self.market.id,
            bettor: self.bet.bettor,
            winning_stake,
        });

        Ok(())
    }
}

#[error_code]
pub enum PostOutcomeError {
    #[msg("Bet does not belong to this market")]
    MarketMismatch,
    #[msg("Outcome was already posted for this bet")]
    AlreadyPosted,
    #[msg("Winning stake cannot exceed the deposited collateral")]
    ExceedsDeposit,
}
