//! Market Cancellation
//!
//! The creator or oracle may void a market from Active or Closed.
//! Cancellation is terminal: no settlement runs, no payout is computed,
//! and every bettor becomes eligible to refund exactly their deposit.

use anchor_lang::prelude::*;

use crate::state::{Market, MarketStatus, MAX_REASON_LEN};

/// Event emitted when a market is cancelled
#[event]
pub struct MarketCancelled {
    pub market_id: u64,
    pub cancelled_by: Pubkey,
    pub reason: String,
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct CancelMarket<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = market.status.can_transition(MarketStatus::Cancelled)
            @ CancelMarketError::AlreadyTerminal,
        constraint = market.is_operator(&authority.key()) @ CancelMarketError::Unauthorized,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> CancelMarket<'info> {
    pub fn cancel_market(&mut self, reason: String) -> Result<()> {
        let clock = Clock::get()?;

        require!(reason.len() <= MAX_REASON_LEN, CancelMarketError::ReasonTooLong);

        // Recorded for audit and query only; no protocol effect
        self.market.status = MarketStatus::Cancelled;
        self.market.cancel_reason = reason.clone();

        emit!(MarketCancelled {
            market_id: self.market.id,
            cancelled_by: self.authority.key(),
            reason,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }
}

#[error_code]
pub enum CancelMarketError {
    #[msg("Settled or Cancelled markets cannot be cancelled")]
    AlreadyTerminal,
    #[msg("Only the creator or oracle may cancel")]
    Unauthorized,
    #[msg("Cancellation reason exceeds maximum length")]
    ReasonTooLong,
}
