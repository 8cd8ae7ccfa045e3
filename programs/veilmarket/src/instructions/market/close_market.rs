//! Market Closing
//!
//! Active -> Closed. The creator may close early; once the end time has
//! passed anyone may close, so stale markets cannot block settlement.

use anchor_lang::prelude::*;

use crate::state::{Market, MarketStatus};

/// Event emitted when betting closes
#[event]
pub struct MarketClosed {
    pub market_id: u64,
    pub closed_by: Pubkey,
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct CloseMarket<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = market.status == MarketStatus::Active @ CloseMarketError::NotActive,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> CloseMarket<'info> {
    pub fn close_market(&mut self) -> Result<()> {
        let clock = Clock::get()?;

        let is_creator = self.authority.key() == self.market.creator;
        let past_deadline = clock.unix_timestamp >= self.market.end_time;
        require!(is_creator || past_deadline, CloseMarketError::Unauthorized);

        self.market.status = MarketStatus::Closed;

        emit!(MarketClosed {
            market_id: self.market.id,
            closed_by: self.authority.key(),
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }
}

#[error_code]
pub enum CloseMarketError {
    #[msg("Market is not Active")]
    NotActive,
    #[msg("Only the creator may close before the end time")]
    Unauthorized,
}
