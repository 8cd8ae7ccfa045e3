//! Market Settlement
//!
//! The oracle reports the winning option for a Closed market. Settling
//! flips the market into its terminal Settled state and signals the
//! gateway to run the homomorphic resolution over the encrypted bets:
//! the gateway publishes the winning-side total and each bettor's
//! winning stake, after which winners claim their proportional share.
//!
//! Individual options and amounts stay encrypted on-chain throughout;
//! only the gateway-decrypted aggregates become public here.

use anchor_lang::prelude::*;

use crate::state::{Market, MarketStatus};

/// Event emitted when a market is settled. The gateway watches this to
/// kick off resolution of the encrypted pool.
#[event]
pub struct MarketSettled {
    pub market_id: u64,
    pub winning_option: u8,
    pub oracle: Pubkey,
    pub encrypted_pool: [u8; 32],
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct SettleMarket<'info> {
    /// Oracle recorded on the market
    #[account(
        constraint = oracle.key() == market.oracle @ SettleMarketError::Unauthorized
    )]
    pub oracle: Signer<'info>,

    #[account(
        mut,
        constraint = market.status == MarketStatus::Closed @ SettleMarketError::NotClosed,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> SettleMarket<'info> {
    pub fn settle_market(&mut self, winning_option: u8) -> Result<()> {
        let clock = Clock::get()?;

        require!(
            (winning_option as usize) < self.market.options.len(),
            SettleMarketError::InvalidOption
        );

        self.market.status = MarketStatus::Settled;
        self.market.winning_option = winning_option;

        emit!(MarketSettled {
            market_id: self.market.id,
            winning_option,
            oracle: self.oracle.key(),
            encrypted_pool: self.market.encrypted_pool,
            timestamp: clock.unix_timestamp,
        });

        msg!("Market {} settled: option {}", self.market.id, winning_option);

        Ok(())
    }
}

#[error_code]
pub enum SettleMarketError {
    #[msg("Only the market oracle can settle")]
    Unauthorized,
    #[msg("Market must be Closed before settlement")]
    NotClosed,
    #[msg("Winning option index is out of range")]
    InvalidOption,
}
