//! Winning Pool Finalization
//!
//! After settlement the gateway runs the homomorphic aggregation over
//! the encrypted bets and publishes one number: the total stake that
//! backed the winning option. Individual positions are not revealed by
//! this step. Claims stay locked until the pool is finalized.

use anchor_lang::prelude::*;

use crate::state::{Config, Market, MarketStatus};

/// Event emitted when the winning-side total becomes public
#[event]
pub struct WinningPoolFinalized {
    pub market_id: u64,
    pub winning_pool: u64,
    pub total_pool: u64,
}

#[derive(Accounts)]
pub struct FinalizeWinningPool<'info> {
    /// Settlement gateway recorded in the protocol config
    #[account(
        constraint = gateway.key() == config.gateway @ GatewayError::Unauthorized
    )]
    pub gateway: Signer<'info>,

    #[account(seeds = [Config::SEED], bump = config.bump)]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        constraint = market.status == MarketStatus::Settled @ GatewayError::NotSettled,
        constraint = !market.winning_pool_posted @ GatewayError::AlreadyFinalized,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> FinalizeWinningPool<'info> {
    pub fn finalize_winning_pool(&mut self, total_winning_stake: u64) -> Result<()> {
        require!(
            total_winning_stake <= self.market.total_pool,
            GatewayError::ExceedsPool
        );

        self.market.winning_pool = total_winning_stake;
        self.market.winning_pool_posted = true;

        emit!(WinningPoolFinalized {
            market_id: self.market.id,
            winning_pool: total_winning_stake,
            total_pool: self.market.total_pool,
        });

        Ok(())
    }
}

#[error_code]
pub enum GatewayError {
    #[msg("Only the settlement gateway can post resolution results")]
    Unauthorized,
    #[msg("Market is not Settled")]
    NotSettled,
    #[msg("Winning pool was already finalized")]
    AlreadyFinalized,
    #[msg("Winning-side total cannot exceed the market pool")]
    ExceedsPool,
}
