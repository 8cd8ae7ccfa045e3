//! Oracle Reassignment
//!
//! The oracle is the identity allowed to settle a market. It can be
//! handed off only while the market is still Active, by the creator or
//! the current oracle.

use anchor_lang::prelude::*;

use crate::state::{Market, MarketStatus};

/// Event emitted when a market's oracle changes
#[event]
pub struct OracleChanged {
    pub market_id: u64,
    pub old_oracle: Pubkey,
    pub new_oracle: Pubkey,
}

#[derive(Accounts)]
pub struct ChangeOracle<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = market.status == MarketStatus::Active @ ChangeOracleError::NotActive,
        constraint = market.is_operator(&authority.key()) @ ChangeOracleError::Unauthorized,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> ChangeOracle<'info> {
    pub fn change_oracle(&mut self, new_oracle: Pubkey) -> Result<()> {
        require!(new_oracle != Pubkey::default(), ChangeOracleError::InvalidOracle);

        let old_oracle = self.market.oracle;
        self.market.oracle = new_oracle;

        emit!(OracleChanged {
            market_id: self.market.id,
            old_oracle,
            new_oracle,
        });

        Ok(())
    }
}

#[error_code]
pub enum ChangeOracleError {
    #[msg("Oracle can only change while the market is Active")]
    NotActive,
    #[msg("Only the creator or current oracle may reassign the oracle")]
    Unauthorized,
    #[msg("Oracle cannot be the default address")]
    InvalidOracle,
}
