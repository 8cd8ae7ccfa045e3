//! Platform Fee Collection
//!
//! Sweeps the platform's cut of a settled pool to the treasury: the
//! basis-point fee plus whatever rounding dust the floored payout
//! divisions leave behind. When nobody backed the winning option the
//! whole pool goes to the treasury, since no claim can ever succeed.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::state::{Config, Market, MarketStatus};
use crate::utils::distributable_pool;

/// Event emitted when fees are swept
#[event]
pub struct FeesCollected {
    pub market_id: u64,
    pub amount: u64,
}

#[derive(Accounts)]
pub struct CollectFees<'info> {
    #[account(
        constraint = admin.key() == config.admin @ CollectFeesError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(seeds = [Config::SEED], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        constraint = market.status == MarketStatus::Settled @ CollectFeesError::NotSettled,
        constraint = market.winning_pool_posted @ CollectFeesError::PoolNotFinalized,
        constraint = !market.fee_collected @ CollectFeesError::AlreadyCollected,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(constraint = collateral_mint.key() == config.collateral_mint)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// CHECK: Must match the configured treasury wallet
    #[account(address = config.treasury)]
    pub treasury: AccountInfo<'info>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = treasury,
    )]
    pub treasury_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> CollectFees<'info> {
    pub fn collect_fees(&mut self) -> Result<()> {
        let fee = if self.market.winning_pool == 0 {
            // No winners to pay out; the pool cannot be claimed
            self.market.total_pool
        } else {
            let distributable =
                distributable_pool(self.market.total_pool, self.config.protocol_fee_bps)?;
            self.market
                .total_pool
                .checked_sub(distributable)
                .ok_or(CollectFeesError::MathOverflow)?
        };

        if fee > 0 {
            let market_seeds = &[
                Market::SEED,
                &self.market.id.to_le_bytes(),
                &[self.market.bump],
            ];
            let market_signer = &[&market_seeds[..]];

            transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.vault.to_account_info(),
                        mint: self.collateral_mint.to_account_info(),
                        to: self.treasury_collateral.to_account_info(),
                        authority: self.market.to_account_info(),
                    },
                    market_signer,
                ),
                fee,
                self.collateral_mint.decimals,
            )?;
        }

        self.market.fee_collected = true;

        emit!(FeesCollected {
            market_id: self.market.id,
            amount: fee,
        });

        Ok(())
    }
}

#[error_code]
pub enum CollectFeesError {
    #[msg("Only the admin may collect fees")]
    Unauthorized,
    #[msg("Market is not Settled")]
    NotSettled,
    #[msg("Winning pool has not been finalized yet")]
    PoolNotFinalized,
    #[msg("Fees were already collected for this market")]
    AlreadyCollected,
    #[msg("Math operation overflow")]
    MathOverflow,
}
