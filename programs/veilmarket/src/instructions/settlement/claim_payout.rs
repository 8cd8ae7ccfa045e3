//! Payout Claims
//!
//! Once the gateway has finalized the winning pool and posted this
//! bet's outcome, a winning bettor claims their proportional share of
//! the pool minus the platform fee:
//!
//! ```text
//! payout = winning_stake * (total_pool - fee) / winning_pool
//! ```
//!
//! Claims are exactly-once per bettor; losing bets have nothing to
//! claim and fail without touching any state.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::state::{Config, EncryptedBet, Market, MarketStatus};
use crate::utils::{distributable_pool, payout_share};

/// Event emitted when a payout is claimed
#[event]
pub struct PayoutClaimed {
    pub market_id: u64,
    pub bettor: Pubkey,
    pub winning_stake: u64,
    pub payout: u64,
}

#[derive(Accounts)]
pub struct ClaimPayout<'info> {
    #[account(mut)]
    pub bettor: Signer<'info>,

    #[account(seeds = [Config::SEED], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        constraint = market.status == MarketStatus::Settled @ ClaimPayoutError::NotSettled,
        constraint = market.winning_pool_posted @ ClaimPayoutError::PoolNotFinalized,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [EncryptedBet::SEED, market.key().as_ref(), bettor.key().as_ref()],
        bump = bet.bump,
        constraint = bet.bettor == bettor.key() @ ClaimPayoutError::Unauthorized,
        constraint = bet.outcome_posted @ ClaimPayoutError::OutcomeNotPosted,
        constraint = !bet.claimed @ ClaimPayoutError::AlreadyClaimed,
    )]
    pub bet: Box<Account<'info, EncryptedBet>>,

    #[account(constraint = collateral_mint.key() == config.collateral_mint)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = bettor,
    )]
    pub bettor_collateral: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ClaimPayout<'info> {
    pub fn claim_payout(&mut self) -> Result<()> {
        require!(self.bet.winning_stake > 0, ClaimPayoutError::NothingToClaim);

        let distributable =
            distributable_pool(self.market.total_pool, self.config.protocol_fee_bps)?;
        let payout = payout_share(
            self.bet.winning_stake,
            distributable,
            self.market.winning_pool,
        )?;
        require!(payout > 0, ClaimPayoutError::NothingToClaim);

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
                    to: self.bettor_collateral.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                market_signer,
            ),
            payout,
            self.collateral_mint.decimals,
        )?;

        self.bet.claimed = true;

        emit!(PayoutClaimed {
            market_id: self.market.id,
            bettor: self.bettor.key(),
            winning_stake: self.bet.winning_stake,
            payout,
        });

        Ok(())
    }
}

#[error_code]
pub enum ClaimPayoutError {
    #[msg("Market is not Settled")]
    NotSettled,
    #[msg("Winning pool has not been finalized yet")]
    PoolNotFinalized,
    #[msg("Bet does not belong to this bettor")]
    Unauthorized,
    #[msg("Bet outcome has not been posted yet")]
    OutcomeNotPosted,
    #[msg("Payout was already claimed")]
    AlreadyClaimed,
    #[msg("Nothing to claim for this bet")]
    NothingToClaim,
}
