//! Bet Refunds
//!
//! Only cancelled markets refund. The refundable unit is the plaintext
//! collateral that was attached at submission time, not the encrypted
//! amount commitment. Exactly-once per bettor: a second call fails
//! cleanly instead of double-paying.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::state::{Config, EncryptedBet, Market, MarketStatus};

/// Event emitted when a deposit is refunded
#[event]
pub struct BetRefunded {
    pub market_id: u64,
    pub bettor: Pubkey,
    pub amount: u64,
}

#[derive(Accounts)]
pub struct RefundBet<'info> {
    #[account(mut)]
    pub bettor: Signer<'info>,

    #[account(seeds = [Config::SEED], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        constraint = market.status == MarketStatus::Cancelled @ RefundBetError::NotCancelled,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [EncryptedBet::SEED, market.key().as_ref(), bettor.key().as_ref()],
        bump = bet.bump,
        constraint = bet.bettor == bettor.key() @ RefundBetError::Unauthorized,
        constraint = !bet.refunded @ RefundBetError::AlreadyRefunded,
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

impl<'info> RefundBet<'info> {
    pub fn refund_bet(&mut self) -> Result<()> {
        let amount = self.bet.deposited;
        require!(amount > 0, RefundBetError::NothingToRefund);

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
            amount,
            self.collateral_mint.decimals,
        )?;

        self.bet.refunded = true;
        self.market.total_pool = self
            .market
            .total_pool
            .checked_sub(amount)
            .ok_or(RefundBetError::MathOverflow)?;

        emit!(BetRefunded {
            market_id: self.market.id,
            bettor: self.bettor.key(),
            amount,
        });

        Ok(())
    }
}

#[error_code]
pub enum RefundBetError {
    #[msg("Refunds are only available on cancelled markets")]
    NotCancelled,
    #[msg("Bet does not belong to this bettor")]
    Unauthorized,
    #[msg("Bet was already refunded")]
    AlreadyRefunded,
    #[msg("No deposit recorded for this bet")]
    NothingToRefund,
    #[msg("Math operation overflow")]
    MathOverflow,
}
