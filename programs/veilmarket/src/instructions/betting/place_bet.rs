//! Encrypted Bet Submission
//!
//! A bet arrives as two ciphertext handles (option index and logical
//! amount) plus a binding proof, together with the plaintext stake as
//! attached collateral. The stake funds the pool and is the economic
//! commitment; which option it backs stays encrypted until settlement.
//!
//! Acceptance is atomic: the proof check, the collateral transfer and
//! the state update happen in one instruction, so either the whole bet
//! is recorded or nothing is.
//!
//! A bettor's repeat submissions fold into their existing position
//! instead of creating duplicate records.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::cipher;
use crate::state::{Config, EncryptedBet, Market};

/// Event emitted when a bet is accepted.
/// Note: neither the option nor the logical amount is emitted.
#[event]
pub struct BetPlaced {
    pub market_id: u64,
    pub bettor: Pubkey,
    pub stake: u64,
    pub total_pool: u64,
    pub timestamp: i64,
}

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    #[account(mut)]
    pub bettor: Signer<'info>,

    #[account(seeds = [Config::SEED], bump = config.bump)]
    pub config: Box<Account<'info, Config>>,

    #[account(mut)]
    pub market: Box<Account<'info, Market>>,

    #[account(
        init_if_needed,
        payer = bettor,
        space = 8 + EncryptedBet::INIT_SPACE,
        seeds = [EncryptedBet::SEED, market.key().as_ref(), bettor.key().as_ref()],
        bump,
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
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> PlaceBet<'info> {
    pub fn place_bet(
        &mut self,
        option_handle: [u8; 32],
        amount_handle: [u8; 32],
        proof: [u8; 32],
        stake: u64,
        bump: u8,
    ) -> Result<()> {
        let clock = Clock::get()?;

        require!(!self.config.paused, PlaceBetError::ProtocolPaused);
        require!(
            self.market.betting_open(clock.unix_timestamp),
            PlaceBetError::MarketNotActive
        );
        require!(
            stake >= self.market.min_bet && stake <= self.market.max_bet,
            PlaceBetError::AmountOutOfBounds
        );

        // The proof must bind both handles and the exact stake to this
        // program and this bettor; a bundle built for any other pair is
        // rejected here.
        let expected = cipher::bet_binding_digest(
            &crate::ID,
            &self.bettor.key(),
            &option_handle,
            &amount_handle,
            stake,
        );
        require!(proof == expected, PlaceBetError::InvalidProof);

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.bettor_collateral.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.bettor.to_account_info(),
                },
            ),
            stake,
            self.collateral_mint.decimals,
        )?;

        let bet = &mut self.bet;
        if bet.is_placed() {
            // Accumulate into the existing position
            bet.option_handle = cipher::fold(&bet.option_handle, &option_handle);
            bet.amount_handle = cipher::fold(&bet.amount_handle, &amount_handle);
            bet.deposited = bet
                .deposited
                .checked_add(stake)
                .ok_or(PlaceBetError::MathOverflow)?;
        } else {
            bet.market = self.market.key();
            bet.bettor = self.bettor.key();
            bet.option_handle = option_handle;
            bet.amount_handle = amount_handle;
            bet.deposited = stake;
            bet.placed_at = clock.unix_timestamp;
            bet.winning_stake = 0;
            bet.outcome_posted = false;
            bet.claimed = false;
            bet.refunded = false;
            bet.bump = bump;

            self.market.bettor_count = self
                .market
                .bettor_count
                .checked_add(1)
                .ok_or(PlaceBetError::MathOverflow)?;
        }

        self.market.total_pool = self
            .market
            .total_pool
            .checked_add(stake)
            .ok_or(PlaceBetError::MathOverflow)?;
        self.market.encrypted_pool = cipher::fold(&self.market.encrypted_pool, &option_handle);
        self.market.encrypted_pool = cipher::fold(&self.market.encrypted_pool, &amount_handle);

        emit!(BetPlaced {
            market_id: self.market.id,
            bettor: self.bettor.key(),
            stake,
            total_pool: self.market.total_pool,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }
}

#[error_code]
pub enum PlaceBetError {
    #[msg("Protocol is paused")]
    ProtocolPaused,
    #[msg("Market is not accepting bets")]
    MarketNotActive,
    #[msg("Stake is outside the market's min/max bounds")]
    AmountOutOfBounds,
    #[msg("Proof does not bind the handles to this program and bettor")]
    InvalidProof,
    #[msg("Math operation overflow")]
    MathOverflow,
}
