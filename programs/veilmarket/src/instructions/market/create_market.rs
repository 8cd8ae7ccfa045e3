//! Market Creation
//!
//! Anyone can open a prediction market by paying the creation fee.
//! The creator chooses the question, 2-10 answer options, the betting
//! deadline and the per-bet stake bounds. The creator starts out as the
//! market's oracle and may hand that role off while the market is Active.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::state::{Config, Market, MarketStatus, MAX_QUESTION_LEN};

/// Event emitted when a market is created
#[event]
pub struct MarketCreated {
    pub market_id: u64,
    pub creator: Pubkey,
    pub option_count: u8,
    pub end_time: i64,
    pub min_bet: u64,
    pub max_bet: u64,
}

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [Market::SEED, config.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(constraint = collateral_mint.key() == config.collateral_mint)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = creator,
    )]
    pub creator_collateral: InterfaceAccount<'info, TokenAccount>,

    /// Market's collateral vault, holds every stake until settlement
    #[account(
        init,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: Must match the configured treasury wallet
    #[account(address = config.treasury)]
    pub treasury: AccountInfo<'info>,

    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = treasury,
    )]
    pub treasury_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    pub fn create_market(
        &mut self,
        question: String,
        options: Vec<String>,
        end_time: i64,
        min_bet: u64,
        max_bet: u64,
        fee: u64,
        bumps: &CreateMarketBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        require!(!self.config.paused, CreateMarketError::ProtocolPaused);
        require!(
            question.len() <= MAX_QUESTION_LEN,
            CreateMarketError::QuestionTooLong
        );
        require!(
            Market::options_valid(&options),
            CreateMarketError::InvalidOptions
        );
        require!(end_time > clock.unix_timestamp, CreateMarketError::InvalidEndTime);
        require!(
            min_bet > 0 && max_bet >= min_bet,
            CreateMarketError::InvalidBetBounds
        );
        require!(fee >= self.config.creation_fee, CreateMarketError::InsufficientFee);

        // Creation fee goes straight to the treasury
        if fee > 0 {
            transfer_checked(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.creator_collateral.to_account_info(),
                        mint: self.collateral_mint.to_account_info(),
                        to: self.treasury_collateral.to_account_info(),
                        authority: self.creator.to_account_info(),
                    },
                ),
                fee,
                self.collateral_mint.decimals,
            )?;
        }

        let market_id = self.config.market_count;
        let option_count = options.len() as u8;

        self.market.set_inner(Market {
            id: market_id,
            creator: self.creator.key(),
            question,
            options,
            end_time,
            created_at: clock.unix_timestamp,
            oracle: self.creator.key(),
            status: MarketStatus::Active,
            winning_option: 0,
            min_bet,
            max_bet,
            total_pool: 0,
            bettor_count: 0,
            encrypted_pool: [0u8; 32],
            winning_pool: 0,
            winning_pool_posted: false,
            fee_collected: false,
            cancel_reason: String::new(),
            bump: bumps.market,
        });

        self.config.market_count += 1;

        emit!(MarketCreated {
            market_id,
            creator: self.creator.key(),
            option_count,
            end_time,
            min_bet,
            max_bet,
        });

        Ok(())
    }
}

#[error_code]
pub enum CreateMarketError {
    #[msg("Protocol is paused")]
    ProtocolPaused,
    #[msg("Question exceeds maximum length")]
    QuestionTooLong,
    #[msg("Markets carry between 2 and 10 non-empty options")]
    InvalidOptions,
    #[msg("End time must be in the future")]
    InvalidEndTime,
    #[msg("Bet bounds require 0 < min <= max")]
    InvalidBetBounds,
    #[msg("Attached fee is below the market creation fee")]
    InsufficientFee,
}
