//! Protocol Configuration Updates
//!
//! The admin may retarget the treasury and adjust the flat creation
//! fee and the platform fee. Fee changes apply protocol-wide; they are
//! never altered per-market.

use anchor_lang::prelude::*;

use crate::state::Config;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        constraint = admin.key() == config.admin @ AdminError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(mut, seeds = [Config::SEED], bump = config.bump)]
    pub config: Account<'info, Config>,
}

impl<'info> UpdateConfig<'info> {
    pub fn update_config(
        &mut self,
        new_treasury: Option<Pubkey>,
        new_creation_fee: Option<u64>,
        new_protocol_fee_bps: Option<u64>,
    ) -> Result<()> {
        if let Some(treasury) = new_treasury {
            self.config.treasury = treasury;
        }
        if let Some(creation_fee) = new_creation_fee {
            self.config.creation_fee = creation_fee;
        }
        if let Some(fee_bps) = new_protocol_fee_bps {
            require!(fee_bps <= 3000, AdminError::FeeTooHigh);
            self.config.protocol_fee_bps = fee_bps;
        }

        Ok(())
    }
}

#[error_code]
pub enum AdminError {
    #[msg("Only the admin may update the configuration")]
    Unauthorized,
    #[msg("Protocol fee cannot exceed 30%")]
    FeeTooHigh,
}
