//! Emergency Pause
//!
//! While paused, market creation and bet submission are rejected.
//! Refunds and claims keep working so funds are never trapped.

use anchor_lang::prelude::*;

use crate::instructions::admin::update_config::AdminError;
use crate::state::Config;

/// Event emitted on pause state changes
#[event]
pub struct PauseToggled {
    pub paused: bool,
}

#[derive(Accounts)]
pub struct SetPause<'info> {
    #[account(
        constraint = admin.key() == config.admin @ AdminError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(mut, seeds = [Config::SEED], bump = config.bump)]
    pub config: Account<'info, Config>,
}

impl<'info> SetPause<'info> {
    pub fn set_pause(&mut self, paused: bool) -> Result<()> {
        self.config.paused = paused;
        emit!(PauseToggled { paused });
        Ok(())
    }
}
