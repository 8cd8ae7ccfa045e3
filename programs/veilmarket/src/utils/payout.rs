//! # Settlement Payout Math
//!
//! All stake and pool arithmetic runs on integer base units with u128
//! intermediates. Every division floors; the rounding dust stays in the
//! market vault and is swept to the treasury together with the platform
//! fee. That direction is the documented policy, applied consistently.
//!
//! ```text
//! fee            = total_pool * fee_bps / 10_000
//! distributable  = total_pool - fee
//! payout(bettor) = winning_stake * distributable / winning_pool
//! ```

use anchor_lang::prelude::*;

/// Basis-point scale (10_000 = 100%)
pub const BPS_SCALE: u64 = 10_000;

#[error_code]
pub enum PayoutError {
    #[msg("Math operation overflow")]
    Overflow,
    #[msg("Fee exceeds 100%")]
    FeeTooHigh,
}

/// Platform fee taken from a settled pool, floored
pub fn platform_fee(total_pool: u64, fee_bps: u64) -> Result<u64> {
    require!(fee_bps <= BPS_SCALE, PayoutError::FeeTooHigh);

    let fee = (total_pool as u128)
        .checked_mul(fee_bps as u128)
        .ok_or(PayoutError::Overflow)?
        .checked_div(BPS_SCALE as u128)
        .ok_or(PayoutError::Overflow)?;

    Ok(fee as u64)
}

/// Pool remaining for winners after the platform fee
pub fn distributable_pool(total_pool: u64, fee_bps: u64) -> Result<u64> {
    let fee = platform_fee(total_pool, fee_bps)?;
    total_pool.checked_sub(fee).ok_or(PayoutError::Overflow.into())
}

/// A winner's proportional share of the distributable pool
///
/// Returns zero for losing bets and for markets where nobody backed
/// the winning option.
pub fn payout_share(winning_stake: u64, distributable: u64, winning_pool: u64) -> Result<u64> {
    if winning_stake == 0 || winning_pool == 0 {
        return Ok(0);
    }

    let share = (winning_stake as u128)
        .checked_mul(distributable as u128)
        .ok_or(PayoutError::Overflow)?
        .checked_div(winning_pool as u128)
        .ok_or(PayoutError::Overflow)?;

    Ok(share as u64)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_floors_toward_platform() {
        // 2% of 99 units floors to 1, leaving 98 distributable
        assert_eq!(platform_fee(99, 200).unwrap(), 1);
        assert_eq!(distributable_pool(99, 200).unwrap(), 98);

        assert_eq!(platform_fee(0, 200).unwrap(), 0);
        assert_eq!(platform_fee(1_000_000, 0).unwrap(), 0);
    }

    #[test]
    fn fee_rejects_over_100_percent() {
        assert!(platform_fee(100, BPS_SCALE + 1).is_err());
        assert_eq!(platform_fee(100, BPS_SCALE).unwrap(), 100);
    }

    #[test]
    fn sole_winner_takes_pool_minus_fee() {
        // One bettor staked 0.5 (9 decimals) on the winning option
        let stake = 500_000_000u64;
        let distributable = distributable_pool(stake, 200).unwrap();
        assert_eq!(distributable, 490_000_000);

        let payout = payout_share(stake, distributable, stake).unwrap();
        assert_eq!(payout, distributable);
    }

    #[test]
    fn proportional_split() {
        // Pool 1000, no fee; winners staked 600 total: 400 and 200
        let distributable = distributable_pool(1_000, 0).unwrap();
        let a = payout_share(400, distributable, 600).unwrap();
        let b = payout_share(200, distributable, 600).unwrap();

        assert_eq!(a, 666);
        assert_eq!(b, 333);
        // Dust (1 unit) remains in the vault for the treasury sweep
        assert!(a + b <= distributable);
    }

    #[test]
    fn losers_and_empty_pools_pay_nothing() {
        assert_eq!(payout_share(0, 1_000, 500).unwrap(), 0);
        assert_eq!(payout_share(100, 1_000, 0).unwrap(), 0);
    }

    #[test]
    fn large_pools_do_not_overflow() {
        let stake = u64::MAX / 2;
        let pool = u64::MAX;
        let share = payout_share(stake, pool, pool).unwrap();
        assert_eq!(share, stake);
    }
}
