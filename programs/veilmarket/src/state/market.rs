//! Prediction Market State
//!
//! Each market represents a single multi-option prediction question.
//! Individual bets on it stay encrypted until the settlement gateway
//! resolves them; only the aggregate pool size is public.

use anchor_lang::prelude::*;

/// Maximum number of answer options a market may carry
pub const MAX_OPTIONS: usize = 10;

/// Minimum number of answer options a market may carry
pub const MIN_OPTIONS: usize = 2;

/// Maximum byte length of a single option label
pub const MAX_OPTION_LEN: usize = 64;

/// Maximum byte length of the market question
pub const MAX_QUESTION_LEN: usize = 256;

/// Maximum byte length of a cancellation reason
pub const MAX_REASON_LEN: usize = 128;

/// Individual prediction market account
///
/// Seeds: ["market", market_id.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct Market {
    /// Unique market identifier
    pub id: u64,

    /// Market creator's address
    pub creator: Pubkey,

    /// The prediction question
    /// Example: "Will ETH flip BTC by market cap in 2027?"
    #[max_len(MAX_QUESTION_LEN)]
    pub question: String,

    /// Ordered answer options (2-10 labels)
    #[max_len(MAX_OPTIONS, MAX_OPTION_LEN)]
    pub options: Vec<String>,

    /// Unix timestamp when betting ends
    pub end_time: i64,

    /// Unix timestamp when market was created
    pub created_at: i64,

    /// Identity authorized to settle the market.
    /// Defaults to the creator, reassignable while Active.
    pub oracle: Pubkey,

    /// Market lifecycle status
    pub status: MarketStatus,

    /// Winning option index (only valid once Settled)
    pub winning_option: u8,

    /// Smallest accepted stake per bet, in collateral base units
    pub min_bet: u64,

    /// Largest accepted stake per bet, in collateral base units
    pub max_bet: u64,

    /// Aggregate stake across all bets. Public by design; the
    /// attribution of who staked what stays encrypted.
    pub total_pool: u64,

    /// Number of distinct bettors
    pub bettor_count: u64,

    /// Running ciphertext accumulator over every accepted bet
    pub encrypted_pool: [u8; 32],

    /// Decrypted winning-side total, posted by the gateway after
    /// settlement. Zero until `winning_pool_posted` is set.
    pub winning_pool: u64,

    /// Whether the gateway has published the winning pool
    pub winning_pool_posted: bool,

    /// Whether the platform fee has been swept to the treasury
    pub fee_collected: bool,

    /// Recorded cancellation reason (audit only, no protocol effect)
    #[max_len(MAX_REASON_LEN)]
    pub cancel_reason: String,

    /// PDA bump seed
    pub bump: u8,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";

    /// Whether an option list is acceptable for a new market
    pub fn options_valid(options: &[String]) -> bool {
        (MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len())
            && options
                .iter()
                .all(|label| !label.is_empty() && label.len() <= MAX_OPTION_LEN)
    }

    /// Whether bets are currently accepted
    pub fn betting_open(&self, now: i64) -> bool {
        self.status == MarketStatus::Active && now < self.end_time
    }

    /// Whether `caller` may administer this market (creator or oracle)
    pub fn is_operator(&self, caller: &Pubkey) -> bool {
        *caller == self.creator || *caller == self.oracle
    }
}

/// Market lifecycle status
///
/// Transitions are monotonic: Active -> Closed -> Settled, with
/// cancellation possible from Active or Closed. Settled and Cancelled
/// are terminal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum MarketStatus {
    /// Market is open for betting
    #[default]
    Active,
    /// Betting ended, awaiting settlement
    Closed,
    /// Oracle reported the winning option
    Settled,
    /// Market was voided; bettors may refund
    Cancelled,
}

impl MarketStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MarketStatus::Settled | MarketStatus::Cancelled)
    }

    /// Whether `self -> next` is a legal lifecycle transition
    pub fn can_transition(self, next: MarketStatus) -> bool {
        use MarketStatus::*;
        matches!(
            (self, next),
            (Active, Closed) | (Closed, Settled) | (Active, Cancelled) | (Closed, Cancelled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_transitions() {
        use MarketStatus::*;
        assert!(Active.can_transition(Closed));
        assert!(Closed.can_transition(Settled));
        assert!(Active.can_transition(Cancelled));
        assert!(Closed.can_transition(Cancelled));

        // No backward or terminal-exit transitions
        assert!(!Active.can_transition(Settled));
        assert!(!Closed.can_transition(Active));
        assert!(!Settled.can_transition(Cancelled));
        assert!(!Settled.can_transition(Closed));
        assert!(!Cancelled.can_transition(Active));
        assert!(!Cancelled.can_transition(Settled));
    }

    #[test]
    fn option_count_bounds() {
        for count in 0..=12usize {
            let options: Vec<String> = (0..count).map(|i| format!("Option {}", i)).collect();
            assert_eq!(Market::options_valid(&options), (2..=10).contains(&count));
        }
    }

    #[test]
    fn option_labels_must_be_nonempty_and_bounded() {
        let empty = vec!["Yes".to_string(), String::new()];
        assert!(!Market::options_valid(&empty));

        let oversized = vec!["Yes".to_string(), "x".repeat(MAX_OPTION_LEN + 1)];
        assert!(!Market::options_valid(&oversized));
    }

    #[test]
    fn terminal_states() {
        assert!(!MarketStatus::Active.is_terminal());
        assert!(!MarketStatus::Closed.is_terminal());
        assert!(MarketStatus::Settled.is_terminal());
        assert!(MarketStatus::Cancelled.is_terminal());
    }

    #[test]
    fn betting_window() {
        let market = Market {
            id: 0,
            creator: Pubkey::default(),
            question: "test".to_string(),
            options: vec!["Yes".to_string(), "No".to_string()],
            end_time: 1_000,
            created_at: 0,
            oracle: Pubkey::default(),
            status: MarketStatus::Active,
            winning_option: 0,
            min_bet: 1,
            max_bet: 100,
            total_pool: 0,
            bettor_count: 0,
            encrypted_pool: [0u8; 32],
            winning_pool: 0,
            winning_pool_posted: false,
            fee_collected: false,
            cancel_reason: String::new(),
            bump: 0,
        };

        assert!(market.betting_open(999));
        assert!(!market.betting_open(1_000));

        let mut closed = market;
        closed.status = MarketStatus::Closed;
        assert!(!closed.betting_open(0));
    }
}
