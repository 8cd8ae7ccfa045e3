//! Read-Only Projections
//!
//! Stateless views over ledger-resident accounts. External callers
//! poll these; nothing here mutates protocol state.

use anchor_lang::AccountDeserialize;

use veilmarket::state::{Market, MarketStatus};

use crate::error::ClientError;

/// Public projection of a market account
#[derive(Debug, Clone)]
pub struct MarketView {
    pub id: u64,
    pub creator: solana_sdk::pubkey::Pubkey,
    pub question: String,
    pub options: Vec<String>,
    pub end_time: i64,
    pub oracle: solana_sdk::pubkey::Pubkey,
    pub status: MarketStatus,
    /// Only present once the market is Settled
    pub winning_option: Option<u8>,
    pub total_pool: u64,
    pub min_bet: u64,
    pub max_bet: u64,
    pub bettor_count: u64,
    /// Only present once the gateway finalized the winning pool
    pub winning_pool: Option<u64>,
    pub cancel_reason: Option<String>,
}

impl From<Market> for MarketView {
    fn from(market: Market) -> Self {
        let winning_option = match market.status {
            MarketStatus::Settled => Some(market.winning_option),
            _ => None,
        };
        let winning_pool = market.winning_pool_posted.then_some(market.winning_pool);
        let cancel_reason = (!market.cancel_reason.is_empty()).then_some(market.cancel_reason);

        Self {
            id: market.id,
            creator: market.creator,
            question: market.question,
            options: market.options,
            end_time: market.end_time,
            oracle: market.oracle,
            status: market.status,
            winning_option,
            total_pool: market.total_pool,
            min_bet: market.min_bet,
            max_bet: market.max_bet,
            bettor_count: market.bettor_count,
            winning_pool,
            cancel_reason,
        }
    }
}

/// Decode Anchor account bytes (discriminator included)
pub(crate) fn decode_account<T: AccountDeserialize>(bytes: &[u8]) -> Result<T, ClientError> {
    T::try_deserialize(&mut &bytes[..]).map_err(|err| ClientError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    fn market(status: MarketStatus) -> Market {
        Market {
            id: 1,
            creator: Pubkey::new_unique(),
            question: "Will it rain tomorrow?".to_string(),
            options: vec!["Yes".to_string(), "No".to_string()],
            end_time: 1_900_000_000,
            created_at: 0,
            oracle: Pubkey::new_unique(),
            status,
            winning_option: 1,
            min_bet: 10,
            max_bet: 1_000,
            total_pool: 500,
            bettor_count: 3,
            encrypted_pool: [9u8; 32],
            winning_pool: 400,
            winning_pool_posted: false,
            fee_collected: false,
            cancel_reason: String::new(),
            bump: 255,
        }
    }

    #[test]
    fn winning_fields_hidden_until_valid() {
        let view = MarketView::from(market(MarketStatus::Active));
        assert_eq!(view.winning_option, None);
        assert_eq!(view.winning_pool, None);
        assert_eq!(view.cancel_reason, None);

        let mut settled = market(MarketStatus::Settled);
        settled.winning_pool_posted = true;
        let view = MarketView::from(settled);
        assert_eq!(view.winning_option, Some(1));
        assert_eq!(view.winning_pool, Some(400));
    }

    #[test]
    fn cancel_reason_surfaces() {
        let mut cancelled = market(MarketStatus::Cancelled);
        cancelled.cancel_reason = "oracle unavailable".to_string();
        let view = MarketView::from(cancelled);
        assert_eq!(view.cancel_reason.as_deref(), Some("oracle unavailable"));
    }
}
