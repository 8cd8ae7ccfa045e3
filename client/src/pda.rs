//! Program-derived addresses for the VeilMarket accounts

use solana_sdk::pubkey::Pubkey;

use veilmarket::state::{Config, EncryptedBet, Market};

/// The protocol's singleton config account
pub fn config_address(program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[Config::SEED], program).0
}

/// Market account for a given id
pub fn market_address(program: &Pubkey, market_id: u64) -> Pubkey {
    Pubkey::find_program_address(&[Market::SEED, &market_id.to_le_bytes()], program).0
}

/// A bettor's encrypted position on a market
pub fn bet_address(program: &Pubkey, market: &Pubkey, bettor: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[EncryptedBet::SEED, market.as_ref(), bettor.as_ref()],
        program,
    )
    .0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_stable() {
        let program = veilmarket::ID;
        assert_eq!(config_address(&program), config_address(&program));
        assert_eq!(market_address(&program, 3), market_address(&program, 3));
        assert_ne!(market_address(&program, 3), market_address(&program, 4));

        let market = market_address(&program, 0);
        let bettor = Pubkey::new_unique();
        assert_eq!(
            bet_address(&program, &market, &bettor),
            bet_address(&program, &market, &bettor)
        );
    }
}
