//! # Ciphertext Binding
//!
//! Bets arrive as opaque 32-byte ciphertext handles plus a proof that
//! the handles were built for this program and this bettor. The program
//! never decrypts anything; it verifies the binding and accumulates
//! handles so the settlement gateway can resolve the real values later.
//!
//! ## Binding rule
//!
//! ```text
//! digest = keccak(DOMAIN || program || user || n || handle_0 .. handle_n-1)
//! ```
//!
//! For bets the plaintext stake is mixed in as well, committing the
//! ciphertext bundle to the exact collateral value attached:
//!
//! ```text
//! digest = keccak(DOMAIN_BET || program || user || option || amount || stake_le)
//! ```
//!
//! A proof computed for one (program, user) pair fails verification for
//! any other pair, so bundles are single-use across contracts and users.
//!
//! ## Accumulation
//!
//! Handle accumulators are keccak chains: `fold(acc, h) = keccak(acc || h)`.
//! The chain is order-sensitive and a handle can never cancel a previous
//! one, unlike a plain XOR accumulator.

use anchor_lang::solana_program::keccak;
use anchor_lang::solana_program::pubkey::Pubkey;

/// Domain separator for generic input bundles
const DOMAIN_INPUT: &[u8] = b"veilmarket:input:v1";

/// Domain separator for bet bundles (option + amount + stake)
const DOMAIN_BET: &[u8] = b"veilmarket:bet:v1";

/// Binding digest over an ordered handle list
pub fn binding_digest(program_id: &Pubkey, user: &Pubkey, handles: &[[u8; 32]]) -> [u8; 32] {
    let count = [handles.len() as u8];
    let mut parts: Vec<&[u8]> = vec![DOMAIN_INPUT, program_id.as_ref(), user.as_ref(), &count];
    for handle in handles {
        parts.push(handle);
    }
    keccak::hashv(&parts).0
}

/// Binding digest for a bet bundle, committed to the attached stake
pub fn bet_binding_digest(
    program_id: &Pubkey,
    user: &Pubkey,
    option_handle: &[u8; 32],
    amount_handle: &[u8; 32],
    stake: u64,
) -> [u8; 32] {
    let stake_le = stake.to_le_bytes();
    keccak::hashv(&[
        DOMAIN_BET,
        program_id.as_ref(),
        user.as_ref(),
        option_handle,
        amount_handle,
        &stake_le,
    ])
    .0
}

/// Fold a handle into a running accumulator
pub fn fold(acc: &[u8; 32], handle: &[u8; 32]) -> [u8; 32] {
    keccak::hashv(&[acc, handle]).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(byte: u8) -> Pubkey {
        Pubkey::new_from_array([byte; 32])
    }

    #[test]
    fn digest_binds_program_and_user() {
        let handles = [[1u8; 32], [2u8; 32]];
        let base = binding_digest(&pk(9), &pk(7), &handles);

        assert_ne!(base, binding_digest(&pk(8), &pk(7), &handles));
        assert_ne!(base, binding_digest(&pk(9), &pk(6), &handles));
        assert_eq!(base, binding_digest(&pk(9), &pk(7), &handles));
    }

    #[test]
    fn digest_binds_handle_order() {
        let ab = binding_digest(&pk(1), &pk(2), &[[3u8; 32], [4u8; 32]]);
        let ba = binding_digest(&pk(1), &pk(2), &[[4u8; 32], [3u8; 32]]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn bet_digest_binds_stake() {
        let opt = [5u8; 32];
        let amt = [6u8; 32];
        let a = bet_binding_digest(&pk(1), &pk(2), &opt, &amt, 500);
        let b = bet_binding_digest(&pk(1), &pk(2), &opt, &amt, 501);
        assert_ne!(a, b);
    }

    #[test]
    fn fold_is_order_sensitive_and_never_cancels() {
        let zero = [0u8; 32];
        let h = [7u8; 32];

        let once = fold(&zero, &h);
        let twice = fold(&once, &h);

        // Folding the same handle twice must not return to the start
        assert_ne!(twice, zero);
        assert_ne!(twice, once);

        let g = [8u8; 32];
        assert_ne!(fold(&fold(&zero, &h), &g), fold(&fold(&zero, &g), &h));
    }
}
