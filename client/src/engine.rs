//! # Encryption Engine
//!
//! Turns plaintext bet fields into the ciphertext handles and binding
//! proof the program accepts. The engine's session key is derived by
//! asking the signing provider to sign a fixed domain message, so
//! ciphertexts are tied to the authorized identity: only the same
//! identity (or the settlement gateway's key share) recovers the
//! plaintexts.
//!
//! Handles are 32 bytes: the value XORed into a keccak keystream over
//! (secret, contract, user, nonce, field index). The proof binds every
//! handle in a bundle to the exact (contract, user) pair it was built
//! for — and, for bets, to the attached stake — so a bundle replayed
//! against another contract or identity is rejected on-chain.
//!
//! Encrypting option and amount in one bundle produces a single proof
//! for both handles; always prefer that over two single-field bundles
//! when both fields travel together.

use anchor_lang::solana_program::keccak;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signer::Signer;

use veilmarket::cipher;

use crate::error::ClientError;
use crate::provider::SignerProvider;

/// Message signed once to derive the engine session key
const ENGINE_KEY_MSG: &[u8] = b"veilmarket encryption key v1";

/// Domain separator for the per-field keystream
const KEYSTREAM_DOMAIN: &[u8] = b"veilmarket:keystream:v1";

/// Bit-width kind of an encrypted field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 8-bit values (option indexes)
    U8,
    /// 64-bit values (amounts in base units)
    U64,
}

impl FieldKind {
    fn byte_width(self) -> usize {
        match self {
            FieldKind::U8 => 1,
            FieldKind::U64 => 8,
        }
    }
}

/// Opaque handles plus the proof binding them to (contract, user)
pub struct CiphertextBundle {
    pub handles: Vec<[u8; 32]>,
    pub proof: [u8; 32],
}

/// The specialized bundle for a bet: option + amount under one proof,
/// committed to the attached stake
pub struct BetBundle {
    pub option_handle: [u8; 32],
    pub amount_handle: [u8; 32],
    pub proof: [u8; 32],
}

/// Session-scoped encryption engine
///
/// Constructed once per session and shared read-only afterwards; its
/// key material never changes after load.
pub struct KeystreamEngine {
    secret: [u8; 32],
}

impl KeystreamEngine {
    /// Derive the session key from the signing provider
    pub fn load(provider: &SignerProvider) -> Result<Self, ClientError> {
        let signature = provider
            .signer()
            .try_sign_message(ENGINE_KEY_MSG)
            .map_err(|err| ClientError::EngineLoad(err.to_string()))?;

        Ok(Self {
            secret: keccak::hashv(&[signature.as_ref()]).0,
        })
    }

    /// Start a multi-field input bound to (contract, user). The nonce
    /// must be fresh per bundle; bundles are single-use.
    pub fn create_input(&self, contract: Pubkey, user: Pubkey, nonce: u128) -> EncryptedInput<'_> {
        EncryptedInput {
            engine: self,
            contract,
            user,
            nonce,
            fields: Vec::new(),
        }
    }

    /// Encrypt a bet (option + amount) under a single proof, committed
    /// to `amount` as the attached stake
    pub fn encrypt_bet(
        &self,
        option: u8,
        amount: u64,
        contract: Pubkey,
        user: Pubkey,
        nonce: u128,
    ) -> BetBundle {
        let mut input = self.create_input(contract, user, nonce);
        input.add_u8(option).add_u64(amount);
        let handles = input.handles();

        let proof =
            cipher::bet_binding_digest(&contract, &user, &handles[0], &handles[1], amount);

        BetBundle {
            option_handle: handles[0],
            amount_handle: handles[1],
            proof,
        }
    }

    /// Recover an 8-bit plaintext; only meaningful for the identity
    /// whose key encrypted the handle
    pub fn decrypt_u8(
        &self,
        handle: &[u8; 32],
        contract: Pubkey,
        user: Pubkey,
        nonce: u128,
        index: u8,
    ) -> u8 {
        let pad = self.keystream(&contract, &user, nonce, index);
        handle[0] ^ pad[0]
    }

    /// Recover a 64-bit plaintext
    pub fn decrypt_u64(
        &self,
        handle: &[u8; 32],
        contract: Pubkey,
        user: Pubkey,
        nonce: u128,
        index: u8,
    ) -> u64 {
        let pad = self.keystream(&contract, &user, nonce, index);
        let mut le = [0u8; 8];
        for (i, byte) in le.iter_mut().enumerate() {
            *byte = handle[i] ^ pad[i];
        }
        u64::from_le_bytes(le)
    }

    fn keystream(&self, contract: &Pubkey, user: &Pubkey, nonce: u128, index: u8) -> [u8; 32] {
        keccak::hashv(&[
            KEYSTREAM_DOMAIN,
            &self.secret,
            contract.as_ref(),
            user.as_ref(),
            &nonce.to_le_bytes(),
            &[index],
        ])
        .0
    }

    fn encrypt_field(
        &self,
        kind: FieldKind,
        value: u64,
        contract: &Pubkey,
        user: &Pubkey,
        nonce: u128,
        index: u8,
    ) -> [u8; 32] {
        let mut handle = self.keystream(contract, user, nonce, index);
        let le = value.to_le_bytes();
        for i in 0..kind.byte_width() {
            handle[i] ^= le[i];
        }
        handle
    }
}

/// Ordered field builder for one ciphertext bundle
pub struct EncryptedInput<'e> {
    engine: &'e KeystreamEngine,
    contract: Pubkey,
    user: Pubkey,
    nonce: u128,
    fields: Vec<(FieldKind, u64)>,
}

impl<'e> EncryptedInput<'e> {
    pub fn add_u8(&mut self, value: u8) -> &mut Self {
        self.fields.push((FieldKind::U8, value as u64));
        self
    }

    pub fn add_u64(&mut self, value: u64) -> &mut Self {
        self.fields.push((FieldKind::U64, value));
        self
    }

    /// Produce one handle per field plus a proof over the whole bundle
    pub fn encrypt(&self) -> CiphertextBundle {
        let handles = self.handles();
        let proof = cipher::binding_digest(&self.contract, &self.user, &handles);
        CiphertextBundle { handles, proof }
    }

    fn handles(&self) -> Vec<[u8; 32]> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, (kind, value))| {
                self.engine.encrypt_field(
                    *kind,
                    *value,
                    &self.contract,
                    &self.user,
                    self.nonce,
                    index as u8,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{resolve, ProviderSource};
    use solana_sdk::signature::Keypair;
    use solana_sdk::signer::Signer;
    use std::sync::Arc;

    fn engine_for(keypair: &Arc<Keypair>) -> KeystreamEngine {
        let provider = resolve(&[ProviderSource::Explicit(Arc::clone(keypair))]).unwrap();
        KeystreamEngine::load(&provider).unwrap()
    }

    #[test]
    fn bet_round_trip() {
        let keypair = Arc::new(Keypair::new());
        let engine = engine_for(&keypair);
        let contract = veilmarket::ID;
        let user = keypair.pubkey();

        let bundle = engine.encrypt_bet(2, 500_000_000_000_000_000, contract, user, 7);

        assert_eq!(engine.decrypt_u8(&bundle.option_handle, contract, user, 7, 0), 2);
        assert_eq!(
            engine.decrypt_u64(&bundle.amount_handle, contract, user, 7, 1),
            500_000_000_000_000_000
        );
    }

    #[test]
    fn other_identity_cannot_decrypt() {
        let alice = Arc::new(Keypair::new());
        let mallory = Arc::new(Keypair::new());
        let contract = veilmarket::ID;
        let user = alice.pubkey();

        let bundle = engine_for(&alice).encrypt_bet(1, 750_000, contract, user, 1);
        let stolen = engine_for(&mallory).decrypt_u64(&bundle.amount_handle, contract, user, 1, 1);

        assert_ne!(stolen, 750_000);
    }

    #[test]
    fn proof_matches_on_chain_binding_rule() {
        let keypair = Arc::new(Keypair::new());
        let engine = engine_for(&keypair);
        let user = keypair.pubkey();

        let bundle = engine.encrypt_bet(0, 1_000, veilmarket::ID, user, 42);

        let expected = cipher::bet_binding_digest(
            &veilmarket::ID,
            &user,
            &bundle.option_handle,
            &bundle.amount_handle,
            1_000,
        );
        assert_eq!(bundle.proof, expected);
    }

    #[test]
    fn proof_is_single_use_across_contracts_and_users() {
        let keypair = Arc::new(Keypair::new());
        let engine = engine_for(&keypair);
        let user = keypair.pubkey();
        let other_user = Keypair::new().pubkey();
        let other_contract = Pubkey::new_unique();

        let bundle = engine.encrypt_bet(0, 1_000, veilmarket::ID, user, 42);

        // Replay against a different contract or user fails the check
        assert_ne!(
            bundle.proof,
            cipher::bet_binding_digest(
                &other_contract,
                &user,
                &bundle.option_handle,
                &bundle.amount_handle,
                1_000,
            )
        );
        assert_ne!(
            bundle.proof,
            cipher::bet_binding_digest(
                &veilmarket::ID,
                &other_user,
                &bundle.option_handle,
                &bundle.amount_handle,
                1_000,
            )
        );
    }

    #[test]
    fn generic_builder_covers_both_handles_with_one_proof() {
        let keypair = Arc::new(Keypair::new());
        let engine = engine_for(&keypair);
        let user = keypair.pubkey();

        let mut input = engine.create_input(veilmarket::ID, user, 3);
        input.add_u8(4).add_u64(123_456);
        let bundle = input.encrypt();

        assert_eq!(bundle.handles.len(), 2);
        assert_eq!(
            bundle.proof,
            cipher::binding_digest(&veilmarket::ID, &user, &bundle.handles)
        );
    }

    #[test]
    fn nonce_freshens_handles() {
        let keypair = Arc::new(Keypair::new());
        let engine = engine_for(&keypair);
        let user = keypair.pubkey();

        let a = engine.encrypt_bet(1, 500, veilmarket::ID, user, 1);
        let b = engine.encrypt_bet(1, 500, veilmarket::ID, user, 2);

        assert_ne!(a.option_handle, b.option_handle);
        assert_ne!(a.amount_handle, b.amount_handle);
    }
}
