//! # Bet Session
//!
//! The lifecycle-scoped handle every operation goes through. A session
//! is constructed once at startup — it validates the cluster context,
//! pins the signing provider from the ordered candidate list and lazily
//! loads the encryption engine — and is then passed by reference for
//! the rest of the process lifetime. No hidden globals: dropping the
//! session drops everything.
//!
//! ## Concurrency
//!
//! Engine initialization is memoized: concurrent callers before
//! completion await the same in-flight load, and a failed attempt is
//! not cached — the next call retries from scratch. Bet submission is
//! guarded by an in-flight flag so a double-clicked submit cannot
//! broadcast two transactions; the ledger serializes conflicting state
//! transitions but does not deduplicate identical submissions for us.
//!
//! Failed submissions are never retried automatically. A retry is a
//! fresh user intent.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anchor_lang::{InstructionData, ToAccountMetas};
use anchor_spl::associated_token::get_associated_token_address;
use log::{debug, info, warn};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;
use tokio::sync::OnceCell;

use veilmarket::state::{Config, Market, MarketStatus, MAX_OPTIONS, MIN_OPTIONS};

use crate::engine::KeystreamEngine;
use crate::error::ClientError;
use crate::pda;
use crate::provider::{self, ProviderSource, SignerProvider};
use crate::query::{decode_account, MarketView};
use crate::transport::LedgerTransport;
use crate::units::to_base_units;

/// The single target cluster a session is bound to
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub name: String,
    pub endpoint: String,
}

impl ClusterConfig {
    pub fn devnet() -> Self {
        Self {
            name: "devnet".to_string(),
            endpoint: "https://api.devnet.solana.com".to_string(),
        }
    }
}

/// Immutable session configuration. Built once; nothing here changes
/// after the session exists.
pub struct SessionConfig {
    pub cluster: ClusterConfig,
    pub program: Pubkey,
    pub collateral_mint: Pubkey,
    pub collateral_decimals: u8,
    pub provider_sources: Vec<ProviderSource>,
}

impl SessionConfig {
    /// Validate addresses up front; a malformed mint or program string
    /// never reaches the wire.
    pub fn new(
        cluster: ClusterConfig,
        collateral_mint: &str,
        collateral_decimals: u8,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            cluster,
            program: veilmarket::ID,
            collateral_mint: parse_address(collateral_mint)?,
            collateral_decimals,
            provider_sources: provider::default_sources(),
        })
    }

    /// Target a different deployment of the program
    pub fn with_program(mut self, program: &str) -> Result<Self, ClientError> {
        self.program = parse_address(program)?;
        Ok(self)
    }

    /// Replace the signer candidate list (priority order preserved)
    pub fn with_provider_sources(mut self, sources: Vec<ProviderSource>) -> Self {
        self.provider_sources = sources;
        self
    }
}

/// Parse and validate a base58 address
pub fn parse_address(text: &str) -> Result<Pubkey, ClientError> {
    Pubkey::from_str(text.trim()).map_err(|_| ClientError::InvalidAddress(text.to_string()))
}

/// A connected session against one cluster and one program deployment
pub struct BetSession<T: LedgerTransport> {
    config: SessionConfig,
    transport: T,
    provider: Option<SignerProvider>,
    engine: OnceCell<KeystreamEngine>,
    bet_in_flight: AtomicBool,
    nonce_counter: AtomicU64,
}

impl<T: LedgerTransport> BetSession<T> {
    /// Construct the session: validate the execution context and pin a
    /// signing provider. A session without a signer stays usable for
    /// queries only.
    pub fn connect(config: SessionConfig, transport: T) -> Result<Self, ClientError> {
        if config.cluster.endpoint.trim().is_empty() {
            return Err(ClientError::Environment(
                "cluster endpoint is not configured".to_string(),
            ));
        }

        let provider = match provider::resolve(&config.provider_sources) {
            Ok(provider) => {
                info!("session connected as {}", provider.address());
                Some(provider)
            }
            Err(ClientError::ProviderUnavailable) => {
                warn!("no signing provider found; session is read-only");
                None
            }
            Err(err) => return Err(err),
        };

        Ok(Self {
            config,
            transport,
            provider,
            engine: OnceCell::new(),
            bet_in_flight: AtomicBool::new(false),
            nonce_counter: AtomicU64::new(0),
        })
    }

    /// The connected identity, if any
    pub fn wallet(&self) -> Option<Pubkey> {
        self.provider.as_ref().map(|p| p.address())
    }

    /// The shared encryption engine, loaded on first use
    pub async fn engine(&self) -> Result<&KeystreamEngine, ClientError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(ClientError::ProviderUnavailable)?;

        self.engine
            .get_or_try_init(|| async {
                info!("loading encryption engine");
                KeystreamEngine::load(provider)
            })
            .await
    }

    fn signer(&self) -> Result<&SignerProvider, ClientError> {
        self.provider.as_ref().ok_or(ClientError::WalletNotConnected)
    }

    /// Fresh nonce per ciphertext bundle
    fn next_nonce(&self) -> u128 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let counter = self.nonce_counter.fetch_add(1, Ordering::Relaxed);
        (millis << 64) | counter as u128
    }

    async fn send(&self, instruction: Instruction) -> Result<Signature, ClientError> {
        let provider = self.signer()?;
        let blockhash = self.transport.latest_blockhash().await?;

        let transaction = {
            let signers: Vec<&dyn Signer> = vec![provider.signer()];
            Transaction::new_signed_with_payer(
                &[instruction],
                Some(&provider.address()),
                &signers,
                blockhash,
            )
        };

        Ok(self.transport.send_transaction(transaction).await?)
    }

    // ------------------------------------------------------------------
    // Encrypted betting
    // ------------------------------------------------------------------

    /// Encrypt and submit a bet: `option` and the logical amount go on
    /// the wire as ciphertext handles, the stake rides along as plain
    /// collateral. One atomic instruction; rejected wholesale if any
    /// part fails on-chain.
    pub async fn place_bet(
        &self,
        market_id: u64,
        option: u8,
        amount: &str,
    ) -> Result<Signature, ClientError> {
        // Precondition failures surface before any network call
        let wallet = self.signer()?.address();
        let stake = to_base_units(amount, self.config.collateral_decimals)?;
        if stake == 0 {
            return Err(ClientError::InvalidAmount(
                "stake must be positive".to_string(),
            ));
        }

        if self.bet_in_flight.swap(true, Ordering::SeqCst) {
            return Err(ClientError::SubmissionInFlight);
        }
        let result = self.place_bet_inner(market_id, option, stake, wallet).await;
        self.bet_in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn place_bet_inner(
        &self,
        market_id: u64,
        option: u8,
        stake: u64,
        wallet: Pubkey,
    ) -> Result<Signature, ClientError> {
        // Friendly pre-checks; the program re-validates authoritatively
        let market = self.market(market_id).await?;
        if market.status != MarketStatus::Active {
            return Err(ClientError::MarketNotActive(market_id));
        }
        if (option as usize) >= market.options.len() {
            return Err(ClientError::InvalidOption {
                index: option,
                count: market.options.len(),
            });
        }
        if stake < market.min_bet || stake > market.max_bet {
            return Err(ClientError::AmountOutOfBounds {
                stake,
                min: market.min_bet,
                max: market.max_bet,
            });
        }

        let engine = self.engine().await?;
        debug!("encrypting bet for market {}", market_id);
        let bundle =
            engine.encrypt_bet(option, stake, self.config.program, wallet, self.next_nonce());

        let market_pda = pda::market_address(&self.config.program, market_id);
        let instruction = Instruction {
            program_id: self.config.program,
            accounts: veilmarket::accounts::PlaceBet {
                bettor: wallet,
                config: pda::config_address(&self.config.program),
                market: market_pda,
                bet: pda::bet_address(&self.config.program, &market_pda, &wallet),
                collateral_mint: self.config.collateral_mint,
                bettor_collateral: get_associated_token_address(
                    &wallet,
                    &self.config.collateral_mint,
                ),
                vault: get_associated_token_address(&market_pda, &self.config.collateral_mint),
                token_program: anchor_spl::token::ID,
                associated_token_program: anchor_spl::associated_token::ID,
                system_program: solana_sdk::system_program::ID,
            }
            .to_account_metas(None),
            data: veilmarket::instruction::PlaceBet {
                option_handle: bundle.option_handle,
                amount_handle: bundle.amount_handle,
                proof: bundle.proof,
                stake,
            }
            .data(),
        };

        debug!("submitting encrypted bet on market {}", market_id);
        self.send(instruction).await
    }

    /// Refund the deposit on a cancelled market. Plain call, no
    /// encryption step; a second refund fails cleanly on-chain.
    pub async fn refund_bet(&self, market_id: u64) -> Result<Signature, ClientError> {
        let wallet = self.signer()?.address();
        let market_pda = pda::market_address(&self.config.program, market_id);

        let instruction = Instruction {
            program_id: self.config.program,
            accounts: veilmarket::accounts::RefundBet {
                bettor: wallet,
                config: pda::config_address(&self.config.program),
                market: market_pda,
                bet: pda::bet_address(&self.config.program, &market_pda, &wallet),
                collateral_mint: self.config.collateral_mint,
                bettor_collateral: get_associated_token_address(
                    &wallet,
                    &self.config.collateral_mint,
                ),
                vault: get_associated_token_address(&market_pda, &self.config.collateral_mint),
                token_program: anchor_spl::token::ID,
            }
            .to_account_metas(None),
            data: veilmarket::instruction::RefundBet {}.data(),
        };

        self.send(instruction).await
    }

    /// Claim the payout of a winning bet on a settled market
    pub async fn claim_payout(&self, market_id: u64) -> Result<Signature, ClientError> {
        let wallet = self.signer()?.address();
        let market_pda = pda::market_address(&self.config.program, market_id);

        let instruction = Instruction {
            program_id: self.config.program,
            accounts: veilmarket::accounts::ClaimPayout {
                bettor: wallet,
                config: pda::config_address(&self.config.program),
                market: market_pda,
                bet: pda::bet_address(&self.config.program, &market_pda, &wallet),
                collateral_mint: self.config.collateral_mint,
                bettor_collateral: get_associated_token_address(
                    &wallet,
                    &self.config.collateral_mint,
                ),
                vault: get_associated_token_address(&market_pda, &self.config.collateral_mint),
                token_program: anchor_spl::token::ID,
            }
            .to_account_metas(None),
            data: veilmarket::instruction::ClaimPayout {}.data(),
        };

        self.send(instruction).await
    }

    // ------------------------------------------------------------------
    // Market lifecycle
    // ------------------------------------------------------------------

    /// Open a market; the creation fee is read from the config and
    /// attached automatically.
    pub async fn create_market(
        &self,
        question: &str,
        options: &[&str],
        end_time: i64,
        min_bet: &str,
        max_bet: &str,
    ) -> Result<Signature, ClientError> {
        let wallet = self.signer()?.address();

        if options.len() < MIN_OPTIONS || options.len() > MAX_OPTIONS {
            return Err(ClientError::InvalidOptions(options.len()));
        }
        let min = to_base_units(min_bet, self.config.collateral_decimals)?;
        let max = to_base_units(max_bet, self.config.collateral_decimals)?;
        if min == 0 || max < min {
            return Err(ClientError::InvalidBetBounds { min, max });
        }

        let config = self.protocol_config().await?;
        let market_pda = pda::market_address(&self.config.program, config.market_count);

        let instruction = Instruction {
            program_id: self.config.program,
            accounts: veilmarket::accounts::CreateMarket {
                creator: wallet,
                config: pda::config_address(&self.config.program),
                market: market_pda,
                collateral_mint: self.config.collateral_mint,
                creator_collateral: get_associated_token_address(
                    &wallet,
                    &self.config.collateral_mint,
                ),
                vault: get_associated_token_address(&market_pda, &self.config.collateral_mint),
                treasury: config.treasury,
                treasury_collateral: get_associated_token_address(
                    &config.treasury,
                    &self.config.collateral_mint,
                ),
                token_program: anchor_spl::token::ID,
                associated_token_program: anchor_spl::associated_token::ID,
                system_program: solana_sdk::system_program::ID,
            }
            .to_account_metas(None),
            data: veilmarket::instruction::CreateMarket {
                question: question.to_string(),
                options: options.iter().map(|s| s.to_string()).collect(),
                end_time,
                min_bet: min,
                max_bet: max,
                fee: config.creation_fee,
            }
            .data(),
        };

        self.send(instruction).await
    }

    /// Reassign a market's oracle
    pub async fn change_oracle(
        &self,
        market_id: u64,
        new_oracle: &str,
    ) -> Result<Signature, ClientError> {
        let wallet = self.signer()?.address();
        let new_oracle = parse_address(new_oracle)?;

        let instruction = Instruction {
            program_id: self.config.program,
            accounts: veilmarket::accounts::ChangeOracle {
                authority: wallet,
                market: pda::market_address(&self.config.program, market_id),
            }
            .to_account_metas(None),
            data: veilmarket::instruction::ChangeOracle { new_oracle }.data(),
        };

        self.send(instruction).await
    }

    /// Close betting on a market
    pub async fn close_market(&self, market_id: u64) -> Result<Signature, ClientError> {
        let wallet = self.signer()?.address();

        let instruction = Instruction {
            program_id: self.config.program,
            accounts: veilmarket::accounts::CloseMarket {
                authority: wallet,
                market: pda::market_address(&self.config.program, market_id),
            }
            .to_account_metas(None),
            data: veilmarket::instruction::CloseMarket {}.data(),
        };

        self.send(instruction).await
    }

    /// Settle a closed market (oracle only)
    pub async fn settle_market(
        &self,
        market_id: u64,
        winning_option: u8,
    ) -> Result<Signature, ClientError> {
        let wallet = self.signer()?.address();

        let instruction = Instruction {
            program_id: self.config.program,
            accounts: veilmarket::accounts::SettleMarket {
                oracle: wallet,
                market: pda::market_address(&self.config.program, market_id),
            }
            .to_account_metas(None),
            data: veilmarket::instruction::SettleMarket { winning_option }.data(),
        };

        self.send(instruction).await
    }

    /// Cancel a market and open the refund path
    pub async fn cancel_market(
        &self,
        market_id: u64,
        reason: &str,
    ) -> Result<Signature, ClientError> {
        let wallet = self.signer()?.address();

        let instruction = Instruction {
            program_id: self.config.program,
            accounts: veilmarket::accounts::CancelMarket {
                authority: wallet,
                market: pda::market_address(&self.config.program, market_id),
            }
            .to_account_metas(None),
            data: veilmarket::instruction::CancelMarket {
                reason: reason.to_string(),
            }
            .data(),
        };

        self.send(instruction).await
    }

    // ------------------------------------------------------------------
    // Read surface
    // ------------------------------------------------------------------

    /// The protocol configuration account
    pub async fn protocol_config(&self) -> Result<Config, ClientError> {
        let bytes = self
            .transport
            .get_account_data(&pda::config_address(&self.config.program))
            .await?
            .ok_or(ClientError::NotInitialized)?;
        decode_account(&bytes)
    }

    /// One market's public projection
    pub async fn market(&self, market_id: u64) -> Result<MarketView, ClientError> {
        let bytes = self
            .transport
            .get_account_data(&pda::market_address(&self.config.program, market_id))
            .await?
            .ok_or(ClientError::MarketNotFound(market_id))?;
        let market: Market = decode_account(&bytes)?;
        Ok(market.into())
    }

    /// Number of distinct bettors on a market
    pub async fn bettor_count(&self, market_id: u64) -> Result<u64, ClientError> {
        Ok(self.market(market_id).await?.bettor_count)
    }

    /// The current flat market creation fee
    pub async fn market_creation_fee(&self) -> Result<u64, ClientError> {
        Ok(self.protocol_config().await?.creation_fee)
    }

    /// Ids of all markets currently accepting bets
    pub async fn active_markets(&self) -> Result<Vec<u64>, ClientError> {
        let config = self.protocol_config().await?;
        let mut ids = Vec::new();
        for id in 0..config.market_count {
            match self.market(id).await {
                Ok(view) if view.status == MarketStatus::Active => ids.push(id),
                Ok(_) => {}
                Err(ClientError::MarketNotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(ids)
    }

    /// Ids of markets created by `user`
    pub async fn user_created_markets(&self, user: Pubkey) -> Result<Vec<u64>, ClientError> {
        let config = self.protocol_config().await?;
        let mut ids = Vec::new();
        for id in 0..config.market_count {
            match self.market(id).await {
                Ok(view) if view.creator == user => ids.push(id),
                Ok(_) => {}
                Err(ClientError::MarketNotFound(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::AccountSerialize;
    use solana_sdk::hash::Hash;
    use solana_sdk::signature::Keypair;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    use crate::transport::TransportError;

    #[derive(Clone, Default)]
    struct MockTransport {
        accounts: Arc<Mutex<HashMap<Pubkey, Vec<u8>>>>,
        sent: Arc<Mutex<Vec<Transaction>>>,
        fetches: Arc<AtomicU64>,
        reject_with: Option<String>,
        hold: Option<Arc<Notify>>,
        sending: Arc<AtomicBool>,
    }

    #[async_trait::async_trait]
    impl LedgerTransport for MockTransport {
        async fn get_account_data(
            &self,
            address: &Pubkey,
        ) -> Result<Option<Vec<u8>>, TransportError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.accounts.lock().unwrap().get(address).cloned())
        }

        async fn send_transaction(
            &self,
            transaction: Transaction,
        ) -> Result<Signature, TransportError> {
            self.sending.store(true, Ordering::SeqCst);
            if let Some(hold) = &self.hold {
                hold.notified().await;
            }
            if let Some(reason) = &self.reject_with {
                return Err(TransportError::Rejected(reason.clone()));
            }
            self.sent.lock().unwrap().push(transaction);
            Ok(Signature::default())
        }

        async fn latest_blockhash(&self) -> Result<Hash, TransportError> {
            Ok(Hash::default())
        }
    }

    fn account_bytes<A: AccountSerialize>(account: &A) -> Vec<u8> {
        let mut bytes = Vec::new();
        account.try_serialize(&mut bytes).unwrap();
        bytes
    }

    fn test_session(transport: MockTransport, with_wallet: bool) -> BetSession<MockTransport> {
        let mint = Pubkey::new_unique();
        let cluster = ClusterConfig {
            name: "test".to_string(),
            endpoint: "http://127.0.0.1:8899".to_string(),
        };
        let sources = if with_wallet {
            vec![ProviderSource::Explicit(Arc::new(Keypair::new()))]
        } else {
            Vec::new()
        };
        let config = SessionConfig::new(cluster, &mint.to_string(), 9)
            .unwrap()
            .with_provider_sources(sources);
        BetSession::connect(config, transport).unwrap()
    }

    fn seed_config(transport: &MockTransport, market_count: u64) {
        let config = Config {
            admin: Pubkey::new_unique(),
            gateway: Pubkey::new_unique(),
            treasury: Pubkey::new_unique(),
            collateral_mint: Pubkey::new_unique(),
            protocol_fee_bps: 200,
            creation_fee: 1_000,
            market_count,
            bump: 255,
            paused: false,
        };
        transport
            .accounts
            .lock()
            .unwrap()
            .insert(pda::config_address(&veilmarket::ID), account_bytes(&config));
    }

    fn seed_market(transport: &MockTransport, id: u64, status: MarketStatus, creator: Pubkey) {
        let market = Market {
            id,
            creator,
            question: "Will it ship this quarter?".to_string(),
            options: vec!["Yes".to_string(), "No".to_string()],
            end_time: i64::MAX,
            created_at: 0,
            oracle: creator,
            status,
            winning_option: 0,
            min_bet: 10_000_000,       // 0.01 at 9 decimals
            max_bet: 10_000_000_000,   // 10 at 9 decimals
            total_pool: 0,
            bettor_count: 2,
            encrypted_pool: [0u8; 32],
            winning_pool: 0,
            winning_pool_posted: false,
            fee_collected: false,
            cancel_reason: String::new(),
            bump: 255,
        };
        transport
            .accounts
            .lock()
            .unwrap()
            .insert(pda::market_address(&veilmarket::ID, id), account_bytes(&market));
    }

    #[test]
    fn missing_endpoint_is_an_environment_error() {
        let cluster = ClusterConfig {
            name: "test".to_string(),
            endpoint: "  ".to_string(),
        };
        let config = SessionConfig::new(cluster, &Pubkey::new_unique().to_string(), 9).unwrap();
        let result = BetSession::connect(config, MockTransport::default());
        assert!(matches!(result, Err(ClientError::Environment(_))));
    }

    #[test]
    fn malformed_addresses_are_rejected_up_front() {
        let cluster = ClusterConfig {
            name: "test".to_string(),
            endpoint: "http://127.0.0.1:8899".to_string(),
        };
        assert!(matches!(
            SessionConfig::new(cluster.clone(), "not-a-mint", 9),
            Err(ClientError::InvalidAddress(_))
        ));

        let config = SessionConfig::new(cluster, &Pubkey::new_unique().to_string(), 9).unwrap();
        assert!(matches!(
            config.with_program("0xdeadbeef"),
            Err(ClientError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn read_only_session_rejects_writes() {
        let transport = MockTransport::default();
        let session = test_session(transport.clone(), false);

        assert!(matches!(
            session.place_bet(0, 0, "0.5").await,
            Err(ClientError::WalletNotConnected)
        ));
        assert!(matches!(
            session.refund_bet(0).await,
            Err(ClientError::WalletNotConnected)
        ));
        assert_eq!(transport.fetches.load(Ordering::SeqCst), 0);
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_amounts_fail_before_any_network_call() {
        let transport = MockTransport::default();
        let session = test_session(transport.clone(), true);

        assert!(matches!(
            session.place_bet(0, 0, "abc").await,
            Err(ClientError::InvalidAmount(_))
        ));
        assert!(matches!(
            session.place_bet(0, 0, "0").await,
            Err(ClientError::InvalidAmount(_))
        ));
        assert_eq!(transport.fetches.load(Ordering::SeqCst), 0);
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn market_prechecks_stop_submission() {
        let transport = MockTransport::default();
        seed_market(&transport, 0, MarketStatus::Active, Pubkey::new_unique());
        seed_market(&transport, 1, MarketStatus::Closed, Pubkey::new_unique());
        let session = test_session(transport.clone(), true);

        // Below min bet (0.001 < 0.01)
        assert!(matches!(
            session.place_bet(0, 0, "0.001").await,
            Err(ClientError::AmountOutOfBounds { .. })
        ));
        // Above max bet
        assert!(matches!(
            session.place_bet(0, 0, "11").await,
            Err(ClientError::AmountOutOfBounds { .. })
        ));
        // Option index out of range
        assert!(matches!(
            session.place_bet(0, 5, "0.5").await,
            Err(ClientError::InvalidOption { .. })
        ));
        // Market no longer accepting bets
        assert!(matches!(
            session.place_bet(1, 0, "0.5").await,
            Err(ClientError::MarketNotActive(1))
        ));

        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn place_bet_submits_one_atomic_instruction() {
        let transport = MockTransport::default();
        seed_market(&transport, 0, MarketStatus::Active, Pubkey::new_unique());
        let session = test_session(transport.clone(), true);

        session.place_bet(0, 1, "0.5").await.unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let message = &sent[0].message;
        assert_eq!(message.instructions.len(), 1);
        let program_index = message.instructions[0].program_id_index as usize;
        assert_eq!(message.account_keys[program_index], veilmarket::ID);
    }

    #[tokio::test]
    async fn rejections_keep_the_revert_reason_verbatim() {
        let mut transport = MockTransport::default();
        transport.reject_with =
            Some("Error Code: AmountOutOfBounds. Error Number: 6002.".to_string());
        seed_market(&transport, 0, MarketStatus::Active, Pubkey::new_unique());
        let session = test_session(transport.clone(), true);

        let err = session.place_bet(0, 0, "0.5").await.unwrap_err();
        assert!(err.to_string().contains("Error Code: AmountOutOfBounds"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn duplicate_submissions_are_guarded() {
        let release = Arc::new(Notify::new());
        let mut transport = MockTransport::default();
        transport.hold = Some(Arc::clone(&release));
        seed_market(&transport, 0, MarketStatus::Active, Pubkey::new_unique());

        let session = Arc::new(test_session(transport.clone(), true));

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.place_bet(0, 0, "0.5").await })
        };

        // Wait until the first submission reaches the transport
        while !transport.sending.load(Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        assert!(matches!(
            session.place_bet(0, 0, "0.5").await,
            Err(ClientError::SubmissionInFlight)
        ));

        release.notify_one();
        assert!(first.await.unwrap().is_ok());
        assert_eq!(transport.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn refund_and_claim_are_plain_calls() {
        let transport = MockTransport::default();
        seed_market(&transport, 0, MarketStatus::Cancelled, Pubkey::new_unique());
        let session = test_session(transport.clone(), true);

        session.refund_bet(0).await.unwrap();
        session.claim_payout(0).await.unwrap();
        assert_eq!(transport.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn read_surface_projections() {
        let transport = MockTransport::default();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        seed_config(&transport, 3);
        seed_market(&transport, 0, MarketStatus::Active, alice);
        seed_market(&transport, 1, MarketStatus::Cancelled, alice);
        seed_market(&transport, 2, MarketStatus::Active, bob);

        let session = test_session(transport.clone(), false);

        assert_eq!(session.active_markets().await.unwrap(), vec![0, 2]);
        assert_eq!(session.user_created_markets(alice).await.unwrap(), vec![0, 1]);
        assert_eq!(session.bettor_count(0).await.unwrap(), 2);
        assert_eq!(session.market_creation_fee().await.unwrap(), 1_000);

        assert!(matches!(
            session.market(9).await,
            Err(ClientError::MarketNotFound(9))
        ));
    }
}
