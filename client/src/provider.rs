//! Signing Provider Resolution
//!
//! Several signer sources may be present on a machine at once (an
//! explicit keypair handed in by the host application, an environment
//! override, the stock CLI wallet file). The candidate list and its
//! priority order are a first-class configuration value: resolution
//! walks it once at session start and the winner is pinned for the
//! session's lifetime.

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair};
use solana_sdk::signer::Signer;

use crate::error::ClientError;

/// One candidate signer source, in the order it should be tried
pub enum ProviderSource {
    /// A keypair supplied directly by the host application
    Explicit(Arc<Keypair>),
    /// An environment variable holding a keypair file path
    EnvPath(String),
    /// A keypair file on disk
    File(PathBuf),
}

/// Default candidate order: explicit override first, then the
/// environment override, then the stock CLI wallet.
pub fn default_sources() -> Vec<ProviderSource> {
    let mut sources = vec![
        ProviderSource::EnvPath("VEILMARKET_WALLET".to_string()),
        ProviderSource::EnvPath("ANCHOR_WALLET".to_string()),
    ];
    if let Ok(home) = std::env::var("HOME") {
        sources.push(ProviderSource::File(
            PathBuf::from(home).join(".config/solana/id.json"),
        ));
    }
    sources
}

/// A resolved signing provider: the connected identity plus a signer
/// for both engine key derivation and transaction signing
pub struct SignerProvider {
    keypair: Arc<Keypair>,
}

impl SignerProvider {
    /// The connected identity
    pub fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub fn signer(&self) -> &dyn Signer {
        self.keypair.as_ref()
    }
}

/// Walk the candidate list in order and pin the first source that
/// yields a keypair. Unreadable candidates are skipped with a warning,
/// they do not abort resolution.
pub fn resolve(sources: &[ProviderSource]) -> Result<SignerProvider, ClientError> {
    for source in sources {
        match source {
            ProviderSource::Explicit(keypair) => {
                debug!("signer resolved from explicit keypair");
                return Ok(SignerProvider {
                    keypair: Arc::clone(keypair),
                });
            }
            ProviderSource::EnvPath(var) => {
                let Ok(path) = std::env::var(var) else {
                    continue;
                };
                match read_keypair_file(&path) {
                    Ok(keypair) => {
                        debug!("signer resolved from ${}", var);
                        return Ok(SignerProvider {
                            keypair: Arc::new(keypair),
                        });
                    }
                    Err(err) => warn!("skipping ${}: {}", var, err),
                }
            }
            ProviderSource::File(path) => match read_keypair_file(path) {
                Ok(keypair) => {
                    debug!("signer resolved from {}", path.display());
                    return Ok(SignerProvider {
                        keypair: Arc::new(keypair),
                    });
                }
                Err(err) => warn!("skipping {}: {}", path.display(), err),
            },
        }
    }

    Err(ClientError::ProviderUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_source_wins() {
        let keypair = Arc::new(Keypair::new());
        let expected = keypair.pubkey();
        let sources = vec![
            ProviderSource::Explicit(keypair),
            ProviderSource::EnvPath("VEILMARKET_TEST_UNSET".to_string()),
        ];

        let provider = resolve(&sources).unwrap();
        assert_eq!(provider.address(), expected);
    }

    #[test]
    fn order_is_respected() {
        let first = Arc::new(Keypair::new());
        let second = Arc::new(Keypair::new());
        let sources = vec![
            ProviderSource::Explicit(Arc::clone(&first)),
            ProviderSource::Explicit(second),
        ];

        assert_eq!(resolve(&sources).unwrap().address(), first.pubkey());
    }

    #[test]
    fn empty_and_dead_sources_fail() {
        assert!(matches!(
            resolve(&[]),
            Err(ClientError::ProviderUnavailable)
        ));

        let sources = vec![
            ProviderSource::EnvPath("VEILMARKET_TEST_UNSET".to_string()),
            ProviderSource::File(PathBuf::from("/nonexistent/id.json")),
        ];
        assert!(matches!(
            resolve(&sources),
            Err(ClientError::ProviderUnavailable)
        ));
    }
}
