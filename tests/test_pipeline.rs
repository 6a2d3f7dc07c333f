//! End-to-end pipeline tests against mock collaborators

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;

use token_launch::compose::LaunchTransaction;
use token_launch::{
    pipeline, LaunchError, LaunchResult, LedgerClient, MetadataStore, TokenConfig, TokenMetadata,
};

struct MockStore {
    uri: Option<String>,
}

#[async_trait]
impl MetadataStore for MockStore {
    async fn publish(&self, _descriptor: &TokenMetadata) -> LaunchResult<String> {
        self.uri
            .clone()
            .ok_or_else(|| LaunchError::Publish("store unreachable".to_string()))
    }
}

enum LedgerMode {
    Accept,
    TimeOutOnConfirmation,
}

struct MockLedger {
    mode: LedgerMode,
    rent_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    submitted_base_units: AtomicU64,
}

impl MockLedger {
    fn new(mode: LedgerMode) -> Self {
        Self {
            mode,
            rent_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            submitted_base_units: AtomicU64::new(0),
        }
    }

    fn total_calls(&self) -> usize {
        self.rent_calls.load(Ordering::SeqCst) + self.submit_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn minimum_rent_for_mint(&self) -> LaunchResult<u64> {
        self.rent_calls.fetch_add(1, Ordering::SeqCst);
        Ok(1_461_600)
    }

    async fn submit(&self, launch: &LaunchTransaction<'_>) -> LaunchResult<Signature> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted_base_units
            .store(launch.base_units, Ordering::SeqCst);

        match self.mode {
            LedgerMode::Accept => Ok(Signature::new_unique()),
            LedgerMode::TimeOutOnConfirmation => Err(LaunchError::ConfirmationTimeout {
                signature: Signature::new_unique(),
                timeout_secs: 30,
            }),
        }
    }
}

fn test_token() -> TokenConfig {
    TokenConfig {
        name: "Test Token".to_string(),
        symbol: "TEST".to_string(),
        description: "A token".to_string(),
        image: "https://example.com/t.png".to_string(),
        decimals: 6,
        supply: 1_000_000_000,
    }
}

#[tokio::test]
async fn test_launch_confirms_and_scales_supply() {
    let store = MockStore {
        uri: Some("mock://abc".to_string()),
    };
    let ledger = MockLedger::new(LedgerMode::Accept);
    let payer = Keypair::new();
    let mint = Keypair::new();
    let destination_owner = Pubkey::new_unique();

    let outcome = pipeline::launch(
        &store,
        &ledger,
        &test_token(),
        &payer,
        &mint,
        &destination_owner,
    )
    .await
    .unwrap();

    assert_ne!(outcome.signature, Signature::default());
    assert_eq!(outcome.metadata_uri, "mock://abc");
    assert_eq!(outcome.mint, mint.pubkey());
    assert_eq!(
        ledger.submitted_base_units.load(Ordering::SeqCst),
        1_000_000_000_000_000
    );
    assert_eq!(ledger.submit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_publish_failure_aborts_before_any_ledger_call() {
    let store = MockStore { uri: None };
    let ledger = MockLedger::new(LedgerMode::Accept);
    let payer = Keypair::new();
    let mint = Keypair::new();

    let result = pipeline::launch(
        &store,
        &ledger,
        &test_token(),
        &payer,
        &mint,
        &payer.pubkey(),
    )
    .await;

    assert!(matches!(result, Err(LaunchError::Publish(_))));
    assert_eq!(ledger.total_calls(), 0);
}

#[tokio::test]
async fn test_confirmation_timeout_is_surfaced_without_retry() {
    let store = MockStore {
        uri: Some("mock://abc".to_string()),
    };
    let ledger = MockLedger::new(LedgerMode::TimeOutOnConfirmation);
    let payer = Keypair::new();
    let mint = Keypair::new();

    let result = pipeline::launch(
        &store,
        &ledger,
        &test_token(),
        &payer,
        &mint,
        &payer.pubkey(),
    )
    .await;

    assert!(matches!(
        result,
        Err(LaunchError::ConfirmationTimeout { .. })
    ));
    assert_eq!(ledger.submit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_explorer_url_carries_cluster_query() {
    let outcome = pipeline::LaunchOutcome {
        signature: Signature::new_unique(),
        metadata_uri: "mock://abc".to_string(),
        mint: Pubkey::new_unique(),
        destination: Pubkey::new_unique(),
    };

    let mainnet = outcome.explorer_url("mainnet");
    assert!(mainnet.starts_with("https://explorer.solana.com/tx/"));
    assert!(!mainnet.contains("cluster"));

    let devnet = outcome.explorer_url("devnet");
    assert!(devnet.ends_with("?cluster=devnet"));
}
