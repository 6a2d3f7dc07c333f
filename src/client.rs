//! Submission and confirmation client

use std::time::Duration;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::program_pack::Pack;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use spl_token::state::Mint;

use crate::compose::LaunchTransaction;
use crate::error::{LaunchError, LaunchResult};

/// Interval between signature status polls while awaiting finality
const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Ledger operations the pipeline depends on
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Minimum balance for a rent-exempt mint account
    async fn minimum_rent_for_mint(&self) -> LaunchResult<u64>;

    /// Sign with the launch's own signer set, submit once, and block until
    /// finality is observed or the wait budget runs out
    async fn submit(&self, launch: &LaunchTransaction<'_>) -> LaunchResult<Signature>;
}

/// Production [`LedgerClient`] over a Solana RPC endpoint
pub struct RpcLedger {
    rpc: RpcClient,
    commitment: CommitmentConfig,
    confirm_timeout: Duration,
}

impl RpcLedger {
    pub fn new(rpc_url: String, commitment: CommitmentConfig, confirm_timeout: Duration) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url, commitment),
            commitment,
            confirm_timeout,
        }
    }

    /// RPC endpoint URL
    pub fn url(&self) -> String {
        self.rpc.url()
    }

    async fn await_confirmation(&self, signature: &Signature) -> LaunchResult<Signature> {
        loop {
            let status = self
                .rpc
                .get_signature_status_with_commitment(signature, self.commitment)
                .await
                .map_err(|e| LaunchError::Rpc(e.to_string()))?;

            match status {
                Some(Ok(())) => return Ok(*signature),
                Some(Err(e)) => return Err(LaunchError::SubmissionRejected(e.to_string())),
                None => tokio::time::sleep(CONFIRM_POLL_INTERVAL).await,
            }
        }
    }
}

#[async_trait]
impl LedgerClient for RpcLedger {
    async fn minimum_rent_for_mint(&self) -> LaunchResult<u64> {
        self.rpc
            .get_minimum_balance_for_rent_exemption(Mint::LEN)
            .await
            .map_err(|e| LaunchError::Rpc(e.to_string()))
    }

    async fn submit(&self, launch: &LaunchTransaction<'_>) -> LaunchResult<Signature> {
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| LaunchError::Rpc(e.to_string()))?;

        let tx = Transaction::new_signed_with_payer(
            &launch.instructions,
            Some(&launch.fee_payer()),
            &launch.signers(),
            blockhash,
        );

        let signature = self
            .rpc
            .send_transaction(&tx)
            .await
            .map_err(|e| LaunchError::SubmissionRejected(e.to_string()))?;

        // The transaction expires with its blockhash; a caller wanting to
        // retry after a timeout must recompose against fresh state rather
        // than resubmit this object.
        match tokio::time::timeout(self.confirm_timeout, self.await_confirmation(&signature)).await
        {
            Ok(result) => result,
            Err(_) => Err(LaunchError::ConfirmationTimeout {
                signature,
                timeout_secs: self.confirm_timeout.as_secs(),
            }),
        }
    }
}
