//! The launch pipeline: upload, compose, submit
//!
//! Strictly sequential; every stage's output is a hard input of the next,
//! and any stage failure aborts the run. A retried run starts from the
//! upload again.

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};

use crate::client::LedgerClient;
use crate::compose::{compose, LaunchTransaction};
use crate::config::TokenConfig;
use crate::error::LaunchResult;
use crate::publisher::MetadataStore;

/// Terminal result of a confirmed launch
#[derive(Debug, Clone)]
pub struct LaunchOutcome {
    /// Confirmed transaction signature
    pub signature: Signature,

    /// Where the descriptor was published
    pub metadata_uri: String,

    /// The new mint address
    pub mint: Pubkey,

    /// The holding account credited with the supply
    pub destination: Pubkey,
}

impl LaunchOutcome {
    /// Explorer link for independent verification
    pub fn explorer_url(&self, cluster: &str) -> String {
        if cluster == "mainnet" {
            format!("https://explorer.solana.com/tx/{}", self.signature)
        } else {
            format!(
                "https://explorer.solana.com/tx/{}?cluster={}",
                self.signature, cluster
            )
        }
    }
}

/// Publish the descriptor and compose the launch transaction.
///
/// The upload strictly precedes composition: the returned transaction embeds
/// the published URI. No ledger write happens here; the only ledger read is
/// the rent-exemption query, issued after the upload has succeeded.
pub async fn prepare<'a>(
    store: &dyn MetadataStore,
    ledger: &dyn LedgerClient,
    config: &TokenConfig,
    payer: &'a Keypair,
    mint: &'a Keypair,
    destination_owner: &Pubkey,
) -> LaunchResult<(String, LaunchTransaction<'a>)> {
    log::info!("publishing metadata for {} ({})", config.name, config.symbol);
    let uri = store.publish(&config.descriptor()).await?;
    log::info!("metadata published at {}", uri);

    let metadata = config.finalize(uri.clone());

    let rent_lamports = ledger.minimum_rent_for_mint().await?;
    let launch = compose(config, &metadata, payer, mint, destination_owner, rent_lamports)?;
    log::info!(
        "composed launch transaction: mint {}, {} base units to {}",
        launch.mint_address,
        launch.base_units,
        launch.destination
    );

    Ok((uri, launch))
}

/// Run the whole pipeline and wait for confirmation
pub async fn launch(
    store: &dyn MetadataStore,
    ledger: &dyn LedgerClient,
    config: &TokenConfig,
    payer: &Keypair,
    mint: &Keypair,
    destination_owner: &Pubkey,
) -> LaunchResult<LaunchOutcome> {
    let (metadata_uri, transaction) =
        prepare(store, ledger, config, payer, mint, destination_owner).await?;

    log::info!("submitting launch transaction");
    let signature = ledger.submit(&transaction).await?;
    log::info!("confirmed: {}", signature);

    Ok(LaunchOutcome {
        signature,
        metadata_uri,
        mint: transaction.mint_address,
        destination: transaction.destination,
    })
}
