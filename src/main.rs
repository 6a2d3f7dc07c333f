use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use solana_sdk::signature::{read_keypair_file, Keypair};
use solana_sdk::signer::Signer;

use token_launch::pda::parse_address;
use token_launch::{config, pipeline, LaunchConfig, NftStorageClient, RpcLedger};

#[derive(Parser, Debug)]
#[command(name = "token-launch")]
#[command(about = "Create an SPL token with off-chain metadata in one transaction")]
#[command(version)]
struct Args {
    /// Path to the launch configuration file
    #[arg(short, long, default_value = "launch.toml")]
    config: String,

    /// Payer/authority keypair file (solana-cli JSON or a base58 secret)
    #[arg(long)]
    payer: Option<String>,

    /// Mint keypair file; a fresh keypair is generated when omitted
    #[arg(long)]
    mint_keypair: Option<String>,

    /// Destination wallet for the initial supply (defaults to the payer)
    #[arg(long)]
    destination: Option<String>,

    /// RPC URL override
    #[arg(long)]
    rpc_url: Option<String>,

    /// Publish and compose, but do not submit
    #[arg(long)]
    dry_run: bool,

    /// Write an example configuration file and exit
    #[arg(long)]
    init_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Load a keypair from a file path, expanding ~ if needed.
///
/// Accepts the solana-cli JSON array format, or a bare base58-encoded
/// secret key as exported by browser wallets.
fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded_path = if path.starts_with('~') {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        path.replacen('~', &home, 1)
    } else {
        path.to_string()
    };

    let content = std::fs::read_to_string(&expanded_path)
        .with_context(|| format!("failed to read keypair file {}", expanded_path))?;

    if content.trim_start().starts_with('[') {
        read_keypair_file(&expanded_path)
            .map_err(|e| anyhow::anyhow!("failed to load keypair from {}: {}", expanded_path, e))
    } else {
        let bytes = bs58::decode(content.trim())
            .into_vec()
            .with_context(|| format!("keypair file {} is not JSON or base58", expanded_path))?;
        Keypair::from_bytes(&bytes)
            .map_err(|e| anyhow::anyhow!("invalid secret key in {}: {}", expanded_path, e))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    if args.init_config {
        config::create_example_config(&args.config)?;
        log::info!("wrote example configuration to {}", args.config);
        return Ok(());
    }

    let mut config = LaunchConfig::load(&args.config)?;
    if let Some(rpc_url) = args.rpc_url {
        config.cluster.rpc_url = rpc_url;
    }

    let payer_path = args
        .payer
        .context("--payer is required (path to the fee payer keypair)")?;
    let payer = load_keypair(&payer_path)?;
    log::info!("payer and authority: {}", payer.pubkey());

    let mint = match &args.mint_keypair {
        Some(path) => load_keypair(path)?,
        None => {
            log::info!("no mint keypair provided, generating a fresh one");
            Keypair::new()
        }
    };
    log::info!("mint address: {}", mint.pubkey());

    let destination_owner = match &args.destination {
        Some(addr) => parse_address(addr)?,
        None => payer.pubkey(),
    };

    let store = NftStorageClient::new(
        config.storage.endpoint.clone(),
        config.storage.resolve_token()?,
    );
    let ledger = RpcLedger::new(
        config.cluster.rpc_url.clone(),
        config.commitment(),
        Duration::from_secs(config.cluster.confirm_timeout_secs),
    );

    if args.dry_run {
        log::warn!("dry run: the transaction will not be submitted");
        let (uri, launch) = pipeline::prepare(
            &store,
            &ledger,
            &config.token,
            &payer,
            &mint,
            &destination_owner,
        )
        .await?;

        println!("metadata URI:     {}", uri);
        println!("mint:             {}", launch.mint_address);
        println!("metadata account: {}", launch.metadata_address);
        println!("destination:      {}", launch.destination);
        println!("base units:       {}", launch.base_units);
        for (i, ix) in launch.instructions.iter().enumerate() {
            println!("instruction {}:    program {}", i + 1, ix.program_id);
        }
        return Ok(());
    }

    let outcome = pipeline::launch(
        &store,
        &ledger,
        &config.token,
        &payer,
        &mint,
        &destination_owner,
    )
    .await?;

    println!(
        "Minted {} {} to {}",
        config.token.supply, config.token.symbol, outcome.destination
    );
    println!("Transaction: {}", outcome.signature);
    println!("View: {}", outcome.explorer_url(&config.cluster.name));

    Ok(())
}
