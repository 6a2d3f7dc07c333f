use std::fs;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;

use crate::error::{LaunchError, LaunchResult};
use crate::metadata::{OnChainMetadata, TokenMetadata, MAX_NAME_LEN, MAX_SYMBOL_LEN};

/// Launch configuration loaded from a TOML file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LaunchConfig {
    /// Cluster connection settings
    pub cluster: ClusterConfig,

    /// Off-chain metadata store settings
    pub storage: StorageConfig,

    /// The token to create
    pub token: TokenConfig,
}

/// Cluster connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClusterConfig {
    /// Cluster name, used for the explorer link ("mainnet", "devnet", ...)
    pub name: String,

    /// RPC endpoint URL
    pub rpc_url: String,

    /// Transaction commitment level
    pub commitment: String,

    /// Upper bound on the confirmation wait, in seconds
    pub confirm_timeout_secs: u64,
}

/// Off-chain metadata store settings (nft.storage-compatible API)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Upload endpoint URL
    pub endpoint: String,

    /// API token; falls back to the NFT_STORAGE_TOKEN environment variable
    pub api_token: Option<String>,
}

/// Immutable description of the token to create
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Token name (on-chain limit: 32 bytes)
    pub name: String,

    /// Ticker symbol (on-chain limit: 10 bytes)
    pub symbol: String,

    /// Free-text description, off-chain only
    pub description: String,

    /// Image reference, off-chain only
    pub image: String,

    /// Decimal precision
    pub decimals: u8,

    /// Total supply in whole tokens, before decimal scaling
    pub supply: u64,
}

impl LaunchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &str) -> LaunchResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            LaunchError::InvalidConfig(format!("failed to read config file {}: {}", path, e))
        })?;

        let config: LaunchConfig = toml::from_str(&content).map_err(|e| {
            LaunchError::InvalidConfig(format!("failed to parse config file {}: {}", path, e))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &str) -> LaunchResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            LaunchError::InvalidConfig(format!("failed to serialize config: {}", e))
        })?;
        fs::write(path, content).map_err(|e| {
            LaunchError::InvalidConfig(format!("failed to write config file {}: {}", path, e))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> LaunchResult<()> {
        if self.cluster.rpc_url.is_empty() {
            return Err(LaunchError::InvalidConfig("rpc_url is empty".to_string()));
        }

        if CommitmentConfig::from_str(&self.cluster.commitment).is_err() {
            return Err(LaunchError::InvalidConfig(format!(
                "unknown commitment level '{}'",
                self.cluster.commitment
            )));
        }

        if self.cluster.confirm_timeout_secs == 0 {
            return Err(LaunchError::InvalidConfig(
                "confirm_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.storage.endpoint.is_empty() {
            return Err(LaunchError::InvalidConfig(
                "storage endpoint is empty".to_string(),
            ));
        }

        self.token.validate()
    }

    /// Parsed commitment level
    pub fn commitment(&self) -> CommitmentConfig {
        // validate() guarantees this parses
        CommitmentConfig::from_str(&self.cluster.commitment).unwrap_or_default()
    }
}

impl StorageConfig {
    /// API token from the config file, or the NFT_STORAGE_TOKEN environment variable
    pub fn resolve_token(&self) -> LaunchResult<String> {
        if let Some(token) = &self.api_token {
            return Ok(token.clone());
        }
        std::env::var("NFT_STORAGE_TOKEN").map_err(|_| {
            LaunchError::InvalidConfig(
                "no storage api_token in config and NFT_STORAGE_TOKEN is not set".to_string(),
            )
        })
    }
}

impl TokenConfig {
    /// Validate token parameters against on-chain limits
    pub fn validate(&self) -> LaunchResult<()> {
        if self.name.is_empty() {
            return Err(LaunchError::InvalidConfig(
                "token name is empty".to_string(),
            ));
        }

        if self.name.len() > MAX_NAME_LEN {
            return Err(LaunchError::InvalidConfig(format!(
                "token name exceeds {} bytes",
                MAX_NAME_LEN
            )));
        }

        if self.symbol.is_empty() {
            return Err(LaunchError::InvalidConfig(
                "token symbol is empty".to_string(),
            ));
        }

        if self.symbol.len() > MAX_SYMBOL_LEN {
            return Err(LaunchError::InvalidConfig(format!(
                "token symbol exceeds {} bytes",
                MAX_SYMBOL_LEN
            )));
        }

        if self.supply == 0 {
            return Err(LaunchError::InvalidConfig(
                "supply must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The off-chain descriptor uploaded to the metadata store
    pub fn descriptor(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
        }
    }

    /// Bind the published URI, producing the on-chain metadata value.
    ///
    /// This is the only way to obtain `OnChainMetadata`; the URI is supplied
    /// exactly once, after the upload completes.
    pub fn finalize(&self, uri: String) -> OnChainMetadata {
        OnChainMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            uri,
        }
    }

    /// Total supply scaled to base units: `supply * 10^decimals`.
    ///
    /// Integer arithmetic only; values that do not fit in a u64 are
    /// rejected rather than silently truncated.
    pub fn base_units(&self) -> LaunchResult<u64> {
        let overflow = || LaunchError::SupplyOverflow {
            supply: self.supply,
            decimals: self.decimals,
        };

        let scale = 10u128.checked_pow(self.decimals as u32).ok_or_else(overflow)?;
        let scaled = (self.supply as u128).checked_mul(scale).ok_or_else(overflow)?;

        u64::try_from(scaled).map_err(|_| overflow())
    }
}

/// Create an example configuration file
pub fn create_example_config(path: &str) -> LaunchResult<()> {
    let example = LaunchConfig {
        cluster: ClusterConfig {
            name: "devnet".to_string(),
            rpc_url: "https://api.devnet.solana.com".to_string(),
            commitment: "confirmed".to_string(),
            confirm_timeout_secs: 90,
        },
        storage: StorageConfig {
            endpoint: "https://api.nft.storage/upload".to_string(),
            api_token: None,
        },
        token: TokenConfig {
            name: "Example Token".to_string(),
            symbol: "EXMPL".to_string(),
            description: "An example fungible token".to_string(),
            image: "https://example.com/token.png".to_string(),
            decimals: 6,
            supply: 1_000_000_000,
        },
    };

    example.save(path)
}
