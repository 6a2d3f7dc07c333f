//! Off-chain metadata publishing
//!
//! The descriptor must be uploaded and addressable before the launch
//! transaction is composed: the on-chain record cannot forward-reference
//! data that does not exist yet.

use async_trait::async_trait;

use crate::error::{LaunchError, LaunchResult};
use crate::metadata::TokenMetadata;

/// A durable, content-addressed store for token descriptors
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Upload the descriptor and return a stable URI any third party can fetch
    async fn publish(&self, descriptor: &TokenMetadata) -> LaunchResult<String>;
}

/// nft.storage-compatible HTTP store
pub struct NftStorageClient {
    http: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl NftStorageClient {
    pub fn new(endpoint: String, api_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_token,
        }
    }
}

#[async_trait]
impl MetadataStore for NftStorageClient {
    async fn publish(&self, descriptor: &TokenMetadata) -> LaunchResult<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(descriptor)
            .send()
            .await
            .map_err(|e| LaunchError::Publish(format!("upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LaunchError::Publish(format!(
                "store rejected the descriptor ({}): {}",
                status, body
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LaunchError::Publish(format!("invalid store response: {}", e)))?;

        let cid = body["value"]["cid"]
            .as_str()
            .ok_or_else(|| LaunchError::Publish("store response has no cid".to_string()))?;

        Ok(format!("https://nftstorage.link/ipfs/{}", cid))
    }
}
