//! Token metadata shapes: the off-chain descriptor and the on-chain record

use serde::{Deserialize, Serialize};

/// Token Metadata program limit for the name field
pub const MAX_NAME_LEN: usize = 32;

/// Token Metadata program limit for the symbol field
pub const MAX_SYMBOL_LEN: usize = 10;

/// Descriptor uploaded to the off-chain store as JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
}

/// The record written on-chain, with the URI bound after the upload.
///
/// Constructed only through [`TokenConfig::finalize`], so the URI cannot be
/// mutated after the fact.
///
/// [`TokenConfig::finalize`]: crate::config::TokenConfig::finalize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnChainMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}
