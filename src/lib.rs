//! One-shot SPL token launcher.
//!
//! Publishes a token descriptor to an off-chain store, then creates the
//! mint, the destination holding account, the initial supply, and the
//! on-chain metadata record in a single atomic transaction, and waits for
//! confirmation.

pub mod client;
pub mod compose;
pub mod config;
pub mod error;
pub mod metadata;
pub mod pda;
pub mod pipeline;
pub mod publisher;

pub use client::{LedgerClient, RpcLedger};
pub use compose::{compose, LaunchTransaction};
pub use config::{LaunchConfig, TokenConfig};
pub use error::{LaunchError, LaunchResult};
pub use metadata::{OnChainMetadata, TokenMetadata};
pub use pipeline::{launch, prepare, LaunchOutcome};
pub use publisher::{MetadataStore, NftStorageClient};
