//! Error types for the launch pipeline

use solana_sdk::program_error::ProgramError;
use solana_sdk::signature::Signature;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    /// The off-chain store was unreachable or rejected the descriptor.
    #[error("metadata upload failed: {0}")]
    Publish(String),

    /// A derivation input could not be parsed as a valid address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Composition was attempted before the metadata URI was set.
    #[error("on-chain metadata has no URI; the upload must complete before the transaction is composed")]
    IncompleteMetadata,

    /// Scaling the supply to base units does not fit in a u64.
    #[error("supply {supply} with {decimals} decimals overflows the u64 base-unit range")]
    SupplyOverflow { supply: u64, decimals: u8 },

    /// The cluster rejected the transaction outright.
    #[error("transaction rejected: {0}")]
    SubmissionRejected(String),

    /// The transaction was accepted but finality was not observed in time.
    #[error("transaction {signature} was not confirmed within {timeout_secs}s")]
    ConfirmationTimeout {
        signature: Signature,
        timeout_secs: u64,
    },

    /// RPC error
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An SPL instruction could not be built.
    #[error("instruction build failed: {0}")]
    Instruction(#[from] ProgramError),
}

pub type LaunchResult<T> = Result<T, LaunchError>;
