//! Deterministic address derivation
//!
//! These are pure functions of their inputs: the composer and any later
//! on-chain reader must arrive at the same addresses with no coordination.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;

use crate::error::{LaunchError, LaunchResult};

/// Derive the Token Metadata program PDA for a mint
pub fn find_metadata_address(mint: &Pubkey) -> Pubkey {
    mpl_token_metadata::accounts::Metadata::find_pda(mint).0
}

/// Derive the canonical associated token account for (owner, mint)
pub fn find_associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, mint)
}

/// Parse a base58 address string
pub fn parse_address(s: &str) -> LaunchResult<Pubkey> {
    Pubkey::from_str(s).map_err(|e| LaunchError::InvalidAddress(format!("{}: {}", s, e)))
}
