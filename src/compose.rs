//! Launch transaction composition
//!
//! Builds the single atomic transaction that creates the mint, creates the
//! destination holding account, mints the initial supply, and attaches the
//! metadata record. Instruction order is significant: each instruction's
//! preconditions are established by an earlier one.

use mpl_token_metadata::instructions::CreateMetadataAccountV3Builder;
use mpl_token_metadata::types::DataV2;
use solana_sdk::instruction::Instruction;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_sdk::system_instruction;
use spl_token::state::Mint;

use crate::config::TokenConfig;
use crate::error::{LaunchError, LaunchResult};
use crate::metadata::OnChainMetadata;
use crate::pda::{find_associated_token_address, find_metadata_address};

/// A composed launch transaction together with its required signer set.
///
/// Submission takes this value whole, so it cannot be handed a signer list
/// that does not match the instructions: the payer funds fees and holds the
/// mint, freeze, and update authorities; the mint keypair co-signs exactly
/// once because account allocation asserts ownership of the new address.
pub struct LaunchTransaction<'a> {
    /// The five launch instructions, in execution order
    pub instructions: Vec<Instruction>,

    /// Fee payer and authority identity
    pub payer: &'a Keypair,

    /// The token's own identity; signs once at creation, never again
    pub mint: &'a Keypair,

    /// The new mint address
    pub mint_address: Pubkey,

    /// Metadata PDA the on-chain record is written to
    pub metadata_address: Pubkey,

    /// Destination associated token account credited with the supply
    pub destination: Pubkey,

    /// Initial supply in base units
    pub base_units: u64,
}

impl LaunchTransaction<'_> {
    pub fn fee_payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// The exact signer set the composed instructions require
    pub fn signers(&self) -> Vec<&dyn Signer> {
        vec![self.payer, self.mint]
    }
}

/// Compose the five-instruction launch transaction.
///
/// `rent_lamports` is the rent-exemption minimum for a mint account,
/// queried from the cluster by the caller. The payer becomes mint, freeze,
/// and update authority; the supply is credited to `destination_owner`'s
/// associated token account, created idempotently so a pre-existing
/// holding account is not an error.
pub fn compose<'a>(
    config: &TokenConfig,
    metadata: &OnChainMetadata,
    payer: &'a Keypair,
    mint: &'a Keypair,
    destination_owner: &Pubkey,
    rent_lamports: u64,
) -> LaunchResult<LaunchTransaction<'a>> {
    if metadata.uri.is_empty() {
        return Err(LaunchError::IncompleteMetadata);
    }

    let base_units = config.base_units()?;

    let payer_address = payer.pubkey();
    let mint_address = mint.pubkey();
    let metadata_address = find_metadata_address(&mint_address);
    let destination = find_associated_token_address(destination_owner, &mint_address);

    // 1. Reserve ledger space for the mint record, owned by the token program.
    let allocate_mint = system_instruction::create_account(
        &payer_address,
        &mint_address,
        rent_lamports,
        Mint::LEN as u64,
        &spl_token::id(),
    );

    // 2. Write decimals and authorities into the freshly allocated account.
    let initialize_mint = spl_token::instruction::initialize_mint(
        &spl_token::id(),
        &mint_address,
        &payer_address,
        Some(&payer_address),
        config.decimals,
    )?;

    // 3. Destination holding account at its canonical derived address.
    let create_holding_account =
        spl_associated_token_account::instruction::create_associated_token_account_idempotent(
            &payer_address,
            destination_owner,
            &mint_address,
            &spl_token::id(),
        );

    // 4. Credit the full supply, scaled to base units.
    let mint_supply = spl_token::instruction::mint_to(
        &spl_token::id(),
        &mint_address,
        &destination,
        &payer_address,
        &[],
        base_units,
    )?;

    // 5. Attach the metadata record referencing the published URI.
    let attach_metadata = CreateMetadataAccountV3Builder::new()
        .metadata(metadata_address)
        .mint(mint_address)
        .mint_authority(payer_address)
        .payer(payer_address)
        .update_authority(payer_address, true)
        .data(DataV2 {
            name: metadata.name.clone(),
            symbol: metadata.symbol.clone(),
            uri: metadata.uri.clone(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        })
        .is_mutable(true)
        .instruction();

    Ok(LaunchTransaction {
        instructions: vec![
            allocate_mint,
            initialize_mint,
            create_holding_account,
            mint_supply,
            attach_metadata,
        ],
        payer,
        mint,
        mint_address,
        metadata_address,
        destination,
        base_units,
    })
}
