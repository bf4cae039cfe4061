//! Reads and decodes distribution program accounts from the cluster.
//!
//! An address with no account, or an account with no data, is reported as
//! `None`. An account that exists but does not hold the expected record is an
//! error.

use {
    crate::cli::CliError,
    distribution_interface::{
        pda::{find_global_address, find_mined_info_address},
        state::{DistributionAccount, GlobalInfo, MinedInfo},
    },
    log::{debug, info, warn},
    solana_account::Account,
    solana_account_decoder_client_types::UiAccountEncoding,
    solana_commitment_config::CommitmentConfig,
    solana_pubkey::Pubkey,
    solana_rpc_client::nonblocking::rpc_client::RpcClient,
    solana_rpc_client_api::{
        config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
        filter::{Memcmp, RpcFilterType},
    },
};

/// Decodes `account` as a `T` owned by `program_id`.
pub fn decode_account<T: DistributionAccount>(
    address: &Pubkey,
    account: &Account,
    program_id: &Pubkey,
) -> Result<Option<T>, CliError> {
    if account.data.is_empty() {
        return Ok(None);
    }
    if account.owner != *program_id {
        return Err(CliError::InvalidAccountOwner {
            address: *address,
            owner: account.owner,
        });
    }
    T::try_from_account_data(&account.data)
        .map(Some)
        .map_err(|source| CliError::AccountDecode {
            address: *address,
            source,
        })
}

pub async fn fetch_account<T: DistributionAccount>(
    rpc_client: &RpcClient,
    address: &Pubkey,
    program_id: &Pubkey,
    commitment: CommitmentConfig,
) -> Result<Option<T>, CliError> {
    let account = rpc_client
        .get_account_with_commitment(address, commitment)
        .await?
        .value;
    match account {
        Some(account) => decode_account(address, &account, program_id),
        None => Ok(None),
    }
}

pub async fn fetch_global_info(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    commitment: CommitmentConfig,
) -> Result<Option<GlobalInfo>, CliError> {
    let (address, _) = find_global_address(program_id)?;
    debug!("Global address: {address}");
    fetch_account(rpc_client, &address, program_id, commitment).await
}

pub async fn fetch_mined_info(
    rpc_client: &RpcClient,
    block_number: u64,
    program_id: &Pubkey,
    commitment: CommitmentConfig,
) -> Result<Option<MinedInfo>, CliError> {
    let (address, _) = find_mined_info_address(block_number, program_id)?;
    debug!("Mined info address for block {block_number}: {address}");
    fetch_account(rpc_client, &address, program_id, commitment).await
}

/// Filters for `getProgramAccounts`: exact `MinedInfo` size, and its
/// discriminator at offset 0 so other 64-byte accounts are never returned.
pub fn mined_info_filters() -> Vec<RpcFilterType> {
    vec![
        RpcFilterType::DataSize(MinedInfo::SPACE as u64),
        RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
            0,
            MinedInfo::DISCRIMINATOR.to_vec(),
        )),
    ]
}

/// `getProgramAccounts` configuration for `MinedInfo` records. Account data is
/// requested as base64 so full records come back regardless of node defaults.
pub fn mined_info_accounts_config(commitment: CommitmentConfig) -> RpcProgramAccountsConfig {
    RpcProgramAccountsConfig {
        filters: Some(mined_info_filters()),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            commitment: Some(commitment),
            ..RpcAccountInfoConfig::default()
        },
        ..RpcProgramAccountsConfig::default()
    }
}

/// Keeps the accounts that are `MinedInfo` records, in the order given.
pub fn decode_mined_info_accounts(accounts: Vec<(Pubkey, Account)>) -> Vec<(Pubkey, MinedInfo)> {
    accounts
        .into_iter()
        .filter_map(|(address, account)| {
            if account.data.len() != MinedInfo::SPACE {
                debug!(
                    "Skipping {address}: {} bytes is not a mined info record",
                    account.data.len()
                );
                return None;
            }
            match MinedInfo::try_from_account_data(&account.data) {
                Ok(mined_info) => Some((address, mined_info)),
                Err(err) => {
                    warn!("Skipping {address}: {err}");
                    None
                }
            }
        })
        .collect()
}

/// Every `MinedInfo` account of the program, in whatever order the RPC node
/// returns them.
pub async fn fetch_all_mined_info(
    rpc_client: &RpcClient,
    program_id: &Pubkey,
    commitment: CommitmentConfig,
) -> Result<Vec<(Pubkey, MinedInfo)>, CliError> {
    info!("Fetching all mined info accounts of {program_id}");
    let accounts = rpc_client
        .get_program_accounts_with_config(program_id, mined_info_accounts_config(commitment))
        .await?;
    info!("Found {} accounts", accounts.len());
    Ok(decode_mined_info_accounts(accounts))
}
