//! Program-derived addresses of the distribution program's accounts.

use {
    crate::{
        constants::{GLOBAL_AUTHORITY_SEED, MINED_INFO_SEED},
        error::PdaError,
    },
    solana_pubkey::Pubkey,
};

/// Address and bump of the singleton `GlobalInfo` account:
/// `[GLOBAL_AUTHORITY_SEED]`.
pub fn find_global_address(program_id: &Pubkey) -> Result<(Pubkey, u8), PdaError> {
    Pubkey::try_find_program_address(&[GLOBAL_AUTHORITY_SEED], program_id).ok_or(
        PdaError::NoViableBump {
            seed: GLOBAL_AUTHORITY_SEED,
        },
    )
}

/// Address and bump of the `MinedInfo` account for `block_number`:
/// `[MINED_INFO_SEED, block_number.to_le_bytes()]`.
pub fn find_mined_info_address(
    block_number: u64,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), PdaError> {
    Pubkey::try_find_program_address(
        &[MINED_INFO_SEED, &block_number.to_le_bytes()],
        program_id,
    )
    .ok_or(PdaError::NoViableBump {
        seed: MINED_INFO_SEED,
    })
}

/// Associated token account of `wallet` for the Token-2022 `mint`.
pub fn get_reward_token_account(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account_interface::address::get_associated_token_address_with_program_id(
        wallet,
        mint,
        &spl_token_2022_interface::id(),
    )
}
