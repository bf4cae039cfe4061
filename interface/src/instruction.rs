//! Instruction definitions and builders for the distribution program.

use {
    crate::{
        constants::DISCRIMINATOR_LEN,
        error::PdaError,
        pda::{find_global_address, find_mined_info_address, get_reward_token_account},
    },
    borsh::BorshSerialize,
    log::debug,
    solana_instruction::{AccountMeta, Instruction},
    solana_pubkey::Pubkey,
    solana_sdk_ids::{system_program, sysvar},
};

/// Instructions supported by the distribution program.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize)]
pub enum DistributionInstruction {
    /// Create the global state. Called once by the admin after deployment.
    ///
    /// Accounts expected:
    ///   0. `[writable, signer]` Admin, pays for the global account.
    ///   1. `[writable]`         GlobalInfo PDA (`[GLOBAL_AUTHORITY_SEED]`).
    ///   2. `[]`                 System program.
    ///   3. `[]`                 Rent sysvar.
    Initialize {
        admin_wallet: Pubkey,
        caller_wallet: Pubkey,
        /// Rewards are only paid for blocks after this one.
        starting_block: u64,
    },

    /// Replace the key allowed to call `MineBlock`. Admin only.
    ///
    /// Accounts expected:
    ///   0. `[writable, signer]` Admin.
    ///   1. `[writable]`         GlobalInfo PDA.
    UpdateCallerAddress { new_caller: Pubkey },

    /// Mint the current reward to the winner of `block_number` and record it.
    /// Caller only.
    ///
    /// Accounts expected:
    ///   0. `[writable, signer]` Caller, pays for the MinedInfo account.
    ///   1. `[writable]`         GlobalInfo PDA, the mint authority.
    ///   2. `[writable]`         MinedInfo PDA
    ///                            (`[MINED_INFO_SEED, block_number as le bytes]`).
    ///   3. `[]`                 Winner wallet.
    ///   4. `[writable]`         Reward token mint.
    ///   5. `[writable]`         Winner's associated token account.
    ///   6. `[]`                 Token-2022 program.
    ///   7. `[]`                 Associated token account program.
    ///   8. `[]`                 System program.
    MineBlock { block_number: u64 },
}

impl DistributionInstruction {
    /// `sha256("global:<method>")[..8]` of the program method.
    pub fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            Self::Initialize { .. } => [175, 175, 109, 31, 13, 152, 155, 237],
            Self::UpdateCallerAddress { .. } => [168, 14, 85, 150, 136, 100, 169, 171],
            Self::MineBlock { .. } => [47, 94, 217, 230, 127, 137, 42, 216],
        }
    }

    /// Instruction data: method discriminator followed by the borsh-encoded
    /// arguments. Unlike a plain borsh enum there is no variant index.
    pub fn pack(&self) -> Vec<u8> {
        let mut data = self.discriminator().to_vec();
        match self {
            Self::Initialize {
                admin_wallet,
                caller_wallet,
                starting_block,
            } => {
                data.extend_from_slice(admin_wallet.as_ref());
                data.extend_from_slice(caller_wallet.as_ref());
                data.extend_from_slice(&starting_block.to_le_bytes());
            }
            Self::UpdateCallerAddress { new_caller } => {
                data.extend_from_slice(new_caller.as_ref());
            }
            Self::MineBlock { block_number } => {
                data.extend_from_slice(&block_number.to_le_bytes());
            }
        }
        data
    }
}

// ── Builders ─────────────────────────────────────────────────────────────────

/// Builds `initialize`. `admin` signs, pays, and is recorded as the admin.
pub fn initialize(
    admin: &Pubkey,
    caller: &Pubkey,
    starting_block: u64,
    program_id: &Pubkey,
) -> Result<Instruction, PdaError> {
    let (global, _) = find_global_address(program_id)?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*admin, true),
            AccountMeta::new(global, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data: DistributionInstruction::Initialize {
            admin_wallet: *admin,
            caller_wallet: *caller,
            starting_block,
        }
        .pack(),
    })
}

/// Builds `update_caller_address`, signed by the admin.
pub fn update_caller_address(
    admin: &Pubkey,
    new_caller: &Pubkey,
    program_id: &Pubkey,
) -> Result<Instruction, PdaError> {
    let (global, _) = find_global_address(program_id)?;
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*admin, true),
            AccountMeta::new(global, false),
        ],
        data: DistributionInstruction::UpdateCallerAddress {
            new_caller: *new_caller,
        }
        .pack(),
    })
}

/// Builds `mine_block` alone. The winner's token account must already exist.
pub fn mine_block(
    caller: &Pubkey,
    winner: &Pubkey,
    block_number: u64,
    reward_mint: &Pubkey,
    program_id: &Pubkey,
) -> Result<Instruction, PdaError> {
    let (global, _) = find_global_address(program_id)?;
    let (mined_info, _) = find_mined_info_address(block_number, program_id)?;
    let winner_token_account = get_reward_token_account(winner, reward_mint);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*caller, true),
            AccountMeta::new(global, false),
            AccountMeta::new(mined_info, false),
            AccountMeta::new_readonly(*winner, false),
            AccountMeta::new(*reward_mint, false),
            AccountMeta::new(winner_token_account, false),
            AccountMeta::new_readonly(spl_token_2022_interface::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account_interface::program::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: DistributionInstruction::MineBlock { block_number }.pack(),
    })
}

/// Whether the winner's token account has to be created before minting to
/// it. `existing_owner` is the owner of that account as seen on the ledger,
/// `None` when the account does not exist.
pub fn needs_token_account(existing_owner: Option<&Pubkey>) -> bool {
    existing_owner != Some(&spl_token_2022_interface::id())
}

/// Builds the instruction list for rewarding `winner`: `mine_block`, preceded
/// by the creation of the winner's associated token account when
/// [`needs_token_account`] says so. The caller pays for that account.
pub fn mine_block_instructions(
    caller: &Pubkey,
    winner: &Pubkey,
    block_number: u64,
    reward_mint: &Pubkey,
    existing_owner: Option<&Pubkey>,
    program_id: &Pubkey,
) -> Result<Vec<Instruction>, PdaError> {
    let mut instructions = Vec::with_capacity(2);
    if needs_token_account(existing_owner) {
        debug!("Adding token account creation for winner {winner}");
        instructions.push(
            spl_associated_token_account_interface::instruction::create_associated_token_account(
                caller,
                winner,
                reward_mint,
                &spl_token_2022_interface::id(),
            ),
        );
    }
    instructions.push(mine_block(
        caller,
        winner,
        block_number,
        reward_mint,
        program_id,
    )?);
    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{constants::REWARD_TOKEN_MINT, id},
        test_case::test_case,
    };

    const ADMIN: Pubkey = Pubkey::new_from_array([1; 32]);
    const CALLER: Pubkey = Pubkey::new_from_array([2; 32]);
    const WINNER: Pubkey = Pubkey::new_from_array([3; 32]);

    #[test]
    fn test_initialize_layout() {
        let ix = initialize(&ADMIN, &CALLER, 1_000, &id()).unwrap();
        let global = find_global_address(&id()).unwrap().0;

        assert_eq!(ix.program_id, id());
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(ADMIN, true),
                AccountMeta::new(global, false),
                AccountMeta::new_readonly(system_program::id(), false),
                AccountMeta::new_readonly(sysvar::rent::id(), false),
            ]
        );

        let mut expected = vec![175, 175, 109, 31, 13, 152, 155, 237];
        expected.extend_from_slice(&[1; 32]);
        expected.extend_from_slice(&[2; 32]);
        expected.extend_from_slice(&1_000u64.to_le_bytes());
        assert_eq!(ix.data, expected);
    }

    #[test]
    fn test_update_caller_layout() {
        let new_caller = Pubkey::new_from_array([4; 32]);
        let ix = update_caller_address(&ADMIN, &new_caller, &id()).unwrap();

        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, find_global_address(&id()).unwrap().0);
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable);

        let mut expected = vec![168, 14, 85, 150, 136, 100, 169, 171];
        expected.extend_from_slice(&[4; 32]);
        assert_eq!(ix.data, expected);
    }

    #[test]
    fn test_mine_block_layout() {
        let ix = mine_block(&CALLER, &WINNER, 42, &REWARD_TOKEN_MINT, &id()).unwrap();

        let keys: Vec<_> = ix.accounts.iter().map(|meta| meta.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                CALLER,
                find_global_address(&id()).unwrap().0,
                find_mined_info_address(42, &id()).unwrap().0,
                WINNER,
                REWARD_TOKEN_MINT,
                get_reward_token_account(&WINNER, &REWARD_TOKEN_MINT),
                spl_token_2022_interface::id(),
                spl_associated_token_account_interface::program::id(),
                system_program::id(),
            ]
        );
        let signers: Vec<_> = ix.accounts.iter().map(|meta| meta.is_signer).collect();
        assert_eq!(signers, [true, false, false, false, false, false, false, false, false]);
        let writable: Vec<_> = ix.accounts.iter().map(|meta| meta.is_writable).collect();
        assert_eq!(writable, [true, true, true, false, true, true, false, false, false]);

        assert_eq!(
            ix.data,
            [47, 94, 217, 230, 127, 137, 42, 216, 42, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_mine_block_skips_creation_for_existing_account() {
        let token_program = spl_token_2022_interface::id();
        let ixs = mine_block_instructions(
            &CALLER,
            &WINNER,
            7,
            &REWARD_TOKEN_MINT,
            Some(&token_program),
            &id(),
        )
        .unwrap();
        assert_eq!(ixs.len(), 1);
        assert_eq!(ixs[0].program_id, id());
    }

    #[test_case(None ; "missing account")]
    #[test_case(Some(Pubkey::default()) ; "default owner")]
    #[test_case(Some(system_program::id()) ; "system owned")]
    #[test_case(Some(Pubkey::new_from_array([8; 32])) ; "foreign program")]
    fn test_mine_block_prepends_creation(owner: Option<Pubkey>) {
        let ixs = mine_block_instructions(
            &CALLER,
            &WINNER,
            7,
            &REWARD_TOKEN_MINT,
            owner.as_ref(),
            &id(),
        )
        .unwrap();
        assert_eq!(ixs.len(), 2);

        let create = &ixs[0];
        assert_eq!(
            create.program_id,
            spl_associated_token_account_interface::program::id()
        );
        assert_eq!(create.accounts[0].pubkey, CALLER);
        assert_eq!(
            create.accounts[1].pubkey,
            get_reward_token_account(&WINNER, &REWARD_TOKEN_MINT)
        );
        assert_eq!(create.accounts[2].pubkey, WINNER);
        assert_eq!(create.accounts[3].pubkey, REWARD_TOKEN_MINT);

        assert_eq!(ixs[1], mine_block(&CALLER, &WINNER, 7, &REWARD_TOKEN_MINT, &id()).unwrap());
    }

    #[test]
    fn test_pack_matches_borsh_fields() {
        // Past the discriminator, the payload is the borsh encoding of the
        // variant's fields.
        let instruction = DistributionInstruction::Initialize {
            admin_wallet: ADMIN,
            caller_wallet: CALLER,
            starting_block: u64::MAX,
        };
        let packed = instruction.pack();
        let borsh_with_index = borsh::to_vec(&instruction).unwrap();
        assert_eq!(&packed[DISCRIMINATOR_LEN..], &borsh_with_index[1..]);
    }
}
