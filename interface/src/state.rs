//! On-chain account layouts of the distribution program.

use {
    crate::{constants::DISCRIMINATOR_LEN, error::StateError},
    borsh::{BorshDeserialize, BorshSerialize},
    solana_pubkey::Pubkey,
};

// ── Global state ─────────────────────────────────────────────────────────────

/// Singleton configuration of the program.
///
/// Derived as a PDA: `[GLOBAL_AUTHORITY_SEED]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct GlobalInfo {
    /// Immutable admin; the only key allowed to change `caller`.
    pub admin: Pubkey,

    /// Key allowed to distribute rewards through `mine_block`.
    pub caller: Pubkey,

    /// Reward minted for the next block, in base units of the reward mint.
    pub current_reward: u64,

    /// Number of halvings applied so far (the program caps this at 6).
    pub halved_times: u64,

    /// Block number the current reward epoch started at.
    pub last_halved_block_number: u64,

    /// Unix timestamp of the last successful `mine_block`.
    pub last_mine_time: i64,
}

// ── Per-block record ─────────────────────────────────────────────────────────

/// Reward paid out for one mined block. Written once, never updated.
///
/// Derived as a PDA: `[MINED_INFO_SEED, block_number.to_le_bytes()]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MinedInfo {
    pub winner_address: Pubkey,
    pub block_number: u64,
    pub reward_sent: u64,
    pub time_stamp: i64,
}

// ── Account encoding ─────────────────────────────────────────────────────────

/// An Anchor-encoded account owned by the distribution program.
pub trait DistributionAccount: Sized + BorshSerialize + BorshDeserialize {
    /// Type name the discriminator is derived from.
    const NAME: &'static str;

    /// `sha256("account:<NAME>")[..8]`.
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];

    /// Size of the borsh body.
    const LEN: usize;

    /// Size of the account data: discriminator plus body.
    const SPACE: usize;

    /// Decodes account data, checking size and discriminator first.
    /// Bytes past the body are ignored.
    fn try_from_account_data(data: &[u8]) -> Result<Self, StateError> {
        if data.len() < Self::SPACE {
            return Err(StateError::AccountDataTooSmall {
                expected: Self::SPACE,
                actual: data.len(),
            });
        }
        let (discriminator, mut body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != Self::DISCRIMINATOR {
            return Err(StateError::InvalidDiscriminator {
                account: Self::NAME,
            });
        }
        Self::deserialize(&mut body).map_err(|err| StateError::Deserialize {
            account: Self::NAME,
            reason: err.to_string(),
        })
    }

    /// Encodes the record the way the program stores it.
    fn to_account_data(&self) -> borsh::io::Result<Vec<u8>> {
        let mut data = Vec::with_capacity(Self::SPACE);
        data.extend_from_slice(&Self::DISCRIMINATOR);
        self.serialize(&mut data)?;
        Ok(data)
    }
}

impl DistributionAccount for GlobalInfo {
    const NAME: &'static str = "GlobalInfo";
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [241, 51, 8, 81, 11, 62, 44, 62];
    /// admin(32) + caller(32) + 4 * u64(8) = 96 bytes.
    const LEN: usize = 96;
    const SPACE: usize = 104;
}

impl DistributionAccount for MinedInfo {
    const NAME: &'static str = "MinedInfo";
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [170, 25, 190, 26, 5, 208, 32, 182];
    /// winner(32) + 3 * u64(8) = 56 bytes.
    const LEN: usize = 56;
    const SPACE: usize = 64;
}
