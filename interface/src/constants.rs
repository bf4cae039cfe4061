//! Constants shared with the on-chain distribution program.

use solana_pubkey::Pubkey;

/// Seed of the singleton `GlobalInfo` PDA.
pub const GLOBAL_AUTHORITY_SEED: &[u8] = b"global-authority";

/// Seed prefix of the per-block `MinedInfo` PDAs. The second seed is the
/// block number as 8 little-endian bytes.
pub const MINED_INFO_SEED: &[u8] = b"mined-info";

/// Token-2022 mint the program rewards winners in (9 decimals).
pub const REWARD_TOKEN_MINT: Pubkey =
    solana_pubkey::pubkey!("Ej4fKMrqwySeBU1UrLUGB6QkRYw65QXwzCJKynUxpwSp");

/// Length of the Anchor discriminator that prefixes account data and
/// instruction data.
pub const DISCRIMINATOR_LEN: usize = 8;
