//! Error types for the distribution program interface.

use {
    num_derive::FromPrimitive,
    num_traits::FromPrimitive,
    thiserror::Error,
};

/// First code of program-defined errors; Anchor reserves everything below.
pub const CUSTOM_ERROR_OFFSET: u32 = 6_000;

/// Custom errors returned by the on-chain distribution program, as carried in
/// `InstructionError::Custom`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum DistributionError {
    #[error("This address is not admin wallet")]
    InvalidAdmin = 6_000,

    #[error("This address is not caller wallet")]
    InvalidCaller = 6_001,

    #[error("Mining is not allowed within 5 minutes")]
    InvalidMiningTime = 6_002,

    #[error("Passed block number is not valid")]
    InvalidBlockNumber = 6_003,
}

impl DistributionError {
    /// Maps a raw custom error code back to the program error, if it is one.
    pub fn from_custom_code(code: u32) -> Option<Self> {
        if code < CUSTOM_ERROR_OFFSET {
            return None;
        }
        Self::from_u32(code)
    }
}

/// Program-derived address derivation failed for every bump seed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PdaError {
    #[error(
        "Unable to find a viable program address bump seed for {}",
        String::from_utf8_lossy(.seed)
    )]
    NoViableBump { seed: &'static [u8] },
}

/// Account data does not hold the expected record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Account data too small: expected {expected} bytes, got {actual}")]
    AccountDataTooSmall { expected: usize, actual: usize },

    #[error("Account discriminator does not match {account}")]
    InvalidDiscriminator { account: &'static str },

    #[error("Failed to deserialize {account}: {reason}")]
    Deserialize {
        account: &'static str,
        reason: String,
    },
}
