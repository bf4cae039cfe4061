//! Client-side interface of the reward distribution program.
//!
//! The distribution program itself lives on-chain and is not part of this
//! workspace. This crate mirrors the parts of it a client has to agree with
//! byte for byte:
//!
//! * the program-derived addresses of its accounts ([`pda`]),
//! * the layout of the `GlobalInfo` and `MinedInfo` accounts ([`state`]),
//! * the encoding and account lists of its instructions ([`instruction`]),
//! * the custom error codes it returns ([`error`]).
//!
//! Accounts and instructions use the Anchor encoding: every account body and
//! every instruction payload is prefixed with an 8-byte discriminator taken
//! from a SHA-256 of the type or method name, followed by the borsh-encoded
//! fields in declaration order.

pub mod constants;
pub mod error;
pub mod instruction;
pub mod pda;
pub mod state;

solana_pubkey::declare_id!("2YkXmCtRc6BzST3eavg7pxnYRJmoMBXEB8pzDN77wuhN");
