//! Validator Bridge Contract - Quorum-Authorized Cross-Chain Token Bridging
//!
//! A fixed set of off-chain validators (secp256k1 keys, identified by their
//! EVM-style 20-byte address) authorizes every inbound transfer and every
//! governance change by signing a canonical action digest.
//!
//! # Outbound Flow (Lock)
//! 1. User calls `TransferTokens` (allowance), `Receive` (CW20 send) or
//!    `WrapAndTransfer` (native coins)
//! 2. The amount is normalized to 8 decimals; dust stays with the user
//! 3. Validators observe the `tokens_locked` event and sign on the other chain
//!
//! # Inbound Flow (Complete)
//! 1. Validators sign the `CompleteTransfer` digest for a source transaction
//! 2. Anyone submits the signatures with `CompleteTransfer`
//! 3. The bridge releases custodied tokens or mints wrapped tokens, exactly
//!    once per `(source_tx_id, op_index)`
//!
//! # Security
//! - Strictly more than two thirds of the validators must sign
//! - Governance digests bind a global nonce, transfer digests their ledger key
//! - Every digest binds this contract's address and an expiration
//! - Emergency pause, itself a governance action

pub mod authorizer;
pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod ledger;
pub mod msg;
pub mod normalize;
pub mod pause;
mod query;
pub mod state;
pub mod token_client;
pub mod tokens;
pub mod validators;

pub use crate::authorizer::{action_digest, Action};
pub use crate::error::ContractError;
pub use crate::hash::{eth_signed_message_hash, keccak256};
pub use crate::normalize::{normalize, NormalizedAmount};
