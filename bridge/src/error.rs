//! Error types for the validator bridge contract
//!
//! Every variant is a synchronous rejection: the host reverts all storage
//! writes and sub-messages of the failing call.

use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Quorum not met: got {got} valid signatures, need {required}")]
    QuorumNotMet { got: u32, required: u32 },

    #[error("Invalid signatures")]
    InvalidSignatures,

    #[error("Expired signatures: expiration {expiration} is not after block time {now}")]
    ExpiredSignatures { expiration: u64, now: u64 },

    // ========================================================================
    // Validator Registry Errors
    // ========================================================================

    #[error("Validator already exists: {validator}")]
    ValidatorAlreadyExists { validator: String },

    #[error("Validator not found: {validator}")]
    ValidatorNotFound { validator: String },

    #[error("Cannot remove last validator")]
    CannotRemoveLastValidator,

    // ========================================================================
    // Token Registry Errors
    // ========================================================================

    #[error("Token already exists: {token}")]
    TokenAlreadyExists { token: String },

    #[error("Token {token} is already listed as {kind}")]
    TokenKindConflict { token: String, kind: String },

    #[error("Token not supported: {token}")]
    TokenNotSupported { token: String },

    #[error("Wrapped native token is not configured")]
    WrappedNativeNotConfigured,

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Transfer already completed: tx {source_tx_id}, operation {op_index}")]
    TransferAlreadyCompleted { source_tx_id: String, op_index: u64 },

    #[error("Invalid source transaction id: {reason}")]
    InvalidSourceTxId { reason: String },

    #[error("Amount too small: nothing left after normalization")]
    AmountTooSmall,

    #[error("Bridge is paused")]
    BridgePaused,

    // ========================================================================
    // Input Errors
    // ========================================================================

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("No funds sent")]
    NoFundsSent,
}
