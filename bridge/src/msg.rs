//! Message types for the validator bridge contract
//!
//! Every governance message carries the validator signatures over its action
//! digest and the expiration those signatures were produced for.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::authorizer::Action;
use crate::state::InboundScaling;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Initial validator identities (20-byte hex, any case, optional 0x)
    pub validators: Vec<String>,
    /// Native denom accepted by `WrapAndTransfer` (e.g. "uluna")
    pub native_denom: String,
    /// CW20 wrapper of the native denom
    pub wrapped_native_token: Option<String>,
    /// Inbound scaling per token kind (defaults to denormalize custodied, raw wrapped)
    pub inbound_scaling: Option<InboundScaling>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outbound Transfers
    // ========================================================================
    /// Lock a supported CW20 token. The sender must have granted the bridge
    /// an allowance of at least `amount`.
    TransferTokens {
        token: String,
        amount: Uint128,
        /// Recipient on the destination chain
        destination: String,
    },

    /// Wrap the attached native coins and lock the wrapped tokens
    WrapAndTransfer { destination: String },

    /// Lock tokens sent with CW20 `Send` (see [`ReceiveMsg`])
    Receive(Cw20ReceiveMsg),

    // ========================================================================
    // Inbound Transfers
    // ========================================================================
    /// Release or mint `amount` (canonical precision) to `recipient`
    CompleteTransfer {
        /// Transaction id on the source chain
        source_tx_id: Binary,
        /// Index of the operation inside the source transaction
        op_index: u64,
        token: String,
        recipient: String,
        amount: Uint128,
        signatures: Vec<Binary>,
        expiration: u64,
    },

    /// Ask validators to re-sign a source transaction
    RequestNewSignatures { source_tx_id: Binary },

    // ========================================================================
    // Governance
    // ========================================================================
    AddValidator {
        validator: String,
        signatures: Vec<Binary>,
        expiration: u64,
    },
    RemoveValidator {
        validator: String,
        signatures: Vec<Binary>,
        expiration: u64,
    },
    AddSupportedToken {
        token: String,
        signatures: Vec<Binary>,
        expiration: u64,
    },
    RemoveSupportedToken {
        token: String,
        signatures: Vec<Binary>,
        expiration: u64,
    },
    AddSupportedWrappedToken {
        token: String,
        signatures: Vec<Binary>,
        expiration: u64,
    },
    RemoveSupportedWrappedToken {
        token: String,
        signatures: Vec<Binary>,
        expiration: u64,
    },
    Pause {
        signatures: Vec<Binary>,
        expiration: u64,
    },
    Unpause {
        signatures: Vec<Binary>,
        expiration: u64,
    },
}

/// CW20 receive hook payload
#[cw_serde]
pub enum ReceiveMsg {
    /// Lock the sent tokens (custodied) or burn them (wrapped)
    TransferTokens { destination: String },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StatsResponse)]
    Stats {},

    /// Current governance nonce
    #[returns(NonceResponse)]
    Nonce {},

    /// Validator set in order, with its quorum
    #[returns(ValidatorsResponse)]
    Validators {},

    #[returns(ValidatorResponse)]
    Validator { index: u32 },

    #[returns(ValidatorsLengthResponse)]
    ValidatorsLength {},

    #[returns(TokensResponse)]
    SupportedTokens {},

    #[returns(TokensResponse)]
    SupportedWrappedTokens {},

    #[returns(TransferCompletedResponse)]
    TransferCompleted { source_tx_id: Binary, op_index: u64 },

    /// Digest validators must sign for `action` to be accepted now
    #[returns(ActionDigestResponse)]
    ActionDigest { action: Action, expiration: u64 },

    /// Preview normalization of an outbound lock
    #[returns(SimulateTransferResponse)]
    SimulateTransfer { token: String, amount: Uint128 },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub paused: bool,
    pub native_denom: String,
    pub wrapped_native_token: Option<Addr>,
    pub inbound_scaling: InboundScaling,
}

#[cw_serde]
pub struct StatsResponse {
    pub total_locked: u64,
    pub total_completed: u64,
    pub governance_actions: u64,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct ValidatorsResponse {
    pub validators: Vec<String>,
    pub quorum: u32,
}

#[cw_serde]
pub struct ValidatorResponse {
    pub index: u32,
    pub validator: String,
}

#[cw_serde]
pub struct ValidatorsLengthResponse {
    pub length: u32,
}

#[cw_serde]
pub struct TokensResponse {
    pub tokens: Vec<Addr>,
}

#[cw_serde]
pub struct TransferCompletedResponse {
    pub source_tx_id: Binary,
    pub op_index: u64,
    pub completed: bool,
}

#[cw_serde]
pub struct ActionDigestResponse {
    /// Canonical action digest
    pub digest: Binary,
    /// EIP-191 personal-message hash of the digest (what is actually signed)
    pub signing_hash: Binary,
    /// Nonce the digest is bound to; None for transfer completions
    pub nonce: Option<u64>,
}

#[cw_serde]
pub struct SimulateTransferResponse {
    pub token: Addr,
    pub decimals: u8,
    /// Amount at canonical precision
    pub normalized: Uint128,
    /// Raw amount that would be taken
    pub custody: Uint128,
    /// Raw amount that would stay with the sender
    pub dust: Uint128,
}
