//! State definitions for the validator bridge contract
//!
//! All authoritative state lives here: the validator sequence, the governance
//! nonce, both token allow-lists, the completed-transfer set and the pause flag.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// How a normalized inbound amount is turned into a token amount.
#[cw_serde]
#[derive(Copy, Eq)]
pub enum ScalingMode {
    /// Scale from the canonical 8 decimals to the token's own decimals
    Denormalize,
    /// Use the normalized amount unchanged
    Raw,
}

/// Inbound scaling per token kind
#[cw_serde]
pub struct InboundScaling {
    /// Tokens released from custody
    pub custodied: ScalingMode,
    /// Tokens minted under the bridge's authority
    pub wrapped: ScalingMode,
}

impl Default for InboundScaling {
    fn default() -> Self {
        Self {
            custodied: ScalingMode::Denormalize,
            wrapped: ScalingMode::Raw,
        }
    }
}

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Whether the bridge is currently paused
    pub paused: bool,
    /// Denom accepted by `WrapAndTransfer`
    pub native_denom: String,
    /// CW20 wrapper of the native denom (None disables `WrapAndTransfer`)
    pub wrapped_native_token: Option<Addr>,
    /// Inbound amount scaling per token kind
    pub inbound_scaling: InboundScaling,
}

/// Bridge statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Number of outbound locks (including wrap-and-transfer and receive hook)
    pub total_locked: u64,
    /// Number of settled inbound transfers
    pub total_completed: u64,
    /// Number of applied governance actions
    pub governance_actions: u64,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:validator-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Bridge statistics
pub const STATS: Item<Stats> = Item::new("stats");

/// Global governance nonce, advanced once per applied governance action
pub const NONCE: Item<u64> = Item::new("nonce");

/// Ordered validator identities (lowercase 0x-prefixed hex addresses)
pub const VALIDATORS: Item<Vec<String>> = Item::new("validators");

/// Ordered allow-list of custodied tokens
pub const SUPPORTED_TOKENS: Item<Vec<Addr>> = Item::new("supported_tokens");

/// Ordered allow-list of wrapped (bridge-minted) tokens
pub const SUPPORTED_WRAPPED_TOKENS: Item<Vec<Addr>> = Item::new("supported_wrapped_tokens");

/// Settled inbound transfers
/// Key: (source chain tx id, operation index), Value: always true
pub const COMPLETED_TRANSFERS: Map<(&[u8], u64), bool> = Map::new("completed_transfers");
