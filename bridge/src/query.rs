//! Query handlers for the validator bridge contract.

use cosmwasm_std::{Binary, Deps, Env, StdError, StdResult, Uint128};

use crate::authorizer::{current_digest, Action};
use crate::error::ContractError;
use crate::hash::eth_signed_message_hash;
use crate::ledger::{is_completed, TransferKey};
use crate::msg::{
    ActionDigestResponse, ConfigResponse, NonceResponse, SimulateTransferResponse, StatsResponse,
    TokensResponse, TransferCompletedResponse, ValidatorResponse, ValidatorsLengthResponse,
    ValidatorsResponse,
};
use crate::normalize::normalize;
use crate::state::{CONFIG, NONCE, STATS};
use crate::token_client::query_decimals;
use crate::tokens::{list_tokens, token_kind, TokenList};
use crate::validators::{load_validators, quorum};

fn std_err(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        other => StdError::generic_err(other.to_string()),
    }
}

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        paused: config.paused,
        native_denom: config.native_denom,
        wrapped_native_token: config.wrapped_native_token,
        inbound_scaling: config.inbound_scaling,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        total_locked: stats.total_locked,
        total_completed: stats.total_completed,
        governance_actions: stats.governance_actions,
    })
}

pub fn query_nonce(deps: Deps) -> StdResult<NonceResponse> {
    Ok(NonceResponse {
        nonce: NONCE.may_load(deps.storage)?.unwrap_or_default(),
    })
}

// ============================================================================
// Registry Queries
// ============================================================================

pub fn query_validators(deps: Deps) -> StdResult<ValidatorsResponse> {
    let validators = load_validators(deps.storage).map_err(std_err)?;
    Ok(ValidatorsResponse {
        quorum: quorum(validators.len()),
        validators,
    })
}

/// Query the validator at `index` in the ordered set.
pub fn query_validator(deps: Deps, index: u32) -> StdResult<ValidatorResponse> {
    let validators = load_validators(deps.storage).map_err(std_err)?;
    let validator = validators
        .get(index as usize)
        .cloned()
        .ok_or_else(|| StdError::not_found(format!("validator at index {}", index)))?;
    Ok(ValidatorResponse { index, validator })
}

pub fn query_validators_length(deps: Deps) -> StdResult<ValidatorsLengthResponse> {
    let validators = load_validators(deps.storage).map_err(std_err)?;
    Ok(ValidatorsLengthResponse {
        length: validators.len() as u32,
    })
}

pub fn query_tokens(deps: Deps, list: TokenList) -> StdResult<TokensResponse> {
    Ok(TokensResponse {
        tokens: list_tokens(deps.storage, list).map_err(std_err)?,
    })
}

pub fn query_transfer_completed(
    deps: Deps,
    source_tx_id: Binary,
    op_index: u64,
) -> StdResult<TransferCompletedResponse> {
    let key = TransferKey::new(&source_tx_id, op_index).map_err(std_err)?;
    let completed = is_completed(deps.storage, &key).map_err(std_err)?;
    Ok(TransferCompletedResponse {
        source_tx_id,
        op_index,
        completed,
    })
}

// ============================================================================
// Signer & Relayer Helpers
// ============================================================================

/// Digest (and the hash validators sign) for `action` at the current nonce.
pub fn query_action_digest(
    deps: Deps,
    env: Env,
    action: Action,
    expiration: u64,
) -> StdResult<ActionDigestResponse> {
    let (digest, nonce) =
        current_digest(deps.storage, &env, &action, expiration).map_err(std_err)?;
    Ok(ActionDigestResponse {
        digest: Binary::from(digest.to_vec()),
        signing_hash: Binary::from(eth_signed_message_hash(&digest).to_vec()),
        nonce,
    })
}

/// Preview the normalization `TransferTokens` or `Receive` would apply.
pub fn query_simulate_transfer(
    deps: Deps,
    token: String,
    amount: Uint128,
) -> StdResult<SimulateTransferResponse> {
    let token = deps.api.addr_validate(&token)?;
    if token_kind(deps.storage, &token).map_err(std_err)?.is_none() {
        return Err(std_err(ContractError::TokenNotSupported {
            token: token.to_string(),
        }));
    }

    let decimals = query_decimals(&deps.querier, &token)?;
    let result = normalize(amount, decimals).map_err(std_err)?;
    Ok(SimulateTransferResponse {
        token,
        decimals,
        normalized: result.normalized,
        custody: result.custody,
        dust: result.dust,
    })
}
