//! Validator Bridge Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_add_supported_token, execute_add_supported_wrapped_token, execute_add_validator,
    execute_complete_transfer, execute_pause, execute_receive, execute_remove_supported_token,
    execute_remove_supported_wrapped_token, execute_remove_validator,
    execute_request_new_signatures, execute_transfer_tokens, execute_unpause,
    execute_wrap_and_transfer,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_action_digest, query_config, query_nonce, query_simulate_transfer, query_stats,
    query_tokens, query_transfer_completed, query_validator, query_validators,
    query_validators_length,
};
use crate::state::{
    Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, NONCE, STATS, SUPPORTED_TOKENS,
    SUPPORTED_WRAPPED_TOKENS,
};
use crate::tokens::TokenList;
use crate::validators::{init_validators, quorum};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.native_denom.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "native_denom must not be empty".to_string(),
        });
    }

    let wrapped_native_token = msg
        .wrapped_native_token
        .map(|token| deps.api.addr_validate(&token))
        .transpose()?;

    // Store config
    let config = Config {
        paused: false,
        native_denom: msg.native_denom,
        wrapped_native_token,
        inbound_scaling: msg.inbound_scaling.unwrap_or_default(),
    };
    CONFIG.save(deps.storage, &config)?;

    // Initialize validators
    let validators = init_validators(deps.storage, &msg.validators)?;

    // Initialize registries, nonce and stats
    SUPPORTED_TOKENS.save(deps.storage, &vec![])?;
    SUPPORTED_WRAPPED_TOKENS.save(deps.storage, &vec![])?;
    NONCE.save(deps.storage, &0u64)?;
    STATS.save(deps.storage, &Stats::default())?;

    let mut response = Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("validator_count", validators.len().to_string())
        .add_attribute("quorum", quorum(validators.len()).to_string())
        .add_attribute("native_denom", config.native_denom);
    if let Some(wrapper) = config.wrapped_native_token {
        response = response.add_attribute("wrapped_native_token", wrapper);
    }
    Ok(response)
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outbound transfers
        ExecuteMsg::TransferTokens {
            token,
            amount,
            destination,
        } => execute_transfer_tokens(deps, env, info, token, amount, destination),
        ExecuteMsg::WrapAndTransfer { destination } => {
            execute_wrap_and_transfer(deps, env, info, destination)
        }
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Inbound transfers
        ExecuteMsg::CompleteTransfer {
            source_tx_id,
            op_index,
            token,
            recipient,
            amount,
            signatures,
            expiration,
        } => execute_complete_transfer(
            deps,
            env,
            source_tx_id,
            op_index,
            token,
            recipient,
            amount,
            signatures,
            expiration,
        ),
        ExecuteMsg::RequestNewSignatures { source_tx_id } => {
            execute_request_new_signatures(info, source_tx_id)
        }

        // Validator set
        ExecuteMsg::AddValidator {
            validator,
            signatures,
            expiration,
        } => execute_add_validator(deps, env, validator, signatures, expiration),
        ExecuteMsg::RemoveValidator {
            validator,
            signatures,
            expiration,
        } => execute_remove_validator(deps, env, validator, signatures, expiration),

        // Token registry
        ExecuteMsg::AddSupportedToken {
            token,
            signatures,
            expiration,
        } => execute_add_supported_token(deps, env, token, signatures, expiration),
        ExecuteMsg::RemoveSupportedToken {
            token,
            signatures,
            expiration,
        } => execute_remove_supported_token(deps, env, token, signatures, expiration),
        ExecuteMsg::AddSupportedWrappedToken {
            token,
            signatures,
            expiration,
        } => execute_add_supported_wrapped_token(deps, env, token, signatures, expiration),
        ExecuteMsg::RemoveSupportedWrappedToken {
            token,
            signatures,
            expiration,
        } => execute_remove_supported_wrapped_token(deps, env, token, signatures, expiration),

        // Pause gate
        ExecuteMsg::Pause {
            signatures,
            expiration,
        } => execute_pause(deps, env, signatures, expiration),
        ExecuteMsg::Unpause {
            signatures,
            expiration,
        } => execute_unpause(deps, env, signatures, expiration),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::Nonce {} => to_json_binary(&query_nonce(deps)?),

        // Registries
        QueryMsg::Validators {} => to_json_binary(&query_validators(deps)?),
        QueryMsg::Validator { index } => to_json_binary(&query_validator(deps, index)?),
        QueryMsg::ValidatorsLength {} => to_json_binary(&query_validators_length(deps)?),
        QueryMsg::SupportedTokens {} => {
            to_json_binary(&query_tokens(deps, TokenList::Supported)?)
        }
        QueryMsg::SupportedWrappedTokens {} => {
            to_json_binary(&query_tokens(deps, TokenList::Wrapped)?)
        }
        QueryMsg::TransferCompleted {
            source_tx_id,
            op_index,
        } => to_json_binary(&query_transfer_completed(deps, source_tx_id, op_index)?),

        // Signer and relayer helpers
        QueryMsg::ActionDigest { action, expiration } => {
            to_json_binary(&query_action_digest(deps, env, action, expiration)?)
        }
        QueryMsg::SimulateTransfer { token, amount } => {
            to_json_binary(&query_simulate_transfer(deps, token, amount)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Stats were introduced after the first release
    if STATS.may_load(deps.storage)?.is_none() {
        STATS.save(deps.storage, &Stats::default())?;
    }

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
