//! Outbound transfer handlers (TransferTokens, WrapAndTransfer and Receive).
//!
//! Amounts are normalized to the canonical precision before anything moves;
//! only the custody part is taken and the dust stays with the sender.

use cosmwasm_std::{
    from_json, Addr, Coin, CosmosMsg, DepsMut, Env, MessageInfo, Response, Storage, Uint128,
};
use cw20::Cw20ReceiveMsg;

use crate::error::ContractError;
use crate::msg::ReceiveMsg;
use crate::normalize::{normalize, NormalizedAmount};
use crate::pause::ensure_not_paused;
use crate::state::{CONFIG, STATS};
use crate::token_client;
use crate::tokens::{contains, token_kind, TokenList};

/// Execute handler for locking a supported CW20 token via allowance
pub fn execute_transfer_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
    destination: String,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    validate_destination(&destination)?;

    let token = deps.api.addr_validate(&token)?;
    if !contains(deps.storage, TokenList::Supported, &token)? {
        return Err(ContractError::TokenNotSupported {
            token: token.to_string(),
        });
    }

    let decimals = token_client::query_decimals(&deps.querier, &token)?;
    let locked = normalize(amount, decimals)?;

    let pull = token_client::transfer_from(
        &token,
        &info.sender,
        &env.contract.address,
        locked.custody,
    )?;
    record_lock(deps.storage)?;

    Ok(locked_response(&env, &info.sender, &token, &destination, &locked).add_message(pull))
}

/// Execute handler for wrapping native coins and locking the wrapped tokens
pub fn execute_wrap_and_transfer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    destination: String,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;
    validate_destination(&destination)?;

    let config = CONFIG.load(deps.storage)?;
    let wrapper = config
        .wrapped_native_token
        .ok_or(ContractError::WrappedNativeNotConfigured)?;
    if !contains(deps.storage, TokenList::Supported, &wrapper)? {
        return Err(ContractError::TokenNotSupported {
            token: wrapper.to_string(),
        });
    }

    // Validate funds
    if info.funds.is_empty() {
        return Err(ContractError::NoFundsSent);
    }
    if info.funds.len() > 1 {
        return Err(ContractError::InvalidAmount {
            reason: "Only one coin allowed per transaction".to_string(),
        });
    }
    let coin = &info.funds[0];
    if coin.denom != config.native_denom {
        return Err(ContractError::InvalidAmount {
            reason: format!(
                "Expected {} but received {}",
                config.native_denom, coin.denom
            ),
        });
    }

    let decimals = token_client::query_decimals(&deps.querier, &wrapper)?;
    let locked = normalize(coin.amount, decimals)?;

    let mut messages: Vec<CosmosMsg> = vec![token_client::deposit_native(
        &wrapper,
        Coin {
            denom: coin.denom.clone(),
            amount: locked.custody,
        },
    )?];
    if !locked.dust.is_zero() {
        messages.push(token_client::refund_native(
            &info.sender,
            Coin {
                denom: coin.denom.clone(),
                amount: locked.dust,
            },
        ));
    }
    record_lock(deps.storage)?;

    Ok(locked_response(&env, &info.sender, &wrapper, &destination, &locked)
        .add_messages(messages)
        .add_attribute("native_denom", coin.denom.clone()))
}

/// Execute handler for tokens sent with CW20 `Send`
///
/// Custodied tokens stay with the bridge; wrapped tokens are burned, returning
/// them to their home chain.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;

    let token = info.sender;
    let sender = deps.api.addr_validate(&cw20_msg.sender)?;

    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;
    let destination = match receive_msg {
        ReceiveMsg::TransferTokens { destination } => destination,
    };
    validate_destination(&destination)?;

    let kind =
        token_kind(deps.storage, &token)?.ok_or_else(|| ContractError::TokenNotSupported {
            token: token.to_string(),
        })?;

    let decimals = token_client::query_decimals(&deps.querier, &token)?;
    let locked = normalize(cw20_msg.amount, decimals)?;

    let mut messages: Vec<CosmosMsg> = vec![];
    if kind == TokenList::Wrapped {
        messages.push(token_client::burn(&token, locked.custody)?);
    }
    if !locked.dust.is_zero() {
        messages.push(token_client::transfer(&token, &sender, locked.dust)?);
    }
    record_lock(deps.storage)?;

    Ok(locked_response(&env, &sender, &token, &destination, &locked)
        .add_messages(messages)
        .add_attribute("token_kind", kind.as_str()))
}

// ============================================================================
// Internal Helpers
// ============================================================================

fn validate_destination(destination: &str) -> Result<(), ContractError> {
    if destination.trim().is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "Destination must not be empty".to_string(),
        });
    }
    Ok(())
}

fn record_lock(storage: &mut dyn Storage) -> Result<(), ContractError> {
    let mut stats = STATS.load(storage)?;
    stats.total_locked += 1;
    STATS.save(storage, &stats)?;
    Ok(())
}

/// `tokens_locked` event; `amount` is the normalized amount
fn locked_response(
    env: &Env,
    sender: &Addr,
    token: &Addr,
    destination: &str,
    locked: &NormalizedAmount,
) -> Response {
    Response::new()
        .add_attribute("action", "tokens_locked")
        .add_attribute("sender", sender)
        .add_attribute("token", token)
        .add_attribute("amount", locked.normalized.to_string())
        .add_attribute("destination", destination)
        .add_attribute("timestamp", env.block.time.seconds().to_string())
        .add_attribute("custody", locked.custody.to_string())
        .add_attribute("dust", locked.dust.to_string())
}
