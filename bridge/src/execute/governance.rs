//! Governance handlers: validator set, token registry and pause changes.
//!
//! Each handler authorizes its action against the current nonce (which
//! advances on success) and then applies the mutation. A failing mutation
//! reverts the nonce advance with the rest of the call.

use cosmwasm_std::{Binary, DepsMut, Env, Response};

use crate::authorizer::{authorize, Action};
use crate::error::ContractError;
use crate::hash::bytes32_to_hex;
use crate::pause::set_paused;
use crate::state::{NONCE, STATS};
use crate::tokens::{add_token, remove_token, TokenList};
use crate::validators::{self, parse_validator};

// ============================================================================
// Validator Set
// ============================================================================

pub fn execute_add_validator(
    mut deps: DepsMut,
    env: Env,
    validator: String,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    let validator = parse_validator(&validator)?;
    let action = Action::AddValidator {
        validator: validator.clone(),
    };
    let authorized = authorize_governance(deps.branch(), &env, &action, &signatures, expiration)?;

    validators::add_validator(deps.storage, &validator)?;

    Ok(authorized
        .response("add_validator")
        .add_attribute("validator", validator))
}

pub fn execute_remove_validator(
    mut deps: DepsMut,
    env: Env,
    validator: String,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    let validator = parse_validator(&validator)?;
    let action = Action::RemoveValidator {
        validator: validator.clone(),
    };
    let authorized = authorize_governance(deps.branch(), &env, &action, &signatures, expiration)?;

    validators::remove_validator(deps.storage, &validator)?;

    Ok(authorized
        .response("remove_validator")
        .add_attribute("validator", validator))
}

// ============================================================================
// Token Registry
// ============================================================================

/// Shared handler for the four token registry actions
fn execute_token_change(
    mut deps: DepsMut,
    env: Env,
    list: TokenList,
    add: bool,
    token: String,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    let token = deps.api.addr_validate(&token)?;
    let (action, event) = match (list, add) {
        (TokenList::Supported, true) => (
            Action::AddSupportedToken {
                token: token.to_string(),
            },
            "add_supported_token",
        ),
        (TokenList::Supported, false) => (
            Action::RemoveSupportedToken {
                token: token.to_string(),
            },
            "remove_supported_token",
        ),
        (TokenList::Wrapped, true) => (
            Action::AddSupportedWrappedToken {
                token: token.to_string(),
            },
            "add_supported_wrapped_token",
        ),
        (TokenList::Wrapped, false) => (
            Action::RemoveSupportedWrappedToken {
                token: token.to_string(),
            },
            "remove_supported_wrapped_token",
        ),
    };
    let authorized = authorize_governance(deps.branch(), &env, &action, &signatures, expiration)?;

    if add {
        add_token(deps.storage, list, &token)?;
    } else {
        remove_token(deps.storage, list, &token)?;
    }

    Ok(authorized.response(event).add_attribute("token", token))
}

pub fn execute_add_supported_token(
    deps: DepsMut,
    env: Env,
    token: String,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    execute_token_change(
        deps,
        env,
        TokenList::Supported,
        true,
        token,
        signatures,
        expiration,
    )
}

pub fn execute_remove_supported_token(
    deps: DepsMut,
    env: Env,
    token: String,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    execute_token_change(
        deps,
        env,
        TokenList::Supported,
        false,
        token,
        signatures,
        expiration,
    )
}

pub fn execute_add_supported_wrapped_token(
    deps: DepsMut,
    env: Env,
    token: String,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    execute_token_change(
        deps,
        env,
        TokenList::Wrapped,
        true,
        token,
        signatures,
        expiration,
    )
}

pub fn execute_remove_supported_wrapped_token(
    deps: DepsMut,
    env: Env,
    token: String,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    execute_token_change(
        deps,
        env,
        TokenList::Wrapped,
        false,
        token,
        signatures,
        expiration,
    )
}

// ============================================================================
// Pause
// ============================================================================

/// Execute handler for pausing the bridge. Available regardless of pause state.
pub fn execute_pause(
    deps: DepsMut,
    env: Env,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    execute_set_pause(deps, env, true, signatures, expiration)
}

/// Execute handler for unpausing the bridge.
pub fn execute_unpause(
    deps: DepsMut,
    env: Env,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    execute_set_pause(deps, env, false, signatures, expiration)
}

fn execute_set_pause(
    mut deps: DepsMut,
    env: Env,
    paused: bool,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    let action = Action::SetPause { paused };
    let authorized = authorize_governance(deps.branch(), &env, &action, &signatures, expiration)?;

    set_paused(deps.storage, paused)?;

    let event = if paused { "pause" } else { "unpause" };
    Ok(authorized.response(event))
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Outcome of a successful governance authorization
struct Authorized {
    digest: [u8; 32],
    nonce: u64,
}

impl Authorized {
    fn response(&self, event: &str) -> Response {
        Response::new()
            .add_attribute("action", event)
            .add_attribute("nonce", self.nonce.to_string())
            .add_attribute("digest", bytes32_to_hex(&self.digest))
    }
}

fn authorize_governance(
    mut deps: DepsMut,
    env: &Env,
    action: &Action,
    signatures: &[Binary],
    expiration: u64,
) -> Result<Authorized, ContractError> {
    let nonce = NONCE.load(deps.storage)?;
    let digest = authorize(deps.branch(), env, action, signatures, expiration)?;

    let mut stats = STATS.load(deps.storage)?;
    stats.governance_actions += 1;
    STATS.save(deps.storage, &stats)?;

    Ok(Authorized { digest, nonce })
}
