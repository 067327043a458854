//! Inbound transfer handlers (CompleteTransfer, RequestNewSignatures).

use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, Uint128};

use crate::authorizer::{authorize, Action};
use crate::error::ContractError;
use crate::hash::bytes32_to_hex;
use crate::ledger::{self, TransferKey};
use crate::normalize::denormalize;
use crate::pause::ensure_not_paused;
use crate::state::{ScalingMode, CONFIG, STATS};
use crate::token_client;
use crate::tokens::{token_kind, TokenList};

/// Execute handler for settling an inbound transfer.
///
/// Custodied tokens are released from the bridge's balance, wrapped tokens are
/// minted. `amount` is at canonical precision and is scaled per the configured
/// inbound scaling of the token's kind.
#[allow(clippy::too_many_arguments)]
pub fn execute_complete_transfer(
    mut deps: DepsMut,
    env: Env,
    source_tx_id: Binary,
    op_index: u64,
    token: String,
    recipient: String,
    amount: Uint128,
    signatures: Vec<Binary>,
    expiration: u64,
) -> Result<Response, ContractError> {
    ensure_not_paused(deps.storage)?;

    let key = TransferKey::new(&source_tx_id, op_index)?;
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    let token = deps.api.addr_validate(&token)?;
    let kind =
        token_kind(deps.storage, &token)?.ok_or_else(|| ContractError::TokenNotSupported {
            token: token.to_string(),
        })?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let action = Action::CompleteTransfer {
        source_tx_id: source_tx_id.clone(),
        op_index,
        token: token.to_string(),
        recipient: recipient.to_string(),
        amount,
    };
    let digest = authorize(deps.branch(), &env, &action, &signatures, expiration)?;

    let config = CONFIG.load(deps.storage)?;
    let scaling = match kind {
        TokenList::Supported => config.inbound_scaling.custodied,
        TokenList::Wrapped => config.inbound_scaling.wrapped,
    };
    let payout = match scaling {
        ScalingMode::Denormalize => {
            let decimals = token_client::query_decimals(&deps.querier, &token)?;
            denormalize(amount, decimals)?
        }
        ScalingMode::Raw => amount,
    };

    let settlement = ledger::complete(deps.storage, &key, |storage| {
        let mut stats = STATS.load(storage)?;
        stats.total_completed += 1;
        STATS.save(storage, &stats)?;

        let msg = match kind {
            TokenList::Supported => token_client::transfer(&token, &recipient, payout)?,
            TokenList::Wrapped => token_client::mint(&token, &recipient, payout)?,
        };
        Ok(msg)
    })?;

    Ok(Response::new()
        .add_message(settlement)
        .add_attribute("action", "transfer_completed")
        .add_attribute("source_tx_id", hex_id(&source_tx_id))
        .add_attribute("op_index", op_index.to_string())
        .add_attribute("token", token)
        .add_attribute("token_kind", kind.as_str())
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount.to_string())
        .add_attribute("payout", payout.to_string())
        .add_attribute("digest", bytes32_to_hex(&digest)))
}

/// Execute handler asking validators to re-sign a source transaction.
///
/// Stateless and available while paused.
pub fn execute_request_new_signatures(
    info: MessageInfo,
    source_tx_id: Binary,
) -> Result<Response, ContractError> {
    Ok(Response::new()
        .add_attribute("action", "request_new_signatures")
        .add_attribute("source_tx_id", hex_id(&source_tx_id))
        .add_attribute("requester", info.sender))
}

fn hex_id(source_tx_id: &Binary) -> String {
    format!("0x{}", hex::encode(source_tx_id.as_slice()))
}
