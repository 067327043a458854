//! CW20 and native wrapper collaborator calls.
//!
//! Message builders only: the host dispatches the returned messages after the
//! handler succeeds and reverts the whole call if any of them fails.

use bridge_common::WrappedNativeExecuteMsg;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Coin, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

/// Query the decimals a CW20 token reports
pub fn query_decimals(querier: &QuerierWrapper, token: &Addr) -> StdResult<u8> {
    let info: TokenInfoResponse = querier.query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})?;
    Ok(info.decimals)
}

fn cw20_execute(token: &Addr, msg: &Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

/// Pull `amount` from `owner` into `recipient` using the owner's allowance
pub fn transfer_from(
    token: &Addr,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    cw20_execute(
        token,
        &Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        },
    )
}

pub fn transfer(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_execute(
        token,
        &Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        },
    )
}

/// Requires the bridge to be the token's minter
pub fn mint(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_execute(
        token,
        &Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        },
    )
}

/// Burn `amount` from the bridge's own balance
pub fn burn(token: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_execute(token, &Cw20ExecuteMsg::Burn { amount })
}

/// Wrap native coins; the wrapper credits the bridge with the same amount
pub fn deposit_native(wrapper: &Addr, coin: Coin) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: wrapper.to_string(),
        msg: to_json_binary(&WrappedNativeExecuteMsg::Deposit {})?,
        funds: vec![coin],
    }))
}

/// Bank send of native coins
pub fn refund_native(recipient: &Addr, coin: Coin) -> CosmosMsg {
    CosmosMsg::Bank(BankMsg::Send {
        to_address: recipient.to_string(),
        amount: vec![coin],
    })
}
