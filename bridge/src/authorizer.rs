//! Action authorization: canonical digests and validator quorum verification.
//!
//! Every state change that is not a plain outbound lock goes through
//! [`authorize`]. The digest of an [`Action`] is the keccak256 of its packed
//! encoding:
//!
//! ```text
//! uint256(action id)
//!   ++ payload
//!   ++ replay binding (uint256(nonce) | source_tx_id ++ uint256(op_index))
//!   ++ keccak256(contract address)
//!   ++ uint256(expiration)
//! ```
//!
//! Governance actions bind the current nonce and advance it on success, so a
//! signature set authorizes exactly one application. Transfer completions bind
//! their ledger key instead and leave the nonce alone.

use bridge_common::ActionId;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, Binary, Deps, DepsMut, Env, Storage, Uint128};

use crate::error::ContractError;
use crate::hash::{
    address_to_hex, encode_native_address, eth_signed_message_hash, hex_to_address,
    instance_domain, pubkey_to_address, PackedEncoder,
};
use crate::state::NONCE;
use crate::validators::{load_validators, quorum};

/// Length of an `r ++ s ++ v` signature
pub const SIGNATURE_LENGTH: usize = 65;

/// An action validators can authorize, with its typed payload
#[cw_serde]
pub enum Action {
    AddValidator {
        validator: String,
    },
    RemoveValidator {
        validator: String,
    },
    AddSupportedToken {
        token: String,
    },
    RemoveSupportedToken {
        token: String,
    },
    AddSupportedWrappedToken {
        token: String,
    },
    RemoveSupportedWrappedToken {
        token: String,
    },
    SetPause {
        paused: bool,
    },
    CompleteTransfer {
        source_tx_id: Binary,
        op_index: u64,
        token: String,
        recipient: String,
        amount: Uint128,
    },
}

impl Action {
    pub fn id(&self) -> ActionId {
        match self {
            Action::AddValidator { .. } => ActionId::AddValidator,
            Action::RemoveValidator { .. } => ActionId::RemoveValidator,
            Action::AddSupportedToken { .. } => ActionId::AddSupportedToken,
            Action::RemoveSupportedToken { .. } => ActionId::RemoveSupportedToken,
            Action::AddSupportedWrappedToken { .. } => ActionId::AddSupportedWrappedToken,
            Action::RemoveSupportedWrappedToken { .. } => ActionId::RemoveSupportedWrappedToken,
            Action::SetPause { .. } => ActionId::SetPause,
            Action::CompleteTransfer { .. } => ActionId::CompleteTransfer,
        }
    }

    pub fn is_governance(&self) -> bool {
        self.id().is_governance()
    }
}

/// Compute the canonical digest of `action`.
///
/// `nonce` is only encoded for governance actions.
pub fn action_digest(
    action: &Action,
    nonce: u64,
    domain: &[u8; 32],
    expiration: u64,
) -> Result<[u8; 32], ContractError> {
    let mut encoder = PackedEncoder::new().uint(u128::from(action.id().code()));

    encoder = match action {
        Action::AddValidator { validator } | Action::RemoveValidator { validator } => {
            let address =
                hex_to_address(validator).map_err(|e| ContractError::InvalidAddress {
                    reason: format!("validator {}: {}", validator, e),
                })?;
            encoder.bytes(&address)
        }
        Action::AddSupportedToken { token }
        | Action::RemoveSupportedToken { token }
        | Action::AddSupportedWrappedToken { token }
        | Action::RemoveSupportedWrappedToken { token } => {
            encoder.bytes(&encode_native_address(token))
        }
        Action::SetPause { paused } => encoder.boolean(*paused),
        Action::CompleteTransfer {
            token,
            recipient,
            amount,
            ..
        } => encoder
            .bytes(&encode_native_address(token))
            .bytes(&encode_native_address(recipient))
            .uint(amount.u128()),
    };

    encoder = match action {
        Action::CompleteTransfer {
            source_tx_id,
            op_index,
            ..
        } => encoder
            .bytes(source_tx_id.as_slice())
            .uint(u128::from(*op_index)),
        _ => encoder.uint(u128::from(nonce)),
    };

    Ok(encoder
        .bytes(domain)
        .uint(u128::from(expiration))
        .keccak())
}

/// Digest of `action` as this instance would verify it right now.
///
/// Returns the digest together with the nonce it binds (None for transfer
/// completions).
pub fn current_digest(
    storage: &dyn Storage,
    env: &Env,
    action: &Action,
    expiration: u64,
) -> Result<([u8; 32], Option<u64>), ContractError> {
    let nonce = NONCE.may_load(storage)?.unwrap_or_default();
    let domain = instance_domain(env.contract.address.as_str());
    let digest = action_digest(action, nonce, &domain, expiration)?;

    let bound_nonce = if action.is_governance() {
        Some(nonce)
    } else {
        None
    };
    Ok((digest, bound_nonce))
}

/// Recover the validator identity that produced `signature` over `signing_hash`.
///
/// Accepts `v` as 0/1 or 27/28.
pub fn recover_identity(
    api: &dyn Api,
    signing_hash: &[u8; 32],
    signature: &[u8],
) -> Result<String, ContractError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(ContractError::InvalidSignatures);
    }

    let recovery_param = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return Err(ContractError::InvalidSignatures),
    };

    let pubkey = api
        .secp256k1_recover_pubkey(signing_hash, &signature[..64], recovery_param)
        .map_err(|_| ContractError::InvalidSignatures)?;
    let address = pubkey_to_address(&pubkey).ok_or(ContractError::InvalidSignatures)?;
    Ok(address_to_hex(&address))
}

/// Check a signature set against `digest`.
///
/// Every signature must recover to a registered validator; the distinct
/// signers must then reach the quorum of the current set.
pub fn verify(
    deps: Deps,
    env: &Env,
    digest: &[u8; 32],
    signatures: &[Binary],
    expiration: u64,
) -> Result<(), ContractError> {
    let now = env.block.time.seconds();
    if expiration <= now {
        return Err(ContractError::ExpiredSignatures { expiration, now });
    }

    let validators = load_validators(deps.storage)?;
    let signing_hash = eth_signed_message_hash(digest);

    let mut signers: Vec<String> = Vec::with_capacity(signatures.len());
    for signature in signatures {
        let signer = recover_identity(deps.api, &signing_hash, signature.as_slice())?;
        if !validators.contains(&signer) {
            return Err(ContractError::InvalidSignatures);
        }
        if !signers.contains(&signer) {
            signers.push(signer);
        }
    }

    let required = quorum(validators.len());
    let got = signers.len() as u32;
    if got < required {
        return Err(ContractError::QuorumNotMet { got, required });
    }
    Ok(())
}

/// Verify `action` and, for governance actions, consume the current nonce.
///
/// Returns the authorized digest.
pub fn authorize(
    deps: DepsMut,
    env: &Env,
    action: &Action,
    signatures: &[Binary],
    expiration: u64,
) -> Result<[u8; 32], ContractError> {
    let (digest, bound_nonce) = current_digest(deps.storage, env, action, expiration)?;
    verify(deps.as_ref(), env, &digest, signatures, expiration)?;

    if let Some(nonce) = bound_nonce {
        NONCE.save(deps.storage, &(nonce + 1))?;
    }
    Ok(digest)
}
