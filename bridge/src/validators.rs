//! Validator registry: the ordered validator set and its quorum rule.

use cosmwasm_std::Storage;

use crate::error::ContractError;
use crate::hash::{address_to_hex, hex_to_address};
use crate::state::VALIDATORS;

/// Minimum number of distinct validator signatures for a set of `size`.
///
/// Strictly more than two thirds of the set.
pub fn quorum(size: usize) -> u32 {
    (size * 2 / 3 + 1) as u32
}

/// Parse and normalize a validator identity to lowercase `0x` hex.
pub fn parse_validator(value: &str) -> Result<String, ContractError> {
    let address = hex_to_address(value).map_err(|e| ContractError::InvalidAddress {
        reason: format!("validator {}: {}", value, e),
    })?;
    Ok(address_to_hex(&address))
}

pub fn load_validators(storage: &dyn Storage) -> Result<Vec<String>, ContractError> {
    Ok(VALIDATORS.may_load(storage)?.unwrap_or_default())
}

/// Replace the whole set (instantiation only). Rejects empty and duplicate sets.
pub fn init_validators(
    storage: &mut dyn Storage,
    validators: &[String],
) -> Result<Vec<String>, ContractError> {
    if validators.is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "At least one validator required".to_string(),
        });
    }

    let mut set: Vec<String> = Vec::with_capacity(validators.len());
    for raw in validators {
        let validator = parse_validator(raw)?;
        if set.contains(&validator) {
            return Err(ContractError::ValidatorAlreadyExists { validator });
        }
        set.push(validator);
    }

    VALIDATORS.save(storage, &set)?;
    Ok(set)
}

/// Append a validator. Fails if it is already registered.
pub fn add_validator(storage: &mut dyn Storage, validator: &str) -> Result<(), ContractError> {
    let mut validators = load_validators(storage)?;
    if validators.iter().any(|v| v == validator) {
        return Err(ContractError::ValidatorAlreadyExists {
            validator: validator.to_string(),
        });
    }

    validators.push(validator.to_string());
    VALIDATORS.save(storage, &validators)?;
    Ok(())
}

/// Remove a validator, shifting every later entry down by one index.
pub fn remove_validator(storage: &mut dyn Storage, validator: &str) -> Result<(), ContractError> {
    let mut validators = load_validators(storage)?;
    let index = validators
        .iter()
        .position(|v| v == validator)
        .ok_or_else(|| ContractError::ValidatorNotFound {
            validator: validator.to_string(),
        })?;

    if validators.len() == 1 {
        return Err(ContractError::CannotRemoveLastValidator);
    }

    validators.remove(index);
    VALIDATORS.save(storage, &validators)?;
    Ok(())
}
