//! Pause gate: the operational kill-switch held in `Config`.

use cosmwasm_std::Storage;

use crate::error::ContractError;
use crate::state::CONFIG;

pub fn is_paused(storage: &dyn Storage) -> Result<bool, ContractError> {
    Ok(CONFIG.load(storage)?.paused)
}

/// Reject the call while the bridge is paused.
pub fn ensure_not_paused(storage: &dyn Storage) -> Result<(), ContractError> {
    if is_paused(storage)? {
        return Err(ContractError::BridgePaused);
    }
    Ok(())
}

/// Only reachable through an authorized `SetPause` action.
pub fn set_paused(storage: &mut dyn Storage, paused: bool) -> Result<(), ContractError> {
    CONFIG.update(storage, |mut config| -> Result<_, ContractError> {
        config.paused = paused;
        Ok(config)
    })?;
    Ok(())
}
