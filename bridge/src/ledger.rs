//! Transfer ledger: exactly-once settlement of inbound transfers.
//!
//! A transfer is identified by the source chain transaction id and the index
//! of the operation inside that transaction. The key is marked in the same
//! call that dispatches the mint/release message, so the host either commits
//! both or neither.

use cosmwasm_std::{Binary, Storage};

use crate::error::ContractError;
use crate::state::COMPLETED_TRANSFERS;

/// Longest accepted source transaction id, in bytes
pub const MAX_SOURCE_TX_ID_LENGTH: usize = 64;

/// Idempotency key of an inbound transfer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferKey<'a> {
    pub source_tx_id: &'a Binary,
    pub op_index: u64,
}

impl<'a> TransferKey<'a> {
    /// Build a key, rejecting empty or oversized transaction ids.
    pub fn new(source_tx_id: &'a Binary, op_index: u64) -> Result<Self, ContractError> {
        let length = source_tx_id.len();
        if length == 0 || length > MAX_SOURCE_TX_ID_LENGTH {
            return Err(ContractError::InvalidSourceTxId {
                reason: format!(
                    "length {} is outside 1..={}",
                    length, MAX_SOURCE_TX_ID_LENGTH
                ),
            });
        }
        Ok(Self {
            source_tx_id,
            op_index,
        })
    }

    fn storage_key(&self) -> (&[u8], u64) {
        (self.source_tx_id.as_slice(), self.op_index)
    }
}

pub fn is_completed(storage: &dyn Storage, key: &TransferKey) -> Result<bool, ContractError> {
    Ok(COMPLETED_TRANSFERS
        .may_load(storage, key.storage_key())?
        .unwrap_or(false))
}

/// Settle a transfer once.
///
/// `settle` builds the settlement (e.g. the mint or release message); it only
/// runs when the key is still open, and the key is marked only if it succeeds.
pub fn complete<T, F>(
    storage: &mut dyn Storage,
    key: &TransferKey,
    settle: F,
) -> Result<T, ContractError>
where
    F: FnOnce(&mut dyn Storage) -> Result<T, ContractError>,
{
    if is_completed(storage, key)? {
        return Err(ContractError::TransferAlreadyCompleted {
            source_tx_id: format!("0x{}", hex::encode(key.source_tx_id.as_slice())),
            op_index: key.op_index,
        });
    }

    let settlement = settle(&mut *storage)?;
    COMPLETED_TRANSFERS.save(storage, key.storage_key(), &true)?;
    Ok(settlement)
}
