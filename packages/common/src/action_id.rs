//! Numeric tags for every action a validator quorum can authorize.
//!
//! The tag is the first field of every signed digest, so the numbering is part
//! of the wire format shared with off-chain signers and must never change.

use cosmwasm_schema::cw_serde;

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum ActionId {
    /// Never valid. Keeps zero-initialized payloads from matching an action.
    Reserved,
    AddValidator,
    RemoveValidator,
    AddSupportedToken,
    RemoveSupportedToken,
    AddSupportedWrappedToken,
    RemoveSupportedWrappedToken,
    SetPause,
    CompleteTransfer,
}

impl ActionId {
    /// Numeric tag as encoded in the digest.
    pub fn code(self) -> u8 {
        match self {
            ActionId::Reserved => 0,
            ActionId::AddValidator => 1,
            ActionId::RemoveValidator => 2,
            ActionId::AddSupportedToken => 3,
            ActionId::RemoveSupportedToken => 4,
            ActionId::AddSupportedWrappedToken => 5,
            ActionId::RemoveSupportedWrappedToken => 6,
            ActionId::SetPause => 7,
            ActionId::CompleteTransfer => 8,
        }
    }

    /// Governance actions consume the global nonce; transfer completions are
    /// bound to their source transaction instead.
    pub fn is_governance(self) -> bool {
        !matches!(self, ActionId::Reserved | ActionId::CompleteTransfer)
    }
}
