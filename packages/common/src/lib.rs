//! Common - Shared Types for the Validator Bridge
//!
//! Types shared between the bridge contract, its token collaborators and
//! off-chain signers that must reproduce the bridge's action digests.

pub mod action_id;
pub mod native_wrapper;

pub use action_id::ActionId;
pub use native_wrapper::WrappedNativeExecuteMsg;
