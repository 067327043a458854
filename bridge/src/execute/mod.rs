//! Execute handlers for the validator bridge contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `transfer` - TransferTokens, WrapAndTransfer and the CW20 receive hook
//! - `complete` - CompleteTransfer and RequestNewSignatures
//! - `governance` - Validator-signed validator, token registry and pause changes

mod complete;
mod governance;
mod transfer;

pub use complete::*;
pub use governance::*;
pub use transfer::*;
