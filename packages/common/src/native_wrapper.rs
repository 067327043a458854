//! Execute interface of the native-currency wrapper token.
//!
//! The wrapper is a CW20 token that additionally mints wrapped units 1:1 for
//! native coins attached to `Deposit`. The bridge only needs the deposit leg;
//! everything else goes through the standard CW20 interface.

use cosmwasm_schema::cw_serde;

#[cw_serde]
pub enum WrappedNativeExecuteMsg {
    /// Credit the sender with wrapped tokens equal to the attached native coins.
    Deposit {},
}
