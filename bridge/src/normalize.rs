//! Amount normalization to the canonical bridge precision.
//!
//! Every amount that crosses the bridge is expressed with
//! [`CANONICAL_DECIMALS`] fractional digits. Tokens with more decimals lose
//! their low digits on the way out; those digits (the dust) are never taken
//! into custody and stay with the sender.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

use crate::error::ContractError;

/// Fractional digits of every normalized amount
pub const CANONICAL_DECIMALS: u8 = 8;

/// Result of normalizing a raw token amount
#[cw_serde]
pub struct NormalizedAmount {
    /// Amount at canonical precision
    pub normalized: Uint128,
    /// Raw amount actually taken into custody (`raw - dust`)
    pub custody: Uint128,
    /// Raw remainder that stays with the sender
    pub dust: Uint128,
}

/// Normalize a raw amount of a token with `decimals` fractional digits.
///
/// Fails with `AmountTooSmall` when nothing is left at canonical precision.
pub fn normalize(raw: Uint128, decimals: u8) -> Result<NormalizedAmount, ContractError> {
    let result = if decimals > CANONICAL_DECIMALS {
        // A divisor beyond u128 means every representable amount is dust.
        let divisor = 10u128
            .checked_pow(u32::from(decimals - CANONICAL_DECIMALS))
            .ok_or(ContractError::AmountTooSmall)?;
        let normalized = raw.u128() / divisor;
        let dust = raw.u128() % divisor;
        NormalizedAmount {
            normalized: Uint128::new(normalized),
            custody: Uint128::new(raw.u128() - dust),
            dust: Uint128::new(dust),
        }
    } else {
        let multiplier = 10u128.pow(u32::from(CANONICAL_DECIMALS - decimals));
        NormalizedAmount {
            normalized: raw.checked_mul(Uint128::new(multiplier))?,
            custody: raw,
            dust: Uint128::zero(),
        }
    };

    if result.normalized.is_zero() {
        return Err(ContractError::AmountTooSmall);
    }
    Ok(result)
}

/// Scale a canonical amount back to a token with `decimals` fractional digits.
///
/// Scaling down must be exact; an amount that would lose digits is rejected
/// rather than silently truncated.
pub fn denormalize(normalized: Uint128, decimals: u8) -> Result<Uint128, ContractError> {
    if decimals >= CANONICAL_DECIMALS {
        let multiplier = 10u128
            .checked_pow(u32::from(decimals - CANONICAL_DECIMALS))
            .ok_or_else(|| ContractError::InvalidAmount {
                reason: format!("cannot scale to {} decimals", decimals),
            })?;
        return normalized
            .checked_mul(Uint128::new(multiplier))
            .map_err(|_| ContractError::InvalidAmount {
                reason: format!("{} overflows at {} decimals", normalized, decimals),
            });
    }

    let divisor = 10u128.pow(u32::from(CANONICAL_DECIMALS - decimals));
    if normalized.u128() % divisor != 0 {
        return Err(ContractError::InvalidAmount {
            reason: format!(
                "{} is not representable with {} decimals",
                normalized, decimals
            ),
        });
    }
    Ok(Uint128::new(normalized.u128() / divisor))
}
