//! Hash computation module for validator-signed digests
//!
//! Digests use Solidity-style packed encoding so that the same bytes can be
//! produced with `abi.encodePacked` / `soliditySha3` by off-chain signers.
//!
//! # Encoding rules
//! - uint256: 32 bytes, big-endian, left-padded
//! - 20-byte addresses: raw 20 bytes
//! - bool: 1 byte (0x00 / 0x01)
//! - dynamic bytes: raw, unpadded
//! - chain-native addresses (bech32 strings): keccak256 of the UTF-8 bytes
//!
//! Validators sign the EIP-191 personal-message hash of the digest.

use tiny_keccak::{Hasher, Keccak};

/// Prefix of an EIP-191 personal message carrying a 32-byte payload
const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Hash a validator actually signs: `keccak256("\x19Ethereum Signed Message:\n32" ++ digest)`
pub fn eth_signed_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 28 + 32];
    data[..28].copy_from_slice(PERSONAL_MESSAGE_PREFIX);
    data[28..].copy_from_slice(digest);
    keccak256(&data)
}

/// Derive the 20-byte EVM-style identity of an uncompressed secp256k1 key.
///
/// Accepts the 65-byte SEC1 form (leading 0x04) or the bare 64-byte point.
pub fn pubkey_to_address(pubkey: &[u8]) -> Option<[u8; 20]> {
    let point = match pubkey.len() {
        65 if pubkey[0] == 0x04 => &pubkey[1..],
        64 => pubkey,
        _ => return None,
    };
    let hash = keccak256(point);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Some(address)
}

/// Domain separator of a bridge instance: keccak256 of its contract address
pub fn instance_domain(contract_address: &str) -> [u8; 32] {
    keccak256(contract_address.as_bytes())
}

/// Encode a chain-native address (bech32 string) as 32 bytes
pub fn encode_native_address(address: &str) -> [u8; 32] {
    keccak256(address.as_bytes())
}

/// Incremental packed encoder for digest payloads
#[derive(Debug, Default)]
pub struct PackedEncoder {
    data: Vec<u8>,
}

impl PackedEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a uint256 holding a u128 value
    pub fn uint(mut self, value: u128) -> Self {
        self.data.extend_from_slice(&[0u8; 16]);
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Append a bool as one byte
    pub fn boolean(mut self, value: bool) -> Self {
        self.data.push(u8::from(value));
        self
    }

    /// Append raw bytes (fixed-size values and the single dynamic field alike)
    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.data.extend_from_slice(value);
        self
    }

    pub fn keccak(self) -> [u8; 32] {
        keccak256(&self.data)
    }
}

/// Convert 32-byte hash to hex string (for attributes)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Format a 20-byte identity as a lowercase 0x-prefixed string
pub fn address_to_hex(address: &[u8; 20]) -> String {
    format!("0x{}", hex::encode(address))
}

/// Parse a 20-byte hex identity (with or without 0x prefix, any case)
pub fn hex_to_address(value: &str) -> Result<[u8; 20], &'static str> {
    let stripped = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if stripped.len() != 40 {
        return Err("Invalid hex length: expected 40 characters");
    }

    let mut result = [0u8; 20];
    hex::decode_to_slice(stripped, &mut result).map_err(|_| "Invalid hex character")?;
    Ok(result)
}
