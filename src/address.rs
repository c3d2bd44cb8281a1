// src/address.rs

//! Address derivation.
//!
//! A key's address is the Base58Check encoding of its script hash:
//!
//! ```text
//! script      = 0x21 || encode(key) || 0xAC
//! script_hash = RIPEMD160(SHA256(script))
//! payload     = version || script_hash
//! address     = Base58(payload || SHA256(SHA256(payload))[..4])
//! ```

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::key::PublicKey;

/// Network version byte prepended to the script hash.
pub const ADDRESS_VERSION: u8 = 0x17;

const PUSH_BYTES_33: u8 = 0x21;
const CHECK_SIG: u8 = 0xAC;
const CHECKSUM_LENGTH: usize = 4;

pub const SCRIPT_HASH_LENGTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressConfig {
    pub version: u8,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            version: ADDRESS_VERSION,
        }
    }
}

/// Single-signature verification script wrapping the canonical key bytes.
pub fn verification_script(key: &PublicKey) -> Vec<u8> {
    let encoded = key.encode();
    let mut script = Vec::with_capacity(encoded.len() + 2);
    script.push(PUSH_BYTES_33);
    script.extend_from_slice(&encoded);
    script.push(CHECK_SIG);
    script
}

pub fn script_hash(key: &PublicKey) -> [u8; SCRIPT_HASH_LENGTH] {
    let sha = Sha256::digest(verification_script(key));
    Ripemd160::digest(sha).into()
}

pub fn address(key: &PublicKey) -> String {
    address_with(key, &AddressConfig::default())
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(key)))]
pub fn address_with(key: &PublicKey, config: &AddressConfig) -> String {
    let mut payload = Vec::with_capacity(1 + SCRIPT_HASH_LENGTH + CHECKSUM_LENGTH);
    payload.push(config.version);
    payload.extend_from_slice(&script_hash(key));

    let check = checksum(&payload);
    payload.extend_from_slice(&check);

    bs58::encode(payload).into_string()
}

fn checksum(data: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let hash = Sha256::digest(Sha256::digest(data));
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&hash[..CHECKSUM_LENGTH]);
    out
}

impl PublicKey {
    #[inline]
    pub fn script_hash(&self) -> [u8; SCRIPT_HASH_LENGTH] {
        script_hash(self)
    }

    #[inline]
    pub fn address(&self) -> String {
        address(self)
    }
}
