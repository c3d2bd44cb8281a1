// src/lib.rs

// Core codec and hashing (no wasm, pure Rust).
mod address;
mod attr_usage;
mod curve;
mod error;
mod key;
mod wasm;

pub use crate::address::{
    address, address_with, script_hash, verification_script, AddressConfig, ADDRESS_VERSION,
    SCRIPT_HASH_LENGTH,
};
pub use crate::attr_usage::{AttrUsage, HashSlot, RemarkSlot, UnassignedCode};
pub use crate::curve::{
    add_mod, mul_mod, pow_mod, sqrt_mod, sub_mod, CurveParams, CurvePoint, SECP256K1, SECP256R1,
    U256,
};
pub use crate::error::{KeyError, Result};
pub use crate::key::{
    sort_keys, PublicKey, COMPRESSED_LEN, PREFIX_COMPRESSED_EVEN, PREFIX_COMPRESSED_ODD,
    PREFIX_INFINITY, PREFIX_UNCOMPRESSED, UNCOMPRESSED_LEN,
};
pub use crate::wasm::WasmPublicKey;
