// src/wasm.rs

//! JavaScript bindings.

use wasm_bindgen::prelude::*;

use crate::curve::CurveParams;
use crate::error::KeyError;
use crate::key::PublicKey;

fn to_js(err: KeyError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn curve_named(name: &str) -> Result<CurveParams, JsValue> {
    CurveParams::by_name(name).ok_or_else(|| JsValue::from_str(&format!("unknown curve: {name}")))
}

#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct WasmPublicKey {
    inner: PublicKey,
}

#[wasm_bindgen]
impl WasmPublicKey {
    /// Parse a hex-encoded key on the default curve (secp256k1).
    #[wasm_bindgen(js_name = fromHex)]
    pub fn from_hex(hex: &str) -> Result<WasmPublicKey, JsValue> {
        let inner = PublicKey::from_hex(hex).map_err(to_js)?;
        Ok(WasmPublicKey { inner })
    }

    /// Parse a hex-encoded key on `"secp256k1"` or `"secp256r1"`.
    #[wasm_bindgen(js_name = fromHexOnCurve)]
    pub fn from_hex_on_curve(hex: &str, curve: &str) -> Result<WasmPublicKey, JsValue> {
        let curve = curve_named(curve)?;
        let inner = PublicKey::from_hex_on(hex, &curve).map_err(to_js)?;
        Ok(WasmPublicKey { inner })
    }

    #[wasm_bindgen(js_name = fromBytes)]
    pub fn from_bytes(bytes: &[u8]) -> Result<WasmPublicKey, JsValue> {
        let inner = PublicKey::decode(bytes).map_err(to_js)?;
        Ok(WasmPublicKey { inner })
    }

    #[wasm_bindgen(js_name = fromSpkiDer)]
    pub fn from_spki_der(der: &[u8]) -> Result<WasmPublicKey, JsValue> {
        let inner = PublicKey::from_spki_der(der).map_err(to_js)?;
        Ok(WasmPublicKey { inner })
    }

    #[wasm_bindgen(js_name = toHex)]
    pub fn to_hex(&self) -> String {
        self.inner.to_hex()
    }

    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.encode()
    }

    #[wasm_bindgen(js_name = scriptHash)]
    pub fn script_hash(&self) -> Vec<u8> {
        self.inner.script_hash().to_vec()
    }

    pub fn address(&self) -> String {
        self.inner.address()
    }

    #[wasm_bindgen(js_name = isInfinity)]
    pub fn is_infinity(&self) -> bool {
        self.inner.is_infinity()
    }
}
