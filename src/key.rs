// src/key.rs

use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use spki::{ObjectIdentifier, SubjectPublicKeyInfoRef};

use crate::curve::{CurveParams, CurvePoint, U256, SECP256K1, SECP256R1};
use crate::error::{KeyError, Result};

pub const PREFIX_INFINITY: u8 = 0x00;
pub const PREFIX_COMPRESSED_EVEN: u8 = 0x02;
pub const PREFIX_COMPRESSED_ODD: u8 = 0x03;
pub const PREFIX_UNCOMPRESSED: u8 = 0x04;

pub const COMPRESSED_LEN: usize = 33;
pub const UNCOMPRESSED_LEN: usize = 65;
const COORDINATE_LEN: usize = 32;

const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const OID_PRIME256V1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const OID_SECP256K1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");

/// An elliptic-curve public key.
///
/// Two keys are equal when their coordinates are equal (or both are the
/// identity). Keys order by `x`, then `y`, ascending; the identity sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    point: CurvePoint,
}

impl PublicKey {
    pub const INFINITY: PublicKey = PublicKey {
        point: CurvePoint::INFINITY,
    };

    pub fn from_point(point: CurvePoint) -> Self {
        Self { point }
    }

    #[inline]
    pub fn point(&self) -> &CurvePoint {
        &self.point
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.point.is_infinity()
    }

    /// Decode a key on the default curve (secp256k1).
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_on(data, &CurveParams::default())
    }

    /// Decode any of the three wire forms on `curve`.
    ///
    /// Compressed and uncompressed buffers may carry trailing bytes past the
    /// fixed payload; the identity must be exactly one byte.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(data, curve), fields(len = data.len(), curve = curve.name))
    )]
    pub fn decode_on(data: &[u8], curve: &CurveParams) -> Result<Self> {
        let len = data.len();
        let prefix = *data.first().ok_or(KeyError::BadLength {
            expected: 1,
            actual: 0,
        })?;

        match prefix {
            PREFIX_INFINITY => {
                if len != 1 {
                    return Err(KeyError::BadLength {
                        expected: 1,
                        actual: len,
                    });
                }
                Ok(Self::INFINITY)
            }
            PREFIX_COMPRESSED_EVEN | PREFIX_COMPRESSED_ODD => {
                if len < COMPRESSED_LEN {
                    return Err(KeyError::BadLength {
                        expected: COMPRESSED_LEN,
                        actual: len,
                    });
                }
                let x_bytes = &data[1..COMPRESSED_LEN];
                let x = U256::from_big_endian(x_bytes);
                let point = curve.decompress(x, prefix & 1 == 1).map_err(|_| {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(curve = curve.name, "compressed key has no matching point");
                    KeyError::BadFormat(format!(
                        "no {} point with x = {}",
                        curve.name,
                        hex::encode(x_bytes)
                    ))
                })?;
                Ok(Self { point })
            }
            PREFIX_UNCOMPRESSED => {
                if len < UNCOMPRESSED_LEN {
                    return Err(KeyError::BadLength {
                        expected: UNCOMPRESSED_LEN,
                        actual: len,
                    });
                }
                let x = U256::from_big_endian(&data[1..1 + COORDINATE_LEN]);
                let y = U256::from_big_endian(&data[1 + COORDINATE_LEN..UNCOMPRESSED_LEN]);
                let point = CurvePoint::new(x, y, curve).map_err(|_| {
                    KeyError::BadFormat(format!("uncompressed point is not on {}", curve.name))
                })?;
                Ok(Self { point })
            }
            other => {
                #[cfg(feature = "tracing")]
                tracing::debug!(prefix = other, "rejecting unknown key prefix");
                Err(KeyError::BadFormat(format!("invalid prefix 0x{other:02x}")))
            }
        }
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_hex_on(s, &CurveParams::default())
    }

    pub fn from_hex_on(s: &str, curve: &CurveParams) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::decode_on(&bytes, curve)
    }

    /// Read one key from a stream on the default curve.
    pub fn decode_from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        Self::decode_from_reader_on(reader, &CurveParams::default())
    }

    /// Read the prefix byte, then exactly the payload it implies.
    ///
    /// Nothing past the key is consumed, so the reader can continue with the
    /// next field of an enclosing structure.
    pub fn decode_from_reader_on<R: Read>(reader: &mut R, curve: &CurveParams) -> Result<Self> {
        let mut prefix = [0u8; 1];
        reader.read_exact(&mut prefix).map_err(|err| match err.kind() {
            io::ErrorKind::UnexpectedEof => KeyError::BadLength {
                expected: 1,
                actual: 0,
            },
            _ => KeyError::Encoding(err.to_string()),
        })?;

        let payload_len = match prefix[0] {
            PREFIX_INFINITY => return Ok(Self::INFINITY),
            PREFIX_COMPRESSED_EVEN | PREFIX_COMPRESSED_ODD => COMPRESSED_LEN - 1,
            PREFIX_UNCOMPRESSED => UNCOMPRESSED_LEN - 1,
            other => return Err(KeyError::BadFormat(format!("invalid prefix 0x{other:02x}"))),
        };

        let mut data = Vec::with_capacity(1 + payload_len);
        data.push(prefix[0]);
        reader
            .by_ref()
            .take(payload_len as u64)
            .read_to_end(&mut data)
            .map_err(|err| KeyError::Encoding(err.to_string()))?;

        if data.len() != 1 + payload_len {
            return Err(KeyError::BadLength {
                expected: 1 + payload_len,
                actual: data.len(),
            });
        }

        Self::decode_on(&data, curve)
    }

    /// Canonical wire form: `[0x00]` for the identity, otherwise the 33-byte
    /// compressed encoding regardless of how the key was decoded.
    pub fn encode(&self) -> Vec<u8> {
        match self.point.coordinates() {
            None => vec![PREFIX_INFINITY],
            Some((x, y)) => {
                let prefix = if y.bit(0) {
                    PREFIX_COMPRESSED_ODD
                } else {
                    PREFIX_COMPRESSED_EVEN
                };
                let mut out = Vec::with_capacity(COMPRESSED_LEN);
                out.push(prefix);
                out.extend_from_slice(&x.to_big_endian());
                out
            }
        }
    }

    /// 65-byte `0x04 || x || y` form, or `None` for the identity.
    pub fn encode_uncompressed(&self) -> Option<Vec<u8>> {
        let (x, y) = self.point.coordinates()?;
        let mut out = Vec::with_capacity(UNCOMPRESSED_LEN);
        out.push(PREFIX_UNCOMPRESSED);
        out.extend_from_slice(&x.to_big_endian());
        out.extend_from_slice(&y.to_big_endian());
        Some(out)
    }

    pub fn encode_to_writer<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.encode())
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    /// Parse a DER-encoded X.509 SubjectPublicKeyInfo holding an EC key.
    ///
    /// The named-curve parameter picks the curve; only P-256 and secp256k1
    /// are understood.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip(der), fields(len = der.len()))
    )]
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        let info = SubjectPublicKeyInfoRef::try_from(der)?;
        let (algorithm, parameters) = info.algorithm.oids().map_err(spki::Error::from)?;

        if algorithm != ID_EC_PUBLIC_KEY {
            return Err(KeyError::UnsupportedKey(format!(
                "algorithm {algorithm} is not an elliptic-curve key"
            )));
        }

        let curve = match parameters {
            Some(oid) if oid == OID_PRIME256V1 => SECP256R1,
            Some(oid) if oid == OID_SECP256K1 => SECP256K1,
            Some(oid) => {
                return Err(KeyError::UnsupportedKey(format!("named curve {oid}")));
            }
            None => {
                return Err(KeyError::UnsupportedKey("missing named curve".to_string()));
            }
        };

        let point = info
            .subject_public_key
            .as_bytes()
            .ok_or(KeyError::Spki(spki::Error::KeyMalformed))?;

        Self::decode_on(point, &curve)
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // None < Some, tuples compare x first
        self.point.coordinates().cmp(&other.point.coordinates())
    }
}

/// Sort keys into the deterministic order used for multi-signature key lists.
pub fn sort_keys(keys: &mut [PublicKey]) {
    keys.sort();
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
