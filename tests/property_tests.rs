//! Property-based tests for the key codec
//!
//! These tests use proptest to check the curve and codec invariants over
//! random abscissas and small primes.

#[cfg(test)]
mod sqrt_properties {
    use ledgerkey::{mul_mod, pow_mod, sqrt_mod, U256};
    use proptest::prelude::*;

    fn small_prime() -> impl Strategy<Value = u64> {
        prop::sample::select(vec![3u64, 5, 7, 11, 13, 17, 41, 97, 193, 257, 7681, 65537])
    }

    proptest! {
        /// Any root returned squares back to the input
        #[test]
        fn root_squares_back(p in small_prime(), n in 0u64..100_000) {
            let pu = U256::from(p);
            let n = U256::from(n % p);
            if let Some(r) = sqrt_mod(n, pu) {
                prop_assert_eq!(mul_mod(r, r, pu), n);
            }
        }

        /// A root exists exactly for quadratic residues (Euler's criterion)
        #[test]
        fn root_exists_iff_residue(p in small_prime(), n in 1u64..100_000) {
            let pu = U256::from(p);
            let n = U256::from(n % p);
            prop_assume!(!n.is_zero());
            let legendre = pow_mod(n, (pu - U256::one()) >> 1usize, pu);
            prop_assert_eq!(sqrt_mod(n, pu).is_some(), legendre == U256::one());
        }

        /// Squares always have a root
        #[test]
        fn squares_have_roots(p in small_prime(), y in 0u64..100_000) {
            let pu = U256::from(p);
            let y = U256::from(y % p);
            let n = mul_mod(y, y, pu);
            prop_assert!(sqrt_mod(n, pu).is_some());
        }
    }
}

#[cfg(test)]
mod decompress_properties {
    use ledgerkey::{pow_mod, CurveParams, KeyError, PublicKey, U256, SECP256K1, SECP256R1};
    use proptest::prelude::*;

    fn curve() -> impl Strategy<Value = CurveParams> {
        prop::sample::select(vec![SECP256K1, SECP256R1])
    }

    proptest! {
        /// Decompressed points satisfy the curve equation and the requested parity
        #[test]
        fn decompressed_point_on_curve(curve in curve(), x in any::<[u8; 32]>(), odd in any::<bool>()) {
            let x = U256::from_big_endian(&x);
            match curve.decompress(x, odd) {
                Ok(point) => {
                    let (px, py) = point.coordinates().unwrap();
                    prop_assert_eq!(px, x);
                    prop_assert_eq!(py.bit(0), odd);
                    prop_assert!(curve.contains(px, py));
                }
                Err(err) => {
                    prop_assert_eq!(err, KeyError::InvalidPoint);
                    if x < curve.p {
                        let rhs = curve.rhs(x);
                        let legendre = pow_mod(rhs, (curve.p - U256::one()) >> 1usize, curve.p);
                        prop_assert_eq!(legendre, curve.p - U256::one());
                    }
                }
            }
        }

        /// decode(encode(k)) == k for every valid finite key
        #[test]
        fn encode_decode_round_trip(curve in curve(), x in any::<[u8; 32]>(), odd in any::<bool>()) {
            let x = U256::from_big_endian(&x);
            if let Ok(point) = curve.decompress(x, odd) {
                let key = PublicKey::from_point(point);
                let encoded = key.encode();
                prop_assert_eq!(encoded.len(), 33);
                prop_assert_eq!(encoded[0], if odd { 0x03 } else { 0x02 });
                prop_assert_eq!(PublicKey::decode_on(&encoded, &curve).unwrap(), key);

                let uncompressed = key.encode_uncompressed().unwrap();
                prop_assert_eq!(PublicKey::decode_on(&uncompressed, &curve).unwrap(), key);
            }
        }

        /// The twin point (same x, other parity) sorts consistently with its y
        #[test]
        fn ordering_follows_coordinates(
            a in any::<[u8; 32]>(),
            b in any::<[u8; 32]>(),
            odd_a in any::<bool>(),
            odd_b in any::<bool>()
        ) {
            let xa = U256::from_big_endian(&a);
            let xb = U256::from_big_endian(&b);
            if let (Ok(pa), Ok(pb)) = (SECP256K1.decompress(xa, odd_a), SECP256K1.decompress(xb, odd_b)) {
                let (ka, kb) = (PublicKey::from_point(pa), PublicKey::from_point(pb));
                if xa != xb {
                    prop_assert_eq!(ka.cmp(&kb), xa.cmp(&xb));
                } else {
                    prop_assert_eq!(ka.cmp(&kb), pa.y().cmp(&pb.y()));
                }
            }
        }
    }
}

#[cfg(test)]
mod address_properties {
    use ledgerkey::{PublicKey, U256, SECP256R1};
    use proptest::prelude::*;

    proptest! {
        /// Same key, same address; version 0x17 always renders with a leading 'A'
        #[test]
        fn address_is_deterministic(x in any::<[u8; 32]>(), odd in any::<bool>()) {
            let x = U256::from_big_endian(&x);
            if let Ok(point) = SECP256R1.decompress(x, odd) {
                let key = PublicKey::from_point(point);
                let first = key.address();
                let second = PublicKey::decode_on(&key.encode(), &SECP256R1).unwrap().address();

                prop_assert_eq!(&first, &second);
                prop_assert!(first.starts_with('A'));
                prop_assert_eq!(first.len(), 34);
                prop_assert!(bs58_alphabet_only(&first));
            }
        }
    }

    fn bs58_alphabet_only(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l'))
    }
}
