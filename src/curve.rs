// src/curve.rs

use uint::construct_uint;

use crate::error::KeyError;

construct_uint! {
    /// Fixed-width 256-bit integer used for field elements and coordinates.
    pub struct U256(4);
}

#[allow(dead_code)]
mod wide {
    uint::construct_uint! {
        /// Double-width intermediate so that a product of two field elements never overflows.
        pub struct U512(8);
    }
}

use wide::U512;

fn widen(value: U256) -> U512 {
    let mut limbs = [0u64; 8];
    limbs[..4].copy_from_slice(&value.0);
    U512(limbs)
}

/// Caller guarantees `value < 2^256` (it has been reduced modulo a 256-bit prime).
fn narrow(value: U512) -> U256 {
    let mut limbs = [0u64; 4];
    limbs.copy_from_slice(&value.0[..4]);
    U256(limbs)
}

/// `(a + b) mod p` for reduced operands.
pub fn add_mod(a: U256, b: U256, p: U256) -> U256 {
    let (sum, overflow) = a.overflowing_add(b);
    if overflow || sum >= p {
        // wraps back below 2^256 when the addition carried out
        sum.overflowing_sub(p).0
    } else {
        sum
    }
}

/// `(a - b) mod p` for reduced operands.
pub fn sub_mod(a: U256, b: U256, p: U256) -> U256 {
    if a >= b {
        a - b
    } else {
        p - (b - a)
    }
}

pub fn mul_mod(a: U256, b: U256, p: U256) -> U256 {
    narrow((widen(a) * widen(b)) % widen(p))
}

/// Square-and-multiply exponentiation, most significant bit first.
pub fn pow_mod(base: U256, exp: U256, p: U256) -> U256 {
    let base = base % p;
    let mut acc = U256::one() % p;
    for i in (0..exp.bits()).rev() {
        acc = mul_mod(acc, acc, p);
        if exp.bit(i) {
            acc = mul_mod(acc, base, p);
        }
    }
    acc
}

/// Square root of `n` modulo the prime `p`, if one exists.
///
/// Primes with `p ≡ 3 (mod 4)` take the closed form `n^((p+1)/4)`; every
/// other odd prime goes through Tonelli–Shanks. The candidate is always
/// checked by squaring, so a `Some` result satisfies `r² ≡ n (mod p)`.
/// A modulus below 2 has no field and yields `None`.
pub fn sqrt_mod(n: U256, p: U256) -> Option<U256> {
    if p < U256::from(2u64) {
        return None;
    }
    let n = n % p;
    if n.is_zero() {
        return Some(U256::zero());
    }
    if p == U256::from(2u64) {
        return Some(n);
    }

    let root = if p.low_u64() & 3 == 3 {
        // (p + 1) / 4 without overflowing p + 1
        pow_mod(n, (p >> 2usize) + U256::one(), p)
    } else {
        tonelli_shanks(n, p)?
    };

    (mul_mod(root, root, p) == n).then_some(root)
}

fn tonelli_shanks(n: U256, p: U256) -> Option<U256> {
    let one = U256::one();
    let p_minus_one = p - one;
    let half = p_minus_one >> 1usize;

    // Euler's criterion
    if pow_mod(n, half, p) != one {
        return None;
    }

    // p - 1 = q * 2^s with q odd
    let s = p_minus_one.trailing_zeros();
    let q = p_minus_one >> (s as usize);

    let mut z = U256::from(2u64);
    while pow_mod(z, half, p) != p_minus_one {
        z = z + one;
        if z >= p {
            return None;
        }
    }

    let mut m = s;
    let mut c = pow_mod(z, q, p);
    let mut t = pow_mod(n, q, p);
    let mut r = pow_mod(n, (q + one) >> 1usize, p);

    while t != one {
        // least i in (0, m) with t^(2^i) == 1
        let mut i = 0u32;
        let mut sq = t;
        while sq != one {
            sq = mul_mod(sq, sq, p);
            i += 1;
            if i == m {
                return None;
            }
        }

        let mut b = c;
        for _ in 0..(m - i - 1) {
            b = mul_mod(b, b, p);
        }

        m = i;
        c = mul_mod(b, b, p);
        t = mul_mod(t, c, p);
        r = mul_mod(r, b, p);
    }

    Some(r)
}

/// Short-Weierstrass curve `y² = x³ + a·x + b` over the prime field `p`.
///
/// `a` and `b` are stored reduced modulo `p` (P-256's `a = -3` is kept as `p - 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams {
    pub name: &'static str,
    pub p: U256,
    pub a: U256,
    pub b: U256,
}

/// secp256k1: `y² = x³ + 7`.
pub const SECP256K1: CurveParams = CurveParams {
    name: "secp256k1",
    p: U256([
        0xfffffffefffffc2f,
        0xffffffffffffffff,
        0xffffffffffffffff,
        0xffffffffffffffff,
    ]),
    a: U256([0, 0, 0, 0]),
    b: U256([7, 0, 0, 0]),
};

/// NIST P-256 (secp256r1, prime256v1).
pub const SECP256R1: CurveParams = CurveParams {
    name: "secp256r1",
    p: U256([
        0xffffffffffffffff,
        0x00000000ffffffff,
        0x0000000000000000,
        0xffffffff00000001,
    ]),
    a: U256([
        0xfffffffffffffffc,
        0x00000000ffffffff,
        0x0000000000000000,
        0xffffffff00000001,
    ]),
    b: U256([
        0x3bce3c3e27d2604b,
        0x651d06b0cc53b0f6,
        0xb3ebbd55769886bc,
        0x5ac635d8aa3a93e7,
    ]),
};

impl Default for CurveParams {
    fn default() -> Self {
        SECP256K1
    }
}

impl CurveParams {
    /// Look up a shipped curve; `prime256v1` and `p256` are accepted for secp256r1.
    pub fn by_name(name: &str) -> Option<CurveParams> {
        match name.to_ascii_lowercase().as_str() {
            "secp256k1" => Some(SECP256K1),
            "secp256r1" | "prime256v1" | "p256" | "p-256" => Some(SECP256R1),
            _ => None,
        }
    }

    /// Right-hand side of the curve equation: `x³ + a·x + b (mod p)`.
    pub fn rhs(&self, x: U256) -> U256 {
        let p = self.p;
        let x3 = mul_mod(mul_mod(x, x, p), x, p);
        let ax = mul_mod(self.a, x, p);
        add_mod(add_mod(x3, ax, p), self.b, p)
    }

    /// Whether the affine point `(x, y)` lies on this curve.
    pub fn contains(&self, x: U256, y: U256) -> bool {
        x < self.p && y < self.p && mul_mod(y, y, self.p) == self.rhs(x)
    }

    /// Recover the point with abscissa `x` whose ordinate has the requested parity.
    ///
    /// Fails with [`KeyError::InvalidPoint`] when `x >= p` or when `x³ + a·x + b`
    /// is not a quadratic residue.
    pub fn decompress(&self, x: U256, y_odd: bool) -> crate::error::Result<CurvePoint> {
        if x >= self.p {
            return Err(KeyError::InvalidPoint);
        }

        let y0 = sqrt_mod(self.rhs(x), self.p).ok_or(KeyError::InvalidPoint)?;
        let y = if y0.bit(0) == y_odd {
            y0
        } else {
            sub_mod(U256::zero(), y0, self.p)
        };

        // y0 == 0 has no odd twin
        if y.bit(0) != y_odd {
            return Err(KeyError::InvalidPoint);
        }

        Ok(CurvePoint {
            coords: Some((x, y)),
        })
    }
}

/// A point on a curve, or the identity element.
///
/// Finite points can only be obtained through [`CurvePoint::new`] or
/// [`CurveParams::decompress`], both of which check the curve equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    coords: Option<(U256, U256)>,
}

impl CurvePoint {
    pub const INFINITY: CurvePoint = CurvePoint { coords: None };

    pub fn new(x: U256, y: U256, curve: &CurveParams) -> crate::error::Result<Self> {
        if !curve.contains(x, y) {
            return Err(KeyError::InvalidPoint);
        }
        Ok(Self {
            coords: Some((x, y)),
        })
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.coords.is_none()
    }

    #[inline]
    pub fn coordinates(&self) -> Option<(U256, U256)> {
        self.coords
    }

    #[inline]
    pub fn x(&self) -> Option<U256> {
        self.coords.map(|(x, _)| x)
    }

    #[inline]
    pub fn y(&self) -> Option<U256> {
        self.coords.map(|(_, y)| y)
    }
}
