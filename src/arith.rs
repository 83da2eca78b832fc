// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Modular arithmetic for word-size prime moduli.
//!
//! Reduction uses a precomputed fixed-point reciprocal of the modulus
//! instead of hardware division, in the style of GMP's `invert_limb`:
//!
//! Möller, Granlund, Improved division by invariant integers
//! <https://gmplib.org/~tege/division-paper.pdf>
//!
//! The reciprocal is an approximation; every reduction ends with at most
//! one correcting subtraction.

use num_integer::Integer;

/// Context for arithmetic modulo an odd prime `p`, `3 <= p < 2^63`.
///
/// The context is a small copyable value so polynomials can carry it
/// around the way they carry their coefficients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZmodP {
    p: u64,
    // p shifted left so that its top bit is set.
    pn: u64,
    norm: u32,
    // floor((2^128 - 1) / pn) - 2^64
    pinv: u64,
}

impl ZmodP {
    /// Sets up a reduction context. The primality of `p` is not verified:
    /// a composite modulus surfaces later as a failed inversion.
    pub fn new(p: u64) -> Self {
        assert!(p >= 3 && p % 2 == 1, "modulus must be an odd prime, got {p}");
        assert!(p >> 63 == 0, "modulus must have at most 63 bits");
        let norm = p.leading_zeros();
        let pn = p << norm;
        let pinv = ((u128::MAX / pn as u128) - (1u128 << 64)) as u64;
        ZmodP { p, pn, norm, pinv }
    }

    #[inline(always)]
    pub fn modulus(&self) -> u64 {
        self.p
    }

    /// Bit length of the modulus.
    #[inline(always)]
    pub fn bits(&self) -> u32 {
        64 - self.norm
    }

    #[inline(always)]
    pub fn add(&self, x: u64, y: u64) -> u64 {
        debug_assert!(x < self.p && y < self.p);
        let s = x + y;
        if s >= self.p {
            s - self.p
        } else {
            s
        }
    }

    #[inline(always)]
    pub fn sub(&self, x: u64, y: u64) -> u64 {
        debug_assert!(x < self.p && y < self.p);
        if x >= y {
            x - y
        } else {
            x + self.p - y
        }
    }

    #[inline(always)]
    pub fn neg(&self, x: u64) -> u64 {
        debug_assert!(x < self.p);
        if x == 0 {
            0
        } else {
            self.p - x
        }
    }

    #[inline(always)]
    pub fn mul(&self, x: u64, y: u64) -> u64 {
        debug_assert!(x < self.p && y < self.p);
        // x*y < p^2 so the normalized product x*y << norm < p*pn < 2^127
        // still fits in 128 bits, and its top word is below pn.
        let z = (x as u128 * y as u128) << self.norm;
        self.div2by1((z >> 64) as u64, z as u64) >> self.norm
    }

    /// Reduces an arbitrary element of [0, 2^64) into [0, p).
    #[inline]
    pub fn reduce(&self, x: u64) -> u64 {
        if x < self.p {
            return x;
        }
        let xn = (x as u128) << self.norm;
        self.div2by1((xn >> 64) as u64, xn as u64) >> self.norm
    }

    /// Reduces a full double-word value modulo p. Used when unpacking
    /// Kronecker substitution bit fields, which may span two words.
    pub fn rem_u128(&self, x: u128) -> u64 {
        // Normalized, x spans three words l2:l1:l0 with l2 < 2^norm <= pn.
        let (lo, hi) = (x as u64, (x >> 64) as u64);
        let l0 = lo << self.norm;
        let (l1, l2) = if self.norm == 0 {
            (hi, 0)
        } else {
            (
                (hi << self.norm) | (lo >> (64 - self.norm)),
                hi >> (64 - self.norm),
            )
        };
        let r = self.div2by1(l2, l1);
        self.div2by1(r, l0) >> self.norm
    }

    // Remainder of u1:u0 by pn, requiring u1 < pn.
    // This is udiv_qrnnd_preinv with the quotient discarded.
    #[inline(always)]
    fn div2by1(&self, u1: u64, u0: u64) -> u64 {
        debug_assert!(u1 < self.pn);
        let q = self.pinv as u128 * u1 as u128;
        let (q0, carry) = (q as u64).overflowing_add(u0);
        let q1 = ((q >> 64) as u64)
            .wrapping_add(u1)
            .wrapping_add(carry as u64)
            .wrapping_add(1);
        let mut r = u0.wrapping_sub(q1.wrapping_mul(self.pn));
        if r > q0 {
            // Quotient estimate was one too large.
            r = r.wrapping_add(self.pn);
        }
        if r >= self.pn {
            r -= self.pn;
        }
        r
    }

    /// Modular exponentiation by squaring.
    pub fn pow(&self, x: u64, mut e: u64) -> u64 {
        debug_assert!(x < self.p);
        let mut res = 1 % self.p;
        let mut sq = x;
        while e > 0 {
            if e & 1 == 1 {
                res = self.mul(res, sq);
            }
            sq = self.mul(sq, sq);
            e >>= 1;
        }
        res
    }

    /// Modular inverse, or None when x is zero or shares a factor with the
    /// modulus (which can only happen if the modulus is not prime).
    pub fn inv(&self, x: u64) -> Option<u64> {
        if x == 0 {
            return None;
        }
        let e = (x as i64).extended_gcd(&(self.p as i64));
        if e.gcd != 1 {
            return None;
        }
        let u = e.x.rem_euclid(self.p as i64);
        Some(u as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mul_small_exhaustive() {
        // Brute-force comparison against % for every residue pair.
        for p in [3_u64, 5, 7, 17, 97, 251] {
            let zp = ZmodP::new(p);
            for x in 0..p {
                for y in 0..p {
                    assert_eq!(zp.mul(x, y), (x * y) % p, "{x}*{y} mod {p}");
                    assert_eq!(zp.add(x, y), (x + y) % p);
                    assert_eq!(zp.sub(x, y), (x + p - y) % p);
                }
                assert_eq!(zp.neg(x), (p - x) % p);
            }
        }
    }

    #[test]
    fn test_mul_large_random() {
        use rand::Rng;

        // Primes near the top of every bit range the engine accepts.
        const PRIMES: &[u64] = &[
            251,
            65537,
            (1 << 31) - 1,
            (1 << 61) - 1,
            9223372036854775783, // largest 63-bit prime
        ];
        let mut rng = rand::thread_rng();
        for &p in PRIMES {
            let zp = ZmodP::new(p);
            for _ in 0..5000 {
                let x = rng.gen_range(0..p);
                let y = rng.gen_range(0..p);
                let expect = ((x as u128 * y as u128) % p as u128) as u64;
                assert_eq!(zp.mul(x, y), expect, "{x}*{y} mod {p}");
            }
        }
    }

    #[test]
    fn test_rem_u128() {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        for &p in &[5_u64, 65537, (1 << 61) - 1, 9223372036854775783] {
            let zp = ZmodP::new(p);
            assert_eq!(zp.rem_u128(u128::MAX), (u128::MAX % p as u128) as u64);
            for _ in 0..2000 {
                let x: u128 = rng.gen();
                assert_eq!(zp.rem_u128(x), (x % p as u128) as u64);
            }
        }
    }

    #[test]
    fn test_inv() {
        for p in [3_u64, 257, 65537, 9223372036854775783] {
            let zp = ZmodP::new(p);
            assert_eq!(zp.inv(0), None);
            for x in 1..100.min(p) {
                let xinv = zp.inv(x).unwrap();
                assert_eq!(zp.mul(x, xinv), 1, "inv({x}) mod {p}");
                // Fermat
                assert_eq!(zp.pow(x, p - 2), xinv);
            }
        }
        // Non-unit modulo a composite is reported, not fatal.
        let zn = ZmodP::new(15);
        assert_eq!(zn.inv(3), None);
        assert_eq!(zn.inv(5), None);
        assert_eq!(zn.mul(zn.inv(2).unwrap(), 2), 1);
    }

    #[test]
    fn test_pow() {
        let zp = ZmodP::new(997);
        for x in 1..997 {
            assert_eq!(zp.pow(x, 996), 1);
            assert_eq!(zp.pow(x, 0), 1);
            assert_eq!(zp.pow(x, 1), x);
        }
    }
}
