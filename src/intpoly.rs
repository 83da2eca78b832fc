// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Dense polynomials with big-integer coefficients.
//!
//! Same normalization discipline as the modular container: no leading
//! zeros, the zero polynomial is the empty vector. Multiplication has
//! three tiers; the interesting one is Kronecker substitution, which
//! evaluates both operands at x = 2^w for a field width w large enough
//! that the product's coefficients never overlap, reads the answer off
//! one big-integer multiplication, and handles signs with a balanced
//! offset so packing and unpacking stay linear and carry-free.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::params;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntPoly {
    coeffs: Vec<BigInt>,
}

impl IntPoly {
    pub fn zero() -> Self {
        IntPoly { coeffs: vec![] }
    }

    pub fn one() -> Self {
        IntPoly {
            coeffs: vec![BigInt::one()],
        }
    }

    /// Builds a polynomial, trimming leading zeros.
    pub fn from_coeffs(coeffs: impl Into<Vec<BigInt>>) -> Self {
        let mut p = IntPoly {
            coeffs: coeffs.into(),
        };
        p.normalize();
        p
    }

    /// Convenience constructor from machine integers.
    pub fn from_i64s(coeffs: &[i64]) -> Self {
        IntPoly::from_coeffs(coeffs.iter().map(|&c| BigInt::from(c)).collect::<Vec<_>>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    #[inline]
    pub fn degree(&self) -> i64 {
        self.coeffs.len() as i64 - 1
    }

    #[inline]
    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    /// Coefficient of x^i (zero beyond the significant length).
    pub fn coeff(&self, i: usize) -> BigInt {
        self.coeffs.get(i).cloned().unwrap_or_else(BigInt::zero)
    }

    pub fn normalize(&mut self) {
        while self.coeffs.last().map_or(false, |c| c.is_zero()) {
            self.coeffs.pop();
        }
    }

    /// Bit length of the largest coefficient magnitude (0 for zero).
    pub fn max_bits(&self) -> u64 {
        self.coeffs.iter().map(|c| c.bits()).max().unwrap_or(0)
    }

    pub fn add(&self, other: &IntPoly) -> IntPoly {
        let n = self.len().max(other.len());
        let coeffs: Vec<BigInt> = (0..n).map(|i| self.coeff(i) + other.coeff(i)).collect();
        IntPoly::from_coeffs(coeffs)
    }

    pub fn sub(&self, other: &IntPoly) -> IntPoly {
        let n = self.len().max(other.len());
        let coeffs: Vec<BigInt> = (0..n).map(|i| self.coeff(i) - other.coeff(i)).collect();
        IntPoly::from_coeffs(coeffs)
    }

    pub fn neg(&self) -> IntPoly {
        IntPoly {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }

    pub fn scalar_mul(&self, c: &BigInt) -> IntPoly {
        if c.is_zero() {
            return IntPoly::zero();
        }
        IntPoly {
            coeffs: self.coeffs.iter().map(|a| a * c).collect(),
        }
    }
}

/// Product, dispatching on operand length and coefficient size.
pub fn mul(a: &IntPoly, b: &IntPoly) -> IntPoly {
    if a.is_zero() || b.is_zero() {
        return IntPoly::zero();
    }
    let min = a.len().min(b.len());
    if min < params::INTPOLY_KARATSUBA_CUTOFF {
        mul_classical(a, b)
    } else if min < params::INTPOLY_KRONECKER_CUTOFF
        || a.max_bits() + b.max_bits() > params::INTPOLY_KRONECKER_MAX_BITS
    {
        mul_karatsuba(a, b)
    } else {
        mul_kronecker(a, b)
    }
}

/// Schoolbook product, O(n*m) big-integer multiplications.
pub fn mul_classical(a: &IntPoly, b: &IntPoly) -> IntPoly {
    if a.is_zero() || b.is_zero() {
        return IntPoly::zero();
    }
    IntPoly::from_coeffs(classical(a.coeffs(), b.coeffs()))
}

fn classical(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    let mut z = vec![BigInt::zero(); a.len() + b.len() - 1];
    for (i, ai) in a.iter().enumerate() {
        if ai.is_zero() {
            continue;
        }
        for (j, bj) in b.iter().enumerate() {
            z[i + j] += ai * bj;
        }
    }
    z
}

/// Karatsuba product: three half-size products per level.
pub fn mul_karatsuba(a: &IntPoly, b: &IntPoly) -> IntPoly {
    if a.is_zero() || b.is_zero() {
        return IntPoly::zero();
    }
    IntPoly::from_coeffs(karatsuba(a.coeffs(), b.coeffs()))
}

fn karatsuba(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    if a.len().min(b.len()) < params::INTPOLY_KARATSUBA_CUTOFF {
        return classical(a, b);
    }
    let half = (a.len().max(b.len()) + 1) / 2;
    let (alo, ahi) = a.split_at(half.min(a.len()));
    let (blo, bhi) = b.split_at(half.min(b.len()));
    let z0 = karatsuba(alo, blo);
    let mut z = vec![BigInt::zero(); a.len() + b.len() - 1];
    if ahi.is_empty() || bhi.is_empty() {
        // Unbalanced split: only one cross product exists.
        for (i, c) in z0.into_iter().enumerate() {
            z[i] = c;
        }
        let cross = if ahi.is_empty() {
            karatsuba(alo, bhi)
        } else {
            karatsuba(ahi, blo)
        };
        for (i, c) in cross.into_iter().enumerate() {
            z[half + i] += c;
        }
        return z;
    }
    let z2 = karatsuba(ahi, bhi);
    let asum: Vec<BigInt> = (0..half)
        .map(|i| {
            let mut s = alo[i].clone();
            if i < ahi.len() {
                s += &ahi[i];
            }
            s
        })
        .collect();
    let bsum: Vec<BigInt> = (0..half)
        .map(|i| {
            let mut s = blo[i].clone();
            if i < bhi.len() {
                s += &bhi[i];
            }
            s
        })
        .collect();
    let mut z1 = karatsuba(&asum, &bsum);
    for (i, c) in z0.iter().enumerate() {
        z1[i] -= c;
    }
    for (i, c) in z2.iter().enumerate() {
        z1[i] -= c;
    }
    for (i, c) in z0.into_iter().enumerate() {
        z[i] = c;
    }
    for (i, c) in z2.into_iter().enumerate() {
        z[2 * half + i] += c;
    }
    // The subtractions cancel the top of z1; trim so the shifted add
    // stays inside the product.
    while z1.last().map_or(false, |c| c.is_zero()) {
        z1.pop();
    }
    for (i, c) in z1.into_iter().enumerate() {
        z[half + i] += c;
    }
    z
}

/// Kronecker substitution: one big-integer product at x = 2^w.
///
/// The field width `w = max_bits(a) + max_bits(b) + ceil(log2(min)) + 2`
/// leaves each product coefficient strictly below 2^(w-1) in magnitude.
/// Signs are handled by packing the positive and negative parts of each
/// operand separately (one big subtraction each), and unpacking through
/// a balanced offset: adding 2^(w-1) to every field makes all digits
/// nonnegative without carries between fields.
pub fn mul_kronecker(a: &IntPoly, b: &IntPoly) -> IntPoly {
    if a.is_zero() || b.is_zero() {
        return IntPoly::zero();
    }
    let min = a.len().min(b.len()) as u64;
    let log = 64 - (min - 1).leading_zeros() as u64;
    let w = a.max_bits() + b.max_bits() + log + 2;
    let abig = BigInt::from(pack(a.coeffs(), w, Sign::Plus))
        - BigInt::from(pack(a.coeffs(), w, Sign::Minus));
    let bbig = BigInt::from(pack(b.coeffs(), w, Sign::Plus))
        - BigInt::from(pack(b.coeffs(), w, Sign::Minus));
    let prod = abig * bbig;

    let rlen = a.len() + b.len() - 1;
    let shifted = (prod + BigInt::from(offset(rlen, w)))
        .to_biguint()
        .expect("offset dominates every negative digit");
    let limbs = shifted.to_u64_digits();
    let half = BigInt::one() << (w - 1);
    let coeffs: Vec<BigInt> = (0..rlen)
        .map(|k| BigInt::from(extract(&limbs, k as u64 * w, w)) - &half)
        .collect();
    IntPoly::from_coeffs(coeffs)
}

// Packs the coefficients of the requested sign into w-bit fields of a
// single big integer. Fields never overlap so limbs are combined by OR.
fn pack(coeffs: &[BigInt], w: u64, sign: Sign) -> BigUint {
    let total = w * coeffs.len() as u64;
    let mut limbs = vec![0u64; (total / 64) as usize + 2];
    for (i, c) in coeffs.iter().enumerate() {
        if c.sign() != sign {
            continue;
        }
        let bitpos = w * i as u64;
        let word = (bitpos / 64) as usize;
        let off = (bitpos % 64) as u32;
        for (j, limb) in c.magnitude().iter_u64_digits().enumerate() {
            if off == 0 {
                limbs[word + j] |= limb;
            } else {
                limbs[word + j] |= limb << off;
                limbs[word + j + 1] |= limb >> (64 - off);
            }
        }
    }
    biguint_from_u64(&limbs)
}

// 2^(w-1) * (1 + 2^w + 2^2w + ... ), one bit per field.
fn offset(rlen: usize, w: u64) -> BigUint {
    let total = w * rlen as u64;
    let mut limbs = vec![0u64; (total / 64) as usize + 2];
    for k in 0..rlen {
        let bit = w * k as u64 + w - 1;
        limbs[(bit / 64) as usize] |= 1u64 << (bit % 64);
    }
    biguint_from_u64(&limbs)
}

// The w bits starting at bitpos, as a big integer.
fn extract(limbs: &[u64], bitpos: u64, w: u64) -> BigUint {
    let lo = (bitpos / 64) as usize;
    let hi = (((bitpos + w + 63) / 64) as usize).min(limbs.len());
    if lo >= hi {
        return BigUint::zero();
    }
    let window = biguint_from_u64(&limbs[lo..hi]) >> (bitpos - 64 * lo as u64) as usize;
    let mask = (BigUint::one() << w) - BigUint::one();
    window & mask
}

fn biguint_from_u64(limbs: &[u64]) -> BigUint {
    BigUint::new(
        limbs
            .iter()
            .flat_map(|&x| [x as u32, (x >> 32) as u32])
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_poly(len: usize, bits: u32, rng: &mut impl Rng) -> IntPoly {
        let coeffs: Vec<BigInt> = (0..len)
            .map(|_| {
                let words = (bits as usize + 63) / 64;
                let mag: Vec<u64> = (0..words).map(|_| rng.gen()).collect();
                let mut c = BigInt::from(biguint_from_u64(&mag));
                c &= (BigInt::one() << bits) - BigInt::one();
                if rng.gen() {
                    -c
                } else {
                    c
                }
            })
            .collect();
        IntPoly::from_coeffs(coeffs)
    }

    #[test]
    fn test_container() {
        let f = IntPoly::from_i64s(&[1, -2, 0, 3, 0, 0]);
        assert_eq!(f.len(), 4);
        assert_eq!(f.degree(), 3);
        assert_eq!(f.coeff(1), BigInt::from(-2));
        assert_eq!(f.coeff(10), BigInt::zero());
        assert!(f.sub(&f).is_zero());
        assert!(f.add(&f.neg()).is_zero());
        assert_eq!(f.scalar_mul(&BigInt::from(-1)), f.neg());
        assert!(f.scalar_mul(&BigInt::zero()).is_zero());
        assert_eq!(IntPoly::from_i64s(&[0, 0]).max_bits(), 0);
        assert_eq!(IntPoly::from_i64s(&[5, -9]).max_bits(), 4);
    }

    #[test]
    fn test_mul_concrete() {
        // (1 - x)(1 + x) = 1 - x^2
        let a = IntPoly::from_i64s(&[1, -1]);
        let b = IntPoly::from_i64s(&[1, 1]);
        let want = IntPoly::from_i64s(&[1, 0, -1]);
        assert_eq!(mul_classical(&a, &b), want);
        assert_eq!(mul_karatsuba(&a, &b), want);
        assert_eq!(mul_kronecker(&a, &b), want);
        assert!(mul(&a, &IntPoly::zero()).is_zero());
    }

    #[test]
    fn test_mul_agreement() {
        let mut rng = rand::thread_rng();
        for bits in [3u32, 16, 63, 200] {
            for (la, lb) in [(1, 1), (5, 7), (13, 13), (20, 50), (60, 60), (120, 3)] {
                let a = random_poly(la, bits, &mut rng);
                let b = random_poly(lb, bits, &mut rng);
                let zc = mul_classical(&a, &b);
                assert_eq!(mul_karatsuba(&a, &b), zc, "karatsuba {la}x{lb} @{bits}");
                assert_eq!(mul_kronecker(&a, &b), zc, "kronecker {la}x{lb} @{bits}");
                assert_eq!(mul(&a, &b), zc, "dispatch {la}x{lb} @{bits}");
            }
        }
    }

    #[test]
    fn test_mul_degree_law() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let mut a = random_poly(rng.gen_range(1..40), 40, &mut rng);
            let mut b = random_poly(rng.gen_range(1..40), 40, &mut rng);
            // Force nonzero leads so degrees add exactly.
            if a.is_zero() {
                a = IntPoly::one();
            }
            if b.is_zero() {
                b = IntPoly::one();
            }
            assert_eq!(mul(&a, &b).degree(), a.degree() + b.degree());
        }
    }

    #[test]
    fn test_kronecker_extreme_signs() {
        // All-negative times all-positive, and alternating signs, at
        // widths around the word boundary.
        for bits in [62u32, 64, 65, 127, 129] {
            let big = (BigInt::one() << bits) - BigInt::one();
            let a = IntPoly::from_coeffs(vec![-big.clone(); 17]);
            let b = IntPoly::from_coeffs(
                (0..23)
                    .map(|i| if i % 2 == 0 { big.clone() } else { -big.clone() })
                    .collect::<Vec<_>>(),
            );
            assert_eq!(mul_kronecker(&a, &b), mul_classical(&a, &b), "bits={bits}");
        }
    }
}
