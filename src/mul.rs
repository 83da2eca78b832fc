// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Polynomial multiplication over Z/pZ.
//!
//! Three strategies compute the same product and are selected by operand
//! length and modulus width (see [`crate::params::mul_algorithm`]):
//!
//! - classical convolution, with coefficient reduction either after every
//!   multiply-accumulate or delayed to the end of each output column when
//!   the accumulator provably cannot overflow;
//! - Karatsuba recursion on coefficient slices with an explicit scratch
//!   buffer;
//! - Kronecker substitution: coefficients are packed into disjoint bit
//!   fields of one big integer, multiplied once there, and unpacked with a
//!   reduction per field.
//!
//! Truncated variants compute only the low coefficients of the product;
//! Newton iteration in the division engine depends on them.

use num_bigint::BigUint;

use crate::arith::ZmodP;
use crate::params::{self, MulAlgorithm};
use crate::poly::{slice_add, slice_sub, ZmodPoly};

/// Product of two polynomials, strategy chosen by size.
pub fn mul(a: &ZmodPoly, b: &ZmodPoly) -> ZmodPoly {
    if a.is_zero() || b.is_zero() {
        return ZmodPoly::zero(a.ctx());
    }
    if a.len() == 1 {
        return b.scalar_mul(a.coeff(0));
    }
    if b.len() == 1 {
        return a.scalar_mul(b.coeff(0));
    }
    let (lmin, lmax) = (a.len().min(b.len()), a.len().max(b.len()));
    match params::mul_algorithm(lmin, lmax, a.ctx().bits()) {
        MulAlgorithm::Classical => mul_classical(a, b),
        MulAlgorithm::Karatsuba => mul_karatsuba(a, b),
        MulAlgorithm::Kronecker => mul_ks(a, b),
    }
}

/// Square of a polynomial.
pub fn sqr(a: &ZmodPoly) -> ZmodPoly {
    mul(a, a)
}

/// Low `n` coefficients of `a*b`.
pub fn mul_trunc(a: &ZmodPoly, b: &ZmodPoly, n: usize) -> ZmodPoly {
    if n == 0 || a.is_zero() || b.is_zero() {
        return ZmodPoly::zero(a.ctx());
    }
    if n >= a.len() + b.len() - 1 {
        return mul(a, b);
    }
    let (lmin, lmax) = (a.len().min(b.len()), a.len().max(b.len()));
    match params::mul_algorithm(lmin, lmax, a.ctx().bits()) {
        MulAlgorithm::Classical => mul_classical_trunc(a, b, n),
        MulAlgorithm::Kronecker => mul_ks_trunc(a, b, n),
        MulAlgorithm::Karatsuba => {
            // No short-circuit worth having: truncate the full product.
            let mut z = mul_karatsuba(a, b);
            z.truncate(n);
            z
        }
    }
}

/// Classical O(n*m) convolution.
pub fn mul_classical(a: &ZmodPoly, b: &ZmodPoly) -> ZmodPoly {
    mul_classical_trunc(a, b, usize::MAX)
}

/// Classical convolution of the low `n` output coefficients only.
pub fn mul_classical_trunc(a: &ZmodPoly, b: &ZmodPoly, n: usize) -> ZmodPoly {
    if a.is_zero() || b.is_zero() || n == 0 {
        return ZmodPoly::zero(a.ctx());
    }
    let zp = a.ctx();
    let outlen = n.min(a.len() + b.len() - 1);
    let mut z = vec![0; outlen];
    if delayed_reduction_ok(&zp, a.len().min(b.len())) {
        mul_basic_delayed(&zp, &mut z, a.coeffs(), b.coeffs());
    } else {
        mul_basic_reduced(&zp, &mut z, a.coeffs(), b.coeffs());
    }
    ZmodPoly::from_raw(zp, z)
}

// The delayed variant accumulates up to min(n, m) unreduced double-word
// products per output column; it is valid while
// 2*bits(p) + bits(min) <= 127, one bit under the u128 accumulator.
pub(crate) fn delayed_reduction_ok(zp: &ZmodP, min_len: usize) -> bool {
    let count_bits = usize::BITS - min_len.leading_zeros();
    2 * zp.bits() + count_bits <= 127
}

// Column-wise convolution, one reduction per output coefficient.
pub(crate) fn mul_basic_delayed(zp: &ZmodP, z: &mut [u64], p: &[u64], q: &[u64]) {
    debug_assert!(delayed_reduction_ok(zp, p.len().min(q.len())));
    for k in 0..z.len() {
        let lo = (k + 1).saturating_sub(q.len());
        let hi = (k + 1).min(p.len());
        let mut acc: u128 = 0;
        for i in lo..hi {
            acc += p[i] as u128 * q[k - i] as u128;
        }
        z[k] = zp.rem_u128(acc);
    }
}

// Row-wise convolution, reducing after every multiply-accumulate.
pub(crate) fn mul_basic_reduced(zp: &ZmodP, z: &mut [u64], p: &[u64], q: &[u64]) {
    z.fill(0);
    for i in 0..p.len() {
        if i >= z.len() {
            break;
        }
        for j in 0..q.len().min(z.len() - i) {
            z[i + j] = zp.add(z[i + j], zp.mul(p[i], q[j]));
        }
    }
}

/// Karatsuba multiplication.
pub fn mul_karatsuba(a: &ZmodPoly, b: &ZmodPoly) -> ZmodPoly {
    if a.is_zero() || b.is_zero() {
        return ZmodPoly::zero(a.ctx());
    }
    let zp = a.ctx();
    let n = a.len().max(b.len());
    let mut z = vec![0; a.len() + b.len()];
    let mut tmp = vec![0; 6 * n + 16];
    karatsuba(&zp, &mut z, a.coeffs(), b.coeffs(), &mut tmp);
    ZmodPoly::from_raw(zp, z)
}

// Writes the product of p and q into z[..p.len()+q.len()] (the last entry
// is a zero pad), using tmp as scratch. Scratch slices are carved off and
// handed down in strict nesting order, so buffer lifetimes follow the
// recursion like a stack.
fn karatsuba(zp: &ZmodP, z: &mut [u64], p: &[u64], q: &[u64], tmp: &mut [u64]) {
    let (plen, qlen) = (p.len(), q.len());
    debug_assert!(plen > 0 && qlen > 0);
    debug_assert!(z.len() >= plen + qlen);
    if plen <= params::KARATSUBA_BASECASE && qlen <= params::KARATSUBA_BASECASE {
        z[..plen + qlen].fill(0);
        for i in 0..plen {
            for j in 0..qlen {
                z[i + j] = zp.add(z[i + j], zp.mul(p[i], q[j]));
            }
        }
        return;
    }
    let half = (plen.max(qlen) + 1) / 2;
    if plen.min(qlen) <= half {
        // Unbalanced: split the longer operand and multiply the shorter
        // against both pieces.
        let (long, short) = if plen >= qlen { (p, q) } else { (q, p) };
        let (lo, hi) = long.split_at(half);
        let slen = short.len();
        karatsuba(zp, &mut z[..half + slen], lo, short, tmp);
        let (t, tmp2) = tmp.split_at_mut(hi.len() + slen);
        karatsuba(zp, t, hi, short, tmp2);
        z[half + slen..long.len() + slen].fill(0);
        slice_add(zp, &mut z[half..long.len() + slen], &t[..hi.len() + slen - 1]);
        return;
    }
    assert!(tmp.len() >= 4 * half);
    let (plo, phi) = p.split_at(half);
    let (qlo, qhi) = q.split_at(half);
    let (tmplo, tmphi) = tmp.split_at_mut(2 * half);
    // Middle term first: plo*qhi + phi*qlo = (plo+phi)*(qlo+qhi)
    // - plo*qlo - phi*qhi. The two sums go in tmphi, their product in
    // tmplo with z as scratch.
    tmphi[..half].copy_from_slice(plo);
    slice_add(zp, &mut tmphi[..phi.len()], phi);
    tmphi[half..2 * half].copy_from_slice(qlo);
    slice_add(zp, &mut tmphi[half..half + qhi.len()], qhi);
    karatsuba(zp, tmplo, &tmphi[..half], &tmphi[half..2 * half], z);
    // Low and high products straight into z; tmphi is free again.
    karatsuba(zp, &mut z[..2 * half], plo, qlo, tmphi);
    karatsuba(zp, &mut z[2 * half..], phi, qhi, tmphi);
    // Subtract low and high from the middle, then add it back shifted.
    let hilen = phi.len() + qhi.len() - 1;
    slice_sub(zp, &mut tmplo[..2 * half], &z[..2 * half]);
    slice_sub(zp, &mut tmplo[..hilen], &z[2 * half..2 * half + hilen]);
    slice_add(zp, &mut z[half..3 * half], &tmplo[..2 * half]);
}

/// Kronecker substitution: the product is computed as one big-integer
/// multiplication of the bit-packed operands.
pub fn mul_ks(a: &ZmodPoly, b: &ZmodPoly) -> ZmodPoly {
    mul_ks_trunc(a, b, usize::MAX)
}

/// Kronecker substitution unpacking only the low `n` coefficients.
pub fn mul_ks_trunc(a: &ZmodPoly, b: &ZmodPoly, n: usize) -> ZmodPoly {
    if a.is_zero() || b.is_zero() || n == 0 {
        return ZmodPoly::zero(a.ctx());
    }
    let zp = a.ctx();
    let bits = ks_field_bits(&zp, a.len().min(b.len()));
    let za = BigUint::new(bit_pack(a.coeffs(), bits));
    let zb = BigUint::new(bit_pack(b.coeffs(), bits));
    let prod = za * zb;
    let outlen = n.min(a.len() + b.len() - 1);
    let z = bit_unpack(&zp, &prod.to_u64_digits(), outlen, bits);
    ZmodPoly::from_raw(zp, z)
}

// Kronecker substitution is only legal while one packed field holds a
// whole product coefficient, a sum of at most min(n, m) double-word
// products.
pub(crate) fn ks_fits(zp: &ZmodP, min_len: usize) -> bool {
    2 * zp.bits() + ceil_log2(min_len) <= 128
}

fn ceil_log2(n: usize) -> u32 {
    usize::BITS - (n - 1).leading_zeros()
}

// Field width 2*bits(p) + ceil(log2(min)): carries never bleed into the
// neighbouring field. Getting this wrong corrupts coefficients silently,
// which is why test_mul_agreement sweeps bit widths.
fn ks_field_bits(zp: &ZmodP, min_len: usize) -> u32 {
    let bits = 2 * zp.bits() + ceil_log2(min_len);
    assert!(bits <= 128, "packed field exceeds two words");
    bits
}

// Packs coefficients into contiguous `bits`-wide fields, least
// significant field first, returned as 32-bit big-integer digits.
fn bit_pack(coeffs: &[u64], bits: u32) -> Vec<u32> {
    let total = coeffs.len() * bits as usize;
    let mut limbs = vec![0u64; (total + 63) / 64];
    let mut bitpos = 0usize;
    for &c in coeffs {
        let (w, o) = (bitpos / 64, (bitpos % 64) as u32);
        limbs[w] |= c << o;
        if o > 0 {
            if let Some(slot) = limbs.get_mut(w + 1) {
                *slot |= c >> (64 - o);
            }
        }
        bitpos += bits as usize;
    }
    limbs
        .iter()
        .flat_map(|&l| [l as u32, (l >> 32) as u32])
        .collect()
}

// Extracts `count` fields of `bits` bits each and reduces them mod p.
fn bit_unpack(zp: &ZmodP, limbs: &[u64], count: usize, bits: u32) -> Vec<u64> {
    let limb = |i: usize| -> u128 { limbs.get(i).copied().unwrap_or(0) as u128 };
    let mut out = Vec::with_capacity(count);
    let mut bitpos = 0usize;
    for _ in 0..count {
        let (w, o) = (bitpos / 64, (bitpos % 64) as u32);
        let mut v: u128 = limb(w) >> o;
        if o > 0 {
            v |= limb(w + 1) << (64 - o);
            v |= limb(w + 2) << (128 - o);
        } else {
            v |= limb(w + 1) << 64;
        }
        if bits < 128 {
            v &= (1u128 << bits) - 1;
        }
        out.push(zp.rem_u128(v));
        bitpos += bits as usize;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // One prime per interesting coefficient width.
    pub(crate) const PRIMES: &[u64] = &[
        5,
        13,
        251,
        65521,
        1048573,
        (1 << 31) - 1,
        2305843009213693951, // 2^61 - 1
        9223372036854775783, // largest 63-bit prime
    ];

    fn poly(p: u64, coeffs: &[u64]) -> ZmodPoly {
        ZmodPoly::from_coeffs(ZmodP::new(p), coeffs.to_vec())
    }

    #[test]
    fn test_mul_scenarios() {
        // 1 + 2x + 3x^2 times 4, mod 5.
        let a = poly(5, &[1, 2, 3]);
        let b = poly(5, &[4]);
        for f in [mul, mul_classical, mul_karatsuba, mul_ks] {
            assert_eq!(f(&a, &b).coeffs(), &[4, 3, 2]);
            assert_eq!(f(&b, &a).coeffs(), &[4, 3, 2]);
        }
        let zero = ZmodPoly::zero(a.ctx());
        assert!(mul(&a, &zero).is_zero());
        assert!(mul(&zero, &a).is_zero());
        assert_eq!(mul(&a, &ZmodPoly::one(a.ctx())), a);
    }

    #[test]
    fn test_degree_law() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for &p in PRIMES {
            let zp = ZmodP::new(p);
            for _ in 0..50 {
                let a = ZmodPoly::random(zp, rng.gen_range(1..80), &mut rng);
                let b = ZmodPoly::random(zp, rng.gen_range(1..80), &mut rng);
                assert_eq!(mul(&a, &b).degree(), a.degree() + b.degree());
            }
        }
    }

    #[test]
    fn test_mul_agreement() {
        // Primary regression: three independent implementations must agree
        // coefficient for coefficient across lengths and bit widths.
        let mut rng = rand::thread_rng();
        for &p in PRIMES {
            let zp = ZmodP::new(p);
            for len in 1..=64usize {
                let a = ZmodPoly::random(zp, len, &mut rng);
                let b = ZmodPoly::random(zp, (len * 2 / 3).max(1), &mut rng);
                let zc = mul_classical(&a, &b);
                let zk = mul_karatsuba(&a, &b);
                assert_eq!(zc, zk, "karatsuba mismatch p={p} len={len}");
                if ks_fits(&zp, b.len()) {
                    assert_eq!(zc, mul_ks(&a, &b), "kronecker mismatch p={p} len={len}");
                }
                assert_eq!(zc, mul(&a, &b));
            }
        }
    }

    #[test]
    fn test_mul_unbalanced() {
        let mut rng = rand::thread_rng();
        for &p in &[13u64, 9223372036854775783] {
            let zp = ZmodP::new(p);
            for (la, lb) in [(200, 3), (3, 200), (150, 40), (64, 65), (1, 100)] {
                let a = ZmodPoly::random(zp, la, &mut rng);
                let b = ZmodPoly::random(zp, lb, &mut rng);
                let zc = mul_classical(&a, &b);
                assert_eq!(zc, mul_karatsuba(&a, &b), "p={p} {la}x{lb}");
                if ks_fits(&zp, la.min(lb)) {
                    assert_eq!(zc, mul_ks(&a, &b), "p={p} {la}x{lb}");
                }
            }
        }
    }

    #[test]
    fn test_mul_trunc_agreement() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for &p in PRIMES {
            let zp = ZmodP::new(p);
            for _ in 0..30 {
                let a = ZmodPoly::random(zp, rng.gen_range(1..120), &mut rng);
                let b = ZmodPoly::random(zp, rng.gen_range(1..120), &mut rng);
                let n = rng.gen_range(0..a.len() + b.len() + 4);
                let mut full = mul(&a, &b);
                full.truncate(n);
                assert_eq!(mul_trunc(&a, &b, n), full, "p={p} n={n}");
                assert_eq!(mul_classical_trunc(&a, &b, n), full);
                if ks_fits(&zp, a.len().min(b.len())) {
                    assert_eq!(mul_ks_trunc(&a, &b, n), full);
                }
            }
        }
    }

    #[test]
    fn test_reduction_strategies_agree() {
        let mut rng = rand::thread_rng();
        // Small modulus: both accumulation strategies are legal.
        let zp = ZmodP::new(251);
        assert!(delayed_reduction_ok(&zp, 1 << 20));
        for len in [1usize, 7, 33, 100] {
            let a = ZmodPoly::random(zp, len, &mut rng);
            let b = ZmodPoly::random(zp, len + 3, &mut rng);
            let n = a.len() + b.len() - 1;
            let mut z1 = vec![0; n];
            let mut z2 = vec![0; n];
            mul_basic_delayed(&zp, &mut z1, a.coeffs(), b.coeffs());
            mul_basic_reduced(&zp, &mut z2, a.coeffs(), b.coeffs());
            assert_eq!(z1, z2);
        }
        // A 63-bit modulus can never delay reduction.
        let zbig = ZmodP::new(9223372036854775783);
        assert!(!delayed_reduction_ok(&zbig, 2));
    }
}
