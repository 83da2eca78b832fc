// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Polynomial division with remainder over Z/pZ.
//!
//! Three tiers, selected by divisor length:
//!
//! - classical long division, eliminating one leading term per step with
//!   the precomputed inverse of the divisor's leading coefficient;
//! - divide-and-conquer division: a quotient of length k depends only on
//!   the top k coefficients of the dividend and divisor, so the top half
//!   of the quotient is computed recursively from truncated operands and
//!   one fast multiplication rebuilds the dividend for the bottom half;
//! - Newton division: invert the power series of the reversed divisor by
//!   precision doubling, then the reversed quotient is one truncated
//!   multiplication.
//!
//! Division by the zero polynomial is a caller error and aborts.

use crate::params;
use crate::poly::ZmodPoly;
use crate::{mul, ZmodP};

/// Quotient and remainder: `a == q*b + r` with `len(r) < len(b)`.
pub fn divrem(a: &ZmodPoly, b: &ZmodPoly) -> (ZmodPoly, ZmodPoly) {
    assert!(!b.is_zero(), "division by zero polynomial");
    if a.len() < b.len() {
        return (ZmodPoly::zero(a.ctx()), a.clone());
    }
    if b.len() < params::DIV_DC_CUTOFF && a.len() < 2 * params::DIV_DC_CUTOFF {
        divrem_classical(a, b)
    } else if b.len() < params::DIV_NEWTON_CUTOFF {
        divrem_divconquer(a, b)
    } else {
        divrem_newton(a, b)
    }
}

/// Quotient only.
pub fn div(a: &ZmodPoly, b: &ZmodPoly) -> ZmodPoly {
    divrem(a, b).0
}

/// Remainder only.
pub fn rem(a: &ZmodPoly, b: &ZmodPoly) -> ZmodPoly {
    divrem(a, b).1
}

fn lead_inv(zp: &ZmodP, b: &ZmodPoly) -> u64 {
    zp.inv(b.lead())
        .expect("leading coefficient of divisor is not a unit: modulus is not prime")
}

/// Classical long division, O(len(a) * len(b)).
pub fn divrem_classical(a: &ZmodPoly, b: &ZmodPoly) -> (ZmodPoly, ZmodPoly) {
    assert!(!b.is_zero(), "division by zero polynomial");
    let zp = a.ctx();
    if a.len() < b.len() {
        return (ZmodPoly::zero(zp), a.clone());
    }
    let linv = lead_inv(&zp, b);
    let blen = b.len();
    let qlen = a.len() - blen + 1;
    let mut r = a.coeffs().to_vec();
    let mut q = vec![0; qlen];
    let bc = b.coeffs();
    for k in (0..qlen).rev() {
        let c = zp.mul(r[k + blen - 1], linv);
        q[k] = c;
        if c != 0 {
            for j in 0..blen - 1 {
                r[k + j] = zp.sub(r[k + j], zp.mul(c, bc[j]));
            }
        }
        r[k + blen - 1] = 0;
    }
    r.truncate(blen - 1);
    (ZmodPoly::from_raw(zp, q), ZmodPoly::from_raw(zp, r))
}

/// Divide-and-conquer division, O(M(n) log n).
pub fn divrem_divconquer(a: &ZmodPoly, b: &ZmodPoly) -> (ZmodPoly, ZmodPoly) {
    assert!(!b.is_zero(), "division by zero polynomial");
    if a.len() < b.len() {
        return (ZmodPoly::zero(a.ctx()), a.clone());
    }
    divconquer(a, b)
}

fn divconquer(a: &ZmodPoly, b: &ZmodPoly) -> (ZmodPoly, ZmodPoly) {
    if a.len() < b.len() {
        return (ZmodPoly::zero(a.ctx()), a.clone());
    }
    let k = a.len() - b.len() + 1;
    if k < params::DIV_DC_CUTOFF || b.len() < params::DIV_DC_CUTOFF {
        return divrem_classical(a, b);
    }
    let k2 = k / 2;
    let k1 = k - k2;
    // Top k1 quotient coefficients from the top k1 coefficients of both
    // operands (reversal argument: rev(q) = rev(a) / rev(b) mod x^k).
    let b1len = k1.min(b.len());
    let a1len = k1 + b1len - 1;
    let a1 = a.view_shifted(a.len() - a1len).to_owned();
    let b1 = b.view_shifted(b.len() - b1len).to_owned();
    let (q1, _) = divconquer(&a1, &b1);
    debug_assert_eq!(q1.len(), k1);
    // Cancel the top: what is left has quotient q0 of length <= k2.
    let a2 = a.sub(&mul::mul(&q1, b).shift_left(k2));
    debug_assert!(a2.len() <= b.len() + k2 - 1);
    let (q0, r) = divconquer(&a2, b);
    (q1.shift_left(k2).add(&q0), r)
}

/// Power series inverse of `b` modulo x^n, by Newton doubling: one
/// truncated multiplication per doubled precision. The constant term of
/// `b` must be nonzero.
pub fn inv_series(b: &ZmodPoly, n: usize) -> ZmodPoly {
    assert!(n > 0, "precision must be positive");
    let zp = b.ctx();
    let c0inv = zp
        .inv(b.coeff(0))
        .expect("series inversion requires an invertible constant term");
    // Classical recurrence up to the base precision.
    let base = n.min(params::INV_SERIES_BASECASE);
    let mut x = vec![0u64; base];
    x[0] = c0inv;
    for i in 1..base {
        let mut acc = 0u64;
        for j in 1..=i.min(b.len().saturating_sub(1)) {
            acc = zp.add(acc, zp.mul(b.coeff(j), x[i - j]));
        }
        x[i] = zp.neg(zp.mul(acc, c0inv));
    }
    let mut x = ZmodPoly::from_raw(zp, x);
    let mut prec = base;
    while prec < n {
        let newprec = (2 * prec).min(n);
        // b*x = 1 + x^prec * e exactly, since x is correct mod x^prec.
        let t = mul::mul_trunc(b, &x, newprec);
        let e = t.shift_right(prec);
        let corr = mul::mul_trunc(&x, &e, newprec - prec);
        x = x.sub(&corr.shift_left(prec));
        prec = newprec;
    }
    x
}

/// Low `n` coefficients of the power series a/b.
pub fn div_series(a: &ZmodPoly, b: &ZmodPoly, n: usize) -> ZmodPoly {
    mul::mul_trunc(a, &inv_series(b, n), n)
}

/// Newton division: series inversion of the reversed divisor.
pub fn divrem_newton(a: &ZmodPoly, b: &ZmodPoly) -> (ZmodPoly, ZmodPoly) {
    assert!(!b.is_zero(), "division by zero polynomial");
    if a.len() < b.len() {
        return (ZmodPoly::zero(a.ctx()), a.clone());
    }
    let k = a.len() - b.len() + 1;
    let mut arev = a.reverse(a.len());
    arev.truncate(k);
    let mut brev = b.reverse(b.len());
    brev.truncate(k);
    let qrev = div_series(&arev, &brev, k);
    let q = qrev.reverse(k);
    // Only the low len(b)-1 coefficients of b*q matter for the remainder.
    let rlen = b.len() - 1;
    let r = a
        .view_truncated(rlen)
        .to_owned()
        .sub(&mul::mul_trunc(b, &q, rlen));
    (q, r)
}

/// Product reduced modulo `f`.
pub fn mulmod(a: &ZmodPoly, b: &ZmodPoly, f: &ZmodPoly) -> ZmodPoly {
    rem(&mul::mul(a, b), f)
}

/// `a^e mod f` by binary exponentiation.
pub fn powmod(a: &ZmodPoly, e: u64, f: &ZmodPoly) -> ZmodPoly {
    assert!(!f.is_zero(), "zero modulus polynomial");
    let mut res = rem(&ZmodPoly::one(a.ctx()), f);
    let mut sq = rem(a, f);
    let mut e = e;
    while e > 0 {
        if e & 1 == 1 {
            res = mulmod(&res, &sq, f);
        }
        e >>= 1;
        if e > 0 {
            sq = mulmod(&sq, &sq, f);
        }
    }
    res
}
