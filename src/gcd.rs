// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Polynomial GCD over Z/pZ.
//!
//! Short inputs run the plain Euclidean remainder sequence. Long inputs
//! use the half-GCD: the remainder steps that reduce a pair of degree n
//! polynomials to degree n/2 are determined by the top halves of the
//! coefficients alone, so they can be computed recursively on truncated
//! operands and replayed on the full pair as a 2x2 matrix product.
//!
//! The transition matrices are products of elementary steps
//! [[0,1],[1,-q]] and have unit determinant, so a pair transformed by
//! one always keeps its gcd, even when a leading-term cancellation on
//! the full operands breaks the degree bookkeeping of the truncated
//! recursion. Those rare disorders are detected and the affected range
//! is finished iteratively.
//!
//! All returned gcds are monic (zero for the zero pair).

use crate::params;
use crate::poly::ZmodPoly;
use crate::{div, mul, ZmodP};

/// Monic gcd, dispatching on the size of the smaller operand.
pub fn gcd(a: &ZmodPoly, b: &ZmodPoly) -> ZmodPoly {
    if a.len().min(b.len()) < params::GCD_HGCD_CUTOFF {
        gcd_euclidean(a, b)
    } else {
        gcd_hgcd(a, b)
    }
}

/// Monic gcd by the classical remainder sequence.
pub fn gcd_euclidean(a: &ZmodPoly, b: &ZmodPoly) -> ZmodPoly {
    let (mut a, mut b) = (a.clone(), b.clone());
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    while !b.is_zero() {
        let r = div::rem(&a, &b);
        a = std::mem::replace(&mut b, r);
    }
    a.make_monic()
}

/// Monic gcd by the half-GCD remainder sequence.
pub fn gcd_hgcd(a: &ZmodPoly, b: &ZmodPoly) -> ZmodPoly {
    let (mut a, mut b) = (a.clone(), b.clone());
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    if !b.is_zero() && a.len() == b.len() {
        let r = div::rem(&a, &b);
        a = std::mem::replace(&mut b, r);
    }
    loop {
        if b.is_zero() {
            return a.make_monic();
        }
        if b.len() < params::GCD_HGCD_CUTOFF {
            return gcd_euclidean(&a, &b);
        }
        let (_, c, d) = hgcd(&a, &b);
        if d.len() < c.len() && d.len() < b.len() {
            a = c;
            b = d;
        } else {
            // No usable reduction, take one plain remainder step.
            let r = div::rem(&a, &b);
            a = std::mem::replace(&mut b, r);
        }
    }
}

// 2x2 matrix of polynomials accumulating elementary remainder steps.
struct Mat22 {
    m: [[ZmodPoly; 2]; 2],
}

impl Mat22 {
    fn identity(zp: ZmodP) -> Self {
        Mat22 {
            m: [
                [ZmodPoly::one(zp), ZmodPoly::zero(zp)],
                [ZmodPoly::zero(zp), ZmodPoly::one(zp)],
            ],
        }
    }

    // Left-multiplies by the step matrix [[0,1],[1,-q]], the action of
    // one division step (a, b) -> (b, a - q*b) on the pair.
    fn step(&mut self, q: &ZmodPoly) {
        let r0 = [self.m[1][0].clone(), self.m[1][1].clone()];
        let r1 = [
            self.m[0][0].sub(&mul::mul(q, &self.m[1][0])),
            self.m[0][1].sub(&mul::mul(q, &self.m[1][1])),
        ];
        self.m = [r0, r1];
    }

    fn mul(&self, rhs: &Mat22) -> Mat22 {
        let ent = |i: usize, j: usize| {
            mul::mul(&self.m[i][0], &rhs.m[0][j]).add(&mul::mul(&self.m[i][1], &rhs.m[1][j]))
        };
        Mat22 {
            m: [[ent(0, 0), ent(0, 1)], [ent(1, 0), ent(1, 1)]],
        }
    }

    fn apply(&self, a: &ZmodPoly, b: &ZmodPoly) -> (ZmodPoly, ZmodPoly) {
        (
            mul::mul(&self.m[0][0], a).add(&mul::mul(&self.m[0][1], b)),
            mul::mul(&self.m[1][0], a).add(&mul::mul(&self.m[1][1], b)),
        )
    }
}

// Reduces (a, b) with deg a > deg b until deg b < m, returning the
// accumulated matrix M with (c, d) = M * (a, b). The recursive version
// guarantees deg c >= m on the fast path.
fn hgcd(a: &ZmodPoly, b: &ZmodPoly) -> (Mat22, ZmodPoly, ZmodPoly) {
    debug_assert!(a.len() > b.len());
    let m = (a.degree() as usize + 1) / 2;
    if b.is_zero() || (b.degree() as usize) < m {
        return (Mat22::identity(a.ctx()), a.clone(), b.clone());
    }
    if (a.degree() as usize) < params::HGCD_BASECASE {
        return hgcd_iter(Mat22::identity(a.ctx()), a.clone(), b.clone(), m);
    }
    // First half: the steps bringing the pair down to degree ~m depend
    // only on the coefficients above x^m.
    let (r1, _, _) = hgcd(&a.shift_right(m), &b.shift_right(m));
    let (c, d) = r1.apply(a, b);
    if d.len() >= c.len() {
        return hgcd_iter(r1, c, d, m);
    }
    if d.is_zero() || (d.degree() as usize) < m {
        return (r1, c, d);
    }
    // One full-size step, then recurse on the part above x^k.
    let (q, r) = div::divrem(&c, &d);
    let mut mat = r1;
    mat.step(&q);
    let (c, d) = (d, r);
    if d.is_zero() || (d.degree() as usize) < m {
        return (mat, c, d);
    }
    let k = 2 * m - c.degree() as usize;
    let (r2, _, _) = hgcd(&c.shift_right(k), &d.shift_right(k));
    let (c, d) = r2.apply(&c, &d);
    let mat = r2.mul(&mat);
    if d.len() >= c.len() {
        return hgcd_iter(mat, c, d, m);
    }
    (mat, c, d)
}

// Iterative tail: plain remainder steps with matrix bookkeeping. Also
// the recovery path when the recursion detects a degree disorder; a
// dividend shorter than the divisor then yields a zero quotient whose
// step matrix is exactly the row swap.
fn hgcd_iter(
    mut mat: Mat22,
    mut c: ZmodPoly,
    mut d: ZmodPoly,
    m: usize,
) -> (Mat22, ZmodPoly, ZmodPoly) {
    while !d.is_zero() && d.degree() as usize >= m {
        let (q, r) = div::divrem(&c, &d);
        mat.step(&q);
        c = std::mem::replace(&mut d, r);
    }
    (mat, c, d)
}

/// Extended gcd: returns monic `g` and cofactors with `g = s*a + t*b`.
/// The zero pair yields three zero polynomials.
pub fn xgcd(a: &ZmodPoly, b: &ZmodPoly) -> (ZmodPoly, ZmodPoly, ZmodPoly) {
    let zp = a.ctx();
    let (mut r0, mut r1) = (a.clone(), b.clone());
    let (mut s0, mut s1) = (ZmodPoly::one(zp), ZmodPoly::zero(zp));
    let (mut t0, mut t1) = (ZmodPoly::zero(zp), ZmodPoly::one(zp));
    while !r1.is_zero() {
        let (q, r) = div::divrem(&r0, &r1);
        r0 = std::mem::replace(&mut r1, r);
        let ns = s0.sub(&mul::mul(&q, &s1));
        s0 = std::mem::replace(&mut s1, ns);
        let nt = t0.sub(&mul::mul(&q, &t1));
        t0 = std::mem::replace(&mut t1, nt);
    }
    if r0.is_zero() {
        return (r0, ZmodPoly::zero(zp), ZmodPoly::zero(zp));
    }
    let linv = zp
        .inv(r0.lead())
        .expect("leading coefficient is not a unit: modulus is not prime");
    (
        r0.scalar_mul(linv),
        s0.scalar_mul(linv),
        t0.scalar_mul(linv),
    )
}

/// Inverse of `a` modulo `f`, reduced below `f`. When `a` and `f` are
/// not coprime no inverse exists and the monic gcd is returned as the
/// error value, so callers can split `f` on it.
pub fn gcd_invert(a: &ZmodPoly, f: &ZmodPoly) -> Result<ZmodPoly, ZmodPoly> {
    assert!(f.len() >= 2, "modulus polynomial must have degree >= 1");
    let a = div::rem(a, f);
    if a.is_zero() {
        return Err(f.make_monic());
    }
    let (g, s, _) = xgcd(&a, f);
    if g.is_one() {
        Ok(s)
    } else {
        Err(g)
    }
}

/// Resultant of `a` and `b`, by the Euclidean remainder sequence with
/// the usual leading-coefficient and sign bookkeeping:
/// res(a, b) = (-1)^(deg a * deg b) * lc(b)^(deg a - deg r) * res(b, r).
pub fn resultant(a: &ZmodPoly, b: &ZmodPoly) -> u64 {
    let zp = a.ctx();
    if a.is_zero() || b.is_zero() {
        return 0;
    }
    let (mut a, mut b) = (a.clone(), b.clone());
    let mut res = 1u64;
    if a.degree() < b.degree() {
        if a.degree() % 2 == 1 && b.degree() % 2 == 1 {
            res = zp.neg(res);
        }
        std::mem::swap(&mut a, &mut b);
    }
    loop {
        if b.degree() == 0 {
            return zp.mul(res, zp.pow(b.coeff(0), a.degree() as u64));
        }
        let r = div::rem(&a, &b);
        if r.is_zero() {
            // A common factor of positive degree.
            return 0;
        }
        res = zp.mul(res, zp.pow(b.lead(), (a.degree() - r.degree()) as u64));
        if a.degree() % 2 == 1 && b.degree() % 2 == 1 {
            res = zp.neg(res);
        }
        a = std::mem::replace(&mut b, r);
    }
}
