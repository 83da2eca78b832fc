// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Factorization of polynomials over Z/pZ.
//!
//! The pipeline is square-free decomposition followed by Berlekamp's
//! algorithm on each square-free part. Square-free decomposition in
//! characteristic p needs the extra branch where the derivative
//! vanishes: such a polynomial is g(x^p) = g(x)^p and its p-th root is
//! a plain coefficient move. Berlekamp finds the dimension of the
//! Frobenius fixed subalgebra (the number of irreducible factors) by
//! Gaussian elimination, then splits with gcds against random
//! subalgebra elements raised to the power (p-1)/2.

use std::fmt;

use rand::Rng;

use crate::poly::ZmodPoly;
use crate::{div, gcd, mul, ZmodP};

/// A list of monic factors with multiplicities.
#[derive(Clone, Debug, PartialEq)]
pub struct FactorList {
    factors: Vec<ZmodPoly>,
    exponents: Vec<u64>,
}

impl FactorList {
    pub fn new() -> Self {
        FactorList {
            factors: vec![],
            exponents: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn factor(&self, i: usize) -> &ZmodPoly {
        &self.factors[i]
    }

    pub fn exponent(&self, i: usize) -> u64 {
        self.exponents[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ZmodPoly, u64)> {
        self.factors.iter().zip(self.exponents.iter().copied())
    }

    /// Adds a factor, merging exponents when it is already present.
    pub fn push(&mut self, f: ZmodPoly, e: u64) {
        for (i, g) in self.factors.iter().enumerate() {
            if *g == f {
                self.exponents[i] += e;
                return;
            }
        }
        self.factors.push(f);
        self.exponents.push(e);
    }

    /// Raises the whole list to the power `e`.
    pub fn pow(&mut self, e: u64) {
        for exp in self.exponents.iter_mut() {
            *exp *= e;
        }
    }

    /// Multiplies the list back out.
    pub fn expand(&self, zp: ZmodP) -> ZmodPoly {
        let mut prod = ZmodPoly::one(zp);
        for (f, e) in self.iter() {
            prod = mul::mul(&prod, &poly_pow(f, e));
        }
        prod
    }
}

impl Default for FactorList {
    fn default() -> Self {
        FactorList::new()
    }
}

impl fmt::Display for FactorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        for (i, (fac, e)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " * ")?;
            }
            write!(f, "({fac})^{e}")?;
        }
        Ok(())
    }
}

fn poly_pow(f: &ZmodPoly, mut e: u64) -> ZmodPoly {
    let mut res = ZmodPoly::one(f.ctx());
    let mut sq = f.clone();
    while e > 0 {
        if e & 1 == 1 {
            res = mul::mul(&res, &sq);
        }
        e >>= 1;
        if e > 0 {
            sq = mul::mul(&sq, &sq);
        }
    }
    res
}

// The p-th root of g(x^p): keep every p-th coefficient. Valid because
// the Frobenius map fixes GF(p), so g(x^p) = g(x)^p.
fn pth_root(f: &ZmodPoly) -> ZmodPoly {
    let p = f.modulus() as usize;
    let coeffs: Vec<u64> = f.coeffs().iter().copied().step_by(p).collect();
    ZmodPoly::from_raw(f.ctx(), coeffs)
}

/// Square-free decomposition of the monic part of `f`:
/// `monic(f) = prod factor_i ^ exponent_i` with each factor square-free
/// and the factors pairwise coprime. Constants decompose as the empty
/// list.
pub fn factor_squarefree(f: &ZmodPoly) -> FactorList {
    let zp = f.ctx();
    let p = zp.modulus();
    let mut res = FactorList::new();
    let f = f.make_monic();
    if f.len() <= 1 {
        return res;
    }
    let d = f.derivative();
    if d.is_zero() {
        // All exponents divisible by p.
        let mut inner = factor_squarefree(&pth_root(&f));
        inner.pow(p);
        return inner;
    }
    // Yun's recurrence, adapted to characteristic p: peel off the part
    // with exponent i not divisible by p at step i.
    let mut g = gcd::gcd(&f, &d);
    let mut w = div::div(&f, &g);
    let mut i = 1u64;
    while !w.is_one() {
        let y = gcd::gcd(&w, &g);
        let z = div::div(&w, &y);
        if !z.is_one() {
            res.push(z, i);
        }
        g = div::div(&g, &y);
        w = y;
        i += 1;
    }
    if !g.is_one() {
        // What remains has all exponents divisible by p.
        let mut inner = factor_squarefree(&pth_root(&g));
        inner.pow(p);
        for (fac, e) in inner.iter() {
            res.push(fac.clone(), e);
        }
    }
    res
}

/// Berlekamp factorization of a monic square-free `f` into monic
/// irreducible factors, using the supplied randomness for splitting.
pub fn factor_berlekamp(f: &ZmodPoly, rng: &mut impl Rng) -> Vec<ZmodPoly> {
    let zp = f.ctx();
    let p = zp.modulus();
    assert!(f.lead() == 1, "factor_berlekamp requires a monic input");
    let n = f.degree() as usize;
    if n <= 1 {
        return vec![f.clone()];
    }
    // Frobenius matrix: row i holds x^(i*p) mod f.
    let x = ZmodPoly::from_raw(zp, vec![0, 1]);
    let xp = div::powmod(&x, p, f);
    let mut rows: Vec<ZmodPoly> = Vec::with_capacity(n);
    rows.push(ZmodPoly::one(zp));
    for i in 1..n {
        let prev = &rows[i - 1];
        rows.push(div::mulmod(prev, &xp, f));
    }
    // v is fixed by Frobenius iff v*(Q - I) = 0; solve the transpose.
    let mut mat = vec![vec![0u64; n]; n];
    for (i, row) in rows.iter().enumerate() {
        for j in 0..n {
            mat[j][i] = row.coeff(j);
        }
        mat[i][i] = zp.sub(mat[i][i], 1);
    }
    let basis = nullspace(&zp, mat);
    let r = basis.len();
    debug_assert!(r >= 1);
    if r == 1 {
        return vec![f.clone()];
    }
    // Random subalgebra elements split f with probability >= 1/2 per
    // reducible piece.
    let e = (p - 1) / 2;
    let mut factors = vec![f.clone()];
    while factors.len() < r {
        let mut vcoef = vec![0u64; n];
        for b in &basis {
            let c = rng.gen_range(0..p);
            for (vj, &bj) in vcoef.iter_mut().zip(b.iter()) {
                *vj = zp.add(*vj, zp.mul(c, bj));
            }
        }
        let v = ZmodPoly::from_raw(zp, vcoef);
        let mut next = Vec::with_capacity(factors.len());
        for g in factors {
            if g.len() <= 2 {
                next.push(g);
                continue;
            }
            let vg = div::rem(&v, &g);
            let mut d = gcd::gcd(&vg, &g);
            if d.len() <= 1 || d.len() >= g.len() {
                let w = div::powmod(&vg, e, &g).sub(&ZmodPoly::one(zp));
                d = gcd::gcd(&w, &g);
            }
            if d.len() > 1 && d.len() < g.len() {
                let q = div::div(&g, &d);
                next.push(d);
                next.push(q.make_monic());
            } else {
                next.push(g);
            }
        }
        factors = next;
    }
    factors
}

// Nullspace basis of a square matrix over GF(p), by Gauss-Jordan
// elimination. Vectors are indexed by column.
fn nullspace(zp: &ZmodP, mut a: Vec<Vec<u64>>) -> Vec<Vec<u64>> {
    let n = a.len();
    // pivot[col] = Some(row) when the column has a pivot.
    let mut pivot = vec![None; n];
    let mut rank = 0;
    for col in 0..n {
        let Some(r) = (rank..n).find(|&r| a[r][col] != 0) else {
            continue;
        };
        a.swap(rank, r);
        let inv = zp
            .inv(a[rank][col])
            .expect("pivot is not a unit: modulus is not prime");
        for j in 0..n {
            a[rank][j] = zp.mul(a[rank][j], inv);
        }
        for r2 in 0..n {
            if r2 != rank && a[r2][col] != 0 {
                let c = a[r2][col];
                for j in 0..n {
                    a[r2][j] = zp.sub(a[r2][j], zp.mul(c, a[rank][j]));
                }
            }
        }
        pivot[col] = Some(rank);
        rank += 1;
    }
    let mut basis = vec![];
    for col in 0..n {
        if pivot[col].is_some() {
            continue;
        }
        let mut v = vec![0u64; n];
        v[col] = 1;
        for (pc, pr) in pivot.iter().enumerate() {
            if let Some(row) = pr {
                v[pc] = zp.neg(a[*row][col]);
            }
        }
        basis.push(v);
    }
    basis
}

/// Full factorization: `f = lead * prod factor_i ^ exponent_i` with
/// monic irreducible factors. Returns `(0, empty)` for the zero
/// polynomial and `(c, empty)` for constants.
pub fn factor(f: &ZmodPoly) -> (u64, FactorList) {
    let mut res = FactorList::new();
    if f.is_zero() {
        return (0, res);
    }
    let lead = f.lead();
    let mut rng = rand::thread_rng();
    for (g, e) in factor_squarefree(f).iter() {
        for h in factor_berlekamp(g, &mut rng) {
            res.push(h, e);
        }
    }
    (lead, res)
}
