// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Dense polynomials over Z/pZ for a word-size prime p.
//!
//! Coefficients are stored least significant first in a `Vec<u64>` whose
//! length is the number of significant coefficients: the last stored
//! coefficient is always nonzero and every coefficient lies in [0, p).
//! The zero polynomial is the empty vector. Every operation that can
//! produce leading zeros renormalizes before returning.

use std::fmt;

use crate::arith::ZmodP;

#[derive(Clone, Debug, Eq)]
pub struct ZmodPoly {
    zp: ZmodP,
    coeffs: Vec<u64>,
}

impl PartialEq for ZmodPoly {
    fn eq(&self, other: &Self) -> bool {
        self.zp.modulus() == other.zp.modulus() && self.coeffs == other.coeffs
    }
}

impl ZmodPoly {
    /// The zero polynomial.
    pub fn zero(zp: ZmodP) -> Self {
        ZmodPoly { zp, coeffs: vec![] }
    }

    /// The constant polynomial 1.
    pub fn one(zp: ZmodP) -> Self {
        ZmodPoly {
            zp,
            coeffs: vec![1],
        }
    }

    /// Builds a polynomial from arbitrary coefficients, reducing each one
    /// and trimming leading zeros.
    pub fn from_coeffs(zp: ZmodP, coeffs: impl Into<Vec<u64>>) -> Self {
        let mut coeffs = coeffs.into();
        for c in coeffs.iter_mut() {
            *c = zp.reduce(*c);
        }
        let mut p = ZmodPoly { zp, coeffs };
        p.normalize();
        p
    }

    // Wraps coefficients already known to be reduced.
    pub(crate) fn from_raw(zp: ZmodP, coeffs: Vec<u64>) -> Self {
        debug_assert!(coeffs.iter().all(|&c| c < zp.modulus()));
        let mut p = ZmodPoly { zp, coeffs };
        p.normalize();
        p
    }

    /// Uniformly random polynomial with exactly `len` coefficients
    /// (nonzero leading coefficient unless `len == 0`).
    pub fn random(zp: ZmodP, len: usize, rng: &mut impl rand::Rng) -> Self {
        let mut coeffs: Vec<u64> = (0..len).map(|_| rng.gen_range(0..zp.modulus())).collect();
        if let Some(last) = coeffs.last_mut() {
            *last = rng.gen_range(1..zp.modulus());
        }
        ZmodPoly { zp, coeffs }
    }

    #[inline]
    pub fn ctx(&self) -> ZmodP {
        self.zp
    }

    #[inline]
    pub fn modulus(&self) -> u64 {
        self.zp.modulus()
    }

    /// Number of significant coefficients (degree + 1, or 0 for zero).
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

    pub fn is_one(&self) -> bool {
        self.coeffs == [1]
    }

    /// Degree, with the usual convention degree(0) = -1.
    #[inline]
    pub fn degree(&self) -> i64 {
        self.coeffs.len() as i64 - 1
    }

    #[inline]
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Coefficient of x^i (zero beyond the significant length).
    #[inline]
    pub fn coeff(&self, i: usize) -> u64 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Leading coefficient, 0 for the zero polynomial.
    #[inline]
    pub fn lead(&self) -> u64 {
        self.coeffs.last().copied().unwrap_or(0)
    }

    /// Sets the coefficient of x^i, growing with zero fill as needed.
    pub fn set_coeff(&mut self, i: usize, c: u64) {
        let c = self.zp.reduce(c);
        if i >= self.coeffs.len() {
            if c == 0 {
                return;
            }
            self.coeffs.resize(i + 1, 0);
        }
        self.coeffs[i] = c;
        self.normalize();
    }

    /// Trims leading zero coefficients. Idempotent; the correctness
    /// linchpin after any destructive operation.
    pub fn normalize(&mut self) {
        while let Some(&0) = self.coeffs.last() {
            self.coeffs.pop();
        }
    }

    /// Keeps only the low `n` coefficients, then normalizes.
    pub fn truncate(&mut self, n: usize) {
        if self.coeffs.len() > n {
            self.coeffs.truncate(n);
            self.normalize();
        }
    }

    /// Reversal of the first `n` coefficients: x^(n-1) * self(1/x).
    pub fn reverse(&self, n: usize) -> Self {
        let coeffs: Vec<u64> = (0..n).map(|i| self.coeff(n - 1 - i)).collect();
        ZmodPoly::from_raw(self.zp, coeffs)
    }

    /// Multiplication by x^k.
    pub fn shift_left(&self, k: usize) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let mut coeffs = vec![0; k + self.coeffs.len()];
        coeffs[k..].copy_from_slice(&self.coeffs);
        ZmodPoly {
            zp: self.zp,
            coeffs,
        }
    }

    /// Integer division by x^k (drops the low k coefficients).
    pub fn shift_right(&self, k: usize) -> Self {
        if k >= self.coeffs.len() {
            return ZmodPoly::zero(self.zp);
        }
        ZmodPoly {
            zp: self.zp,
            coeffs: self.coeffs[k..].to_vec(),
        }
    }

    pub fn add(&self, other: &ZmodPoly) -> ZmodPoly {
        let zp = self.zp;
        let (short, long) = if self.len() <= other.len() {
            (&self.coeffs, &other.coeffs)
        } else {
            (&other.coeffs, &self.coeffs)
        };
        let mut coeffs = long.clone();
        slice_add(&zp, &mut coeffs[..short.len()], short);
        ZmodPoly::from_raw(zp, coeffs)
    }

    pub fn sub(&self, other: &ZmodPoly) -> ZmodPoly {
        let zp = self.zp;
        let n = self.len().max(other.len());
        let coeffs: Vec<u64> = (0..n)
            .map(|i| zp.sub(self.coeff(i), other.coeff(i)))
            .collect();
        ZmodPoly::from_raw(zp, coeffs)
    }

    pub fn neg(&self) -> ZmodPoly {
        let zp = self.zp;
        ZmodPoly {
            zp,
            coeffs: self.coeffs.iter().map(|&c| zp.neg(c)).collect(),
        }
    }

    /// Multiplication by a scalar (which is reduced first).
    pub fn scalar_mul(&self, c: u64) -> ZmodPoly {
        let zp = self.zp;
        let c = zp.reduce(c);
        if c == 0 {
            return ZmodPoly::zero(zp);
        }
        ZmodPoly {
            zp,
            coeffs: self.coeffs.iter().map(|&a| zp.mul(a, c)).collect(),
        }
    }

    /// Scales so the leading coefficient is 1. Zero stays zero.
    pub fn make_monic(&self) -> ZmodPoly {
        if self.is_zero() {
            return self.clone();
        }
        let lead = self.lead();
        if lead == 1 {
            return self.clone();
        }
        let inv = self
            .zp
            .inv(lead)
            .expect("leading coefficient is not a unit: modulus is not prime");
        self.scalar_mul(inv)
    }

    /// Formal derivative.
    pub fn derivative(&self) -> ZmodPoly {
        if self.len() <= 1 {
            return ZmodPoly::zero(self.zp);
        }
        let zp = self.zp;
        let coeffs: Vec<u64> = (1..self.coeffs.len())
            .map(|i| zp.mul(self.coeffs[i], zp.reduce(i as u64)))
            .collect();
        ZmodPoly::from_raw(zp, coeffs)
    }

    /// Evaluation by Horner's rule.
    pub fn evaluate(&self, x: u64) -> u64 {
        let zp = self.zp;
        let x = zp.reduce(x);
        let mut v = 0;
        for &c in self.coeffs.iter().rev() {
            v = zp.add(zp.mul(v, x), c);
        }
        v
    }

    /// Read-only view of the whole polynomial.
    pub fn view(&self) -> PolyView<'_> {
        PolyView {
            zp: self.zp,
            coeffs: &self.coeffs,
        }
    }

    /// View of self divided by x^n: a borrow of the high coefficients,
    /// no copy.
    pub fn view_shifted(&self, n: usize) -> PolyView<'_> {
        let n = n.min(self.coeffs.len());
        PolyView {
            zp: self.zp,
            coeffs: &self.coeffs[n..],
        }
    }

    /// View of the low `n` coefficients, renormalized without mutating
    /// the owner.
    pub fn view_truncated(&self, n: usize) -> PolyView<'_> {
        let n = n.min(self.coeffs.len());
        PolyView {
            zp: self.zp,
            coeffs: trim(&self.coeffs[..n]),
        }
    }

    /// Parses the `"<length>  c0 c1 ..."` serialization format. The
    /// modulus is not part of the format and must be supplied.
    pub fn from_str_ctx(zp: ZmodP, s: &str) -> Result<Self, ParsePolyError> {
        let mut tokens = s.split_whitespace();
        let len: usize = tokens
            .next()
            .ok_or(ParsePolyError)?
            .parse()
            .map_err(|_| ParsePolyError)?;
        let mut coeffs = Vec::with_capacity(len);
        for _ in 0..len {
            let c: u64 = tokens
                .next()
                .ok_or(ParsePolyError)?
                .parse()
                .map_err(|_| ParsePolyError)?;
            coeffs.push(c);
        }
        if tokens.next().is_some() {
            return Err(ParsePolyError);
        }
        Ok(ZmodPoly::from_coeffs(zp, coeffs))
    }
}

impl fmt::Display for ZmodPoly {
    /// `"<length>  c0 c1 ..."` with an explicit length prefix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coeffs.len())?;
        if !self.coeffs.is_empty() {
            write!(f, " ")?;
            for c in &self.coeffs {
                write!(f, " {c}")?;
            }
        }
        Ok(())
    }
}

/// A borrowed window into a polynomial: the low or high part of an owner
/// without copying. Read-only; the borrow checker pins its lifetime to the
/// owner so it can never observe a resized or freed buffer.
#[derive(Clone, Copy, Debug)]
pub struct PolyView<'a> {
    zp: ZmodP,
    coeffs: &'a [u64],
}

impl<'a> PolyView<'a> {
    #[inline]
    pub fn ctx(&self) -> ZmodP {
        self.zp
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
    pub fn coeffs(&self) -> &'a [u64] {
        self.coeffs
    }

    #[inline]
    pub fn coeff(&self, i: usize) -> u64 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    pub fn to_owned(&self) -> ZmodPoly {
        ZmodPoly {
            zp: self.zp,
            coeffs: self.coeffs.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePolyError;

impl fmt::Display for ParsePolyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed polynomial string")
    }
}

impl std::error::Error for ParsePolyError {}

// Slice-level helpers shared by the engines.

pub(crate) fn slice_add(zp: &ZmodP, z: &mut [u64], x: &[u64]) {
    assert!(z.len() >= x.len());
    for i in 0..x.len() {
        z[i] = zp.add(z[i], x[i]);
    }
}

pub(crate) fn slice_sub(zp: &ZmodP, z: &mut [u64], x: &[u64]) {
    assert!(z.len() >= x.len());
    for i in 0..x.len() {
        z[i] = zp.sub(z[i], x[i]);
    }
}

// Longest prefix without trailing zeros.
pub(crate) fn trim(c: &[u64]) -> &[u64] {
    let mut n = c.len();
    while n > 0 && c[n - 1] == 0 {
        n -= 1;
    }
    &c[..n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(p: u64, coeffs: &[u64]) -> ZmodPoly {
        ZmodPoly::from_coeffs(ZmodP::new(p), coeffs.to_vec())
    }

    #[test]
    fn test_normalize() {
        let zp = ZmodP::new(7);
        let mut f = ZmodPoly::from_coeffs(zp, vec![1, 2, 0, 0]);
        assert_eq!(f.len(), 2);
        // Idempotent.
        f.normalize();
        assert_eq!(f.coeffs(), &[1, 2]);
        // Coefficients congruent to 0 also trim.
        let g = ZmodPoly::from_coeffs(zp, vec![3, 14]);
        assert_eq!(g.coeffs(), &[3]);
        assert_eq!(g.degree(), 0);
        let z = ZmodPoly::from_coeffs(zp, vec![7, 14, 21]);
        assert!(z.is_zero());
        assert_eq!(z.degree(), -1);
    }

    #[test]
    fn test_truncate() {
        let mut f = poly(7, &[1, 2, 3, 4, 5]);
        f.truncate(10);
        assert_eq!(f.len(), 5);
        f.truncate(3);
        assert_eq!(f.coeffs(), &[1, 2, 3]);
        let mut g = poly(7, &[1, 7, 7, 4]);
        g.truncate(3);
        // Truncation exposes leading zeros that must trim.
        assert_eq!(g.coeffs(), &[1]);
    }

    #[test]
    fn test_add_sub_neg() {
        let f = poly(7, &[1, 2, 3]);
        let g = poly(7, &[6, 5, 4, 1]);
        assert_eq!(f.add(&g).coeffs(), &[0, 0, 0, 1]);
        assert_eq!(f.sub(&f), ZmodPoly::zero(f.ctx()));
        assert_eq!(f.add(&f.neg()), ZmodPoly::zero(f.ctx()));
        assert_eq!(g.sub(&f).coeffs(), &[5, 3, 1, 1]);
        // Cancelling leading terms renormalize.
        let h = poly(7, &[0, 0, 3]);
        let k = poly(7, &[1, 0, 4]);
        assert_eq!(h.add(&k).coeffs(), &[1]);
    }

    #[test]
    fn test_shifts_reverse() {
        let f = poly(5, &[1, 2, 3]);
        assert_eq!(f.shift_left(2).coeffs(), &[0, 0, 1, 2, 3]);
        assert_eq!(f.shift_left(2).shift_right(2), f);
        assert_eq!(f.shift_right(5), ZmodPoly::zero(f.ctx()));
        assert_eq!(f.reverse(3).coeffs(), &[3, 2, 1]);
        // Reversal over a longer window pads with leading zeros of 1/x.
        assert_eq!(f.reverse(5).coeffs(), &[0, 0, 3, 2, 1]);
        assert_eq!(ZmodPoly::zero(f.ctx()).shift_left(3).len(), 0);
    }

    #[test]
    fn test_monic_derivative_eval() {
        let f = poly(7, &[1, 2, 3]);
        let m = f.make_monic();
        assert_eq!(m.lead(), 1);
        assert_eq!(m.scalar_mul(3), f);
        assert_eq!(f.derivative().coeffs(), &[2, 6]);
        // x^7 + x over GF(7) has zero derivative.
        let mut frob = ZmodPoly::zero(f.ctx());
        frob.set_coeff(7, 1);
        frob.set_coeff(1, 1);
        assert!(frob.derivative().is_zero());
        assert_eq!(f.evaluate(0), 1);
        assert_eq!(f.evaluate(2), (1 + 4 + 12) % 7);
    }

    #[test]
    fn test_set_coeff() {
        let zp = ZmodP::new(11);
        let mut f = ZmodPoly::zero(zp);
        f.set_coeff(3, 12);
        assert_eq!(f.coeffs(), &[0, 0, 0, 1]);
        f.set_coeff(3, 0);
        assert!(f.is_zero());
        // Setting zero beyond the end is a no-op.
        f.set_coeff(10, 22);
        assert!(f.is_zero());
    }

    #[test]
    fn test_views() {
        let f = poly(7, &[1, 2, 0, 3]);
        assert_eq!(f.view().len(), 4);
        assert_eq!(f.view_shifted(2).coeffs(), &[0, 3]);
        assert_eq!(f.view_shifted(9).len(), 0);
        // Truncated view renormalizes without touching the owner.
        let v = f.view_truncated(3);
        assert_eq!(v.coeffs(), &[1, 2]);
        assert_eq!(f.len(), 4);
        assert_eq!(v.to_owned(), poly(7, &[1, 2]));
        assert!(f.view_truncated(0).is_zero());
    }

    #[test]
    fn test_string_roundtrip() {
        let zp = ZmodP::new(101);
        for coeffs in [vec![], vec![5], vec![0, 0, 7], vec![1, 2, 3, 99]] {
            let f = ZmodPoly::from_coeffs(zp, coeffs);
            let s = f.to_string();
            let g = ZmodPoly::from_str_ctx(zp, &s).unwrap();
            assert_eq!(f, g, "roundtrip of {s:?}");
        }
        assert_eq!(poly(101, &[1, 2, 3]).to_string(), "3  1 2 3");
        assert_eq!(ZmodPoly::zero(zp).to_string(), "0");
        assert!(ZmodPoly::from_str_ctx(zp, "2  1").is_err());
        assert!(ZmodPoly::from_str_ctx(zp, "1  2 3").is_err());
        assert!(ZmodPoly::from_str_ctx(zp, "").is_err());
    }
}
