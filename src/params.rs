// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Algorithm selection thresholds.
//!
//! All size cutoffs used by the multiplication, division and GCD engines
//! live here so they can be retuned from measurements without touching
//! engine logic. The values below were calibrated with the timing sweeps
//! in `benches/poly.rs` on an x86-64 desktop; they are deliberately
//! conservative since the crossovers are shallow.

/// Multiplication strategy chosen by [`mul_algorithm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulAlgorithm {
    Classical,
    Karatsuba,
    Kronecker,
}

// Classical -> Karatsuba crossover, by modulus bit length.
// Wider coefficients make the classical inner loop relatively cheaper
// (fewer delayed reductions are possible), moving the crossover down.
const KARATSUBA_CUTOFF: &[(u32, usize)] = &[(16, 48), (32, 32), (48, 24), (64, 16)];

// Karatsuba -> Kronecker crossover, by modulus bit length. Packing
// overhead is proportional to the field width, so narrow moduli switch
// earlier.
const KRONECKER_CUTOFF: &[(u32, usize)] = &[(16, 64), (32, 96), (48, 128), (64, 160)];

fn lookup(table: &[(u32, usize)], bits: u32) -> usize {
    for &(b, cutoff) in table {
        if bits <= b {
            return cutoff;
        }
    }
    // Tables end at 64 bits.
    unreachable!("modulus wider than a word")
}

/// Picks a multiplication strategy for operand lengths `len1 <= len2`
/// with coefficients modulo a `bits`-bit prime.
pub fn mul_algorithm(len1: usize, len2: usize, bits: u32) -> MulAlgorithm {
    debug_assert!(len1 <= len2);
    if len1 < lookup(KARATSUBA_CUTOFF, bits) {
        return MulAlgorithm::Classical;
    }
    // Kronecker substitution needs every packed field, carries included,
    // to fit in two words.
    let log_len = usize::BITS - (len1 - 1).leading_zeros();
    if len1 >= lookup(KRONECKER_CUTOFF, bits) && 2 * bits + log_len <= 128 {
        return MulAlgorithm::Kronecker;
    }
    MulAlgorithm::Karatsuba
}

/// Karatsuba recursion bottoms out into the classical loop when both
/// operands are at most this long.
pub const KARATSUBA_BASECASE: usize = 16;

/// Below this divisor length, `divrem` uses classical long division.
pub const DIV_DC_CUTOFF: usize = 32;

/// Above this divisor length, `divrem` switches from divide-and-conquer
/// division to Newton iteration.
pub const DIV_NEWTON_CUTOFF: usize = 256;

/// Below this length, Newton series inversion bottoms out into the
/// classical recurrence.
pub const INV_SERIES_BASECASE: usize = 16;

/// Below this length of the smaller operand, `gcd` runs the plain
/// Euclidean remainder sequence.
pub const GCD_HGCD_CUTOFF: usize = 60;

/// Half-GCD recursion bottoms out into the iterative matrix loop below
/// this degree.
pub const HGCD_BASECASE: usize = 24;

// Classical multiplication in IntPoly is best only for very short
// operands; Karatsuba takes over quickly because BigInt products
// dominate.
pub const INTPOLY_KARATSUBA_CUTOFF: usize = 12;

/// IntPoly length from which Kronecker substitution beats Karatsuba.
pub const INTPOLY_KRONECKER_CUTOFF: usize = 48;

/// Combined coefficient bit size above which the Kronecker pack grows
/// large enough that Karatsuba on the coefficients wins again.
pub const INTPOLY_KRONECKER_MAX_BITS: u64 = 8192;
