// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Polynomial arithmetic over word-size prime fields and over the integers.
//!
//! The central type is [`poly::ZmodPoly`], a dense polynomial with
//! coefficients modulo an odd prime fitting in a machine word. Products,
//! quotients and GCDs are computed by one of several algorithms selected
//! from the operand sizes (see [`params`]): classical loops for short
//! polynomials, Karatsuba for medium sizes, Kronecker substitution through
//! big-integer multiplication for long ones, Newton iteration for large
//! divisions and a half-GCD for large GCDs.
//!
//! [`intpoly::IntPoly`] provides the companion dense polynomials over the
//! integers used as the Kronecker substitution intermediate.

pub mod arith;
pub mod params;
pub mod poly;

// Engines
pub mod div;
pub mod factor;
pub mod gcd;
pub mod mul;

// Polynomials over Z, used as the Kronecker substitution bridge.
pub mod intpoly;

pub use arith::ZmodP;
pub use intpoly::IntPoly;
pub use poly::{PolyView, ZmodPoly};
