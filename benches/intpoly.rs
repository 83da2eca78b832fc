// Copyright 2026 The zpoly authors. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use num_bigint::BigInt;

use zpoly::intpoly::{self, IntPoly};

fn main() {
    eprintln!("Integer polynomial timings");
    for bits in [16u64, 64, 256, 1024] {
        eprintln!("coefficient size {bits} bits");
        for len in [16, 64, 256, 1024, 4096] {
            let p1 = IntPoly::from_coeffs(
                (1..=len as u64)
                    .map(|x| (BigInt::from(x * 12345 + 678) << (bits - 1)) + x)
                    .collect::<Vec<_>>(),
            );
            let p2 = IntPoly::from_coeffs(
                (1..=len as u64)
                    .map(|x| -((BigInt::from(x * 56789 + 123) << (bits - 1)) + x))
                    .collect::<Vec<_>>(),
            );

            if len <= 256 {
                let start = std::time::Instant::now();
                let _ = intpoly::mul_classical(&p1, &p2);
                eprintln!("mulC len {len} in {:.6}s", start.elapsed().as_secs_f64());
            }

            if len <= 1024 {
                let start = std::time::Instant::now();
                let _ = intpoly::mul_karatsuba(&p1, &p2);
                eprintln!("mulA len {len} in {:.6}s", start.elapsed().as_secs_f64());
            }

            let start = std::time::Instant::now();
            let _ = intpoly::mul_kronecker(&p1, &p2);
            eprintln!("mulK len {len} in {:.6}s", start.elapsed().as_secs_f64());
        }
    }
}
