// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Table-driven trigonometry and square root, matching the console bit for bit
//!
//! Angles are measured in turns, and y points down the screen, so
//! `sin(0.25) == -1`.

use super::Fix32;
use std::{f64::consts::TAU, sync::OnceLock};

/// `sin(x) - 4x` over the first quarter turn, one entry per 4 fractional units
fn sin_table() -> &'static [i32] {
    static TABLE: OnceLock<Vec<i32>> = OnceLock::new();
    TABLE.get_or_init(|| {
        (0..=0x1000)
            .map(|k| ((TAU * k as f64 / 16384.0).sin() * 65536.0).round() as i32 - 16 * k)
            .collect()
    })
}

/// `atan(r)` in turns, for ratios `r` in `0..=1` in steps of `1/2048`
fn atan_table() -> &'static [i32] {
    static TABLE: OnceLock<Vec<i32>> = OnceLock::new();
    TABLE.get_or_init(|| {
        (0..=0x800)
            .map(|i| ((i as f64 / 2048.0).atan() / TAU * 65536.0).round() as i32)
            .collect()
    })
}

impl Fix32 {
    /// Sine of an angle in turns, with the screen's y axis (down is positive)
    /// ```rust
    /// # use pocket8::fix32::Fix32;
    /// assert_eq!(Fix32::from_f64(0.25).sin(), Fix32::from_int(-1));
    /// ```
    pub fn sin(self) -> Self {
        let x = self.0;
        // sin(x) == sin(!x) on this console, not sin(-x); the low two bits round
        let a = ((if x & 0x4000 != 0 { !x } else { x }) & 0x3fff) + 2;
        let ret = ((a >> 2) << 4) + sin_table()[(a >> 2) as usize];
        Self(if x & 0x8000 != 0 { ret } else { -ret })
    }

    /// Cosine of an angle in turns
    pub fn cos(self) -> Self {
        (self - Self(0x4000)).sin()
    }

    /// The angle in turns of the vector `(dx, dy)`, in `0..1`
    /// ```rust
    /// # use pocket8::fix32::Fix32;
    /// let one = Fix32::ONE;
    /// assert_eq!(Fix32::atan2(one, Fix32::ZERO), Fix32::ZERO);
    /// assert_eq!(Fix32::atan2(Fix32::ZERO, one), Fix32::from_f64(0.75));
    /// ```
    pub fn atan2(dx: Self, dy: Self) -> Self {
        let (x, y) = (dx.0, dy.0);
        let table = atan_table();
        let lookup = |index: i64| table[index.clamp(0, 0x800) as usize];
        let mut bits = 0x4000;
        if x != 0 {
            // i32::MIN stays negative here, as it does on the console
            let q = ((y.wrapping_abs() as i64) << 16) / x.wrapping_abs() as i64;
            if q > 0x10000 {
                bits -= lookup(((1i64 << 32) / q) >> 5);
            } else {
                bits = lookup(q >> 5);
            }
        }
        if x < 0 {
            bits = 0x8000 - bits;
        }
        if y > 0 {
            bits = -bits & 0xffff;
        }
        if x != 0 && y == i32::MIN {
            bits = -bits & 0xffff;
        }
        Self(bits)
    }

    /// Square root, computed one bit at a time. Non-positive input gives `0`.
    pub fn sqrt(self) -> Self {
        let mut x = (self.0 as i64) << 16;
        let mut root = 0i64;
        if x > 0 {
            let mut a = 1i64 << 46;
            while a != 0 {
                if x >= a + root {
                    x -= a + root;
                    root += a << 1;
                }
                a >>= 2;
                root >>= 1;
            }
        }
        Self(root as i32)
    }
}
