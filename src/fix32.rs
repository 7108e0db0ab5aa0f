// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The console's one and only number type: 16.16 fixed point in an [i32].
//!
//! Everything here is total. Division by zero, overflow and absurd shift amounts
//! all produce a well-defined value, because cartridges depend on exactly which
//! value comes out.


mod trig;

use crate::error::{Error, Result};
use std::{
    fmt::{Debug, Display, Formatter},
    ops::*,
    str::FromStr,
};

/// A 16.16 fixed-point number
///
/// The upper 16 bits are the (signed) integer part, the lower 16 bits the fraction.
/// # Examples
/// ```rust
/// # use pocket8::fix32::Fix32;
/// let half = Fix32::from_bits(0x8000);
/// assert_eq!(Fix32::from_int(3) * half, Fix32::from_f64(1.5));
/// assert_eq!(half.to_string(), "0.5");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Fix32(i32);

impl Fix32 {
    /// `0`
    pub const ZERO: Self = Self(0);
    /// `1`
    pub const ONE: Self = Self(0x10000);
    /// The largest representable value, `0x7fff.ffff`
    pub const MAX: Self = Self(i32::MAX);
    /// The smallest representable value, `-0x8000`
    pub const MIN: Self = Self(i32::MIN);
    /// What the console gives back instead of negative infinity, `-0x7fff.ffff`
    pub const NEG_INF: Self = Self(i32::MIN + 1);

    /// Reinterprets raw bits as a number
    #[inline(always)]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }
    /// Gets the raw bits of this number
    #[inline(always)]
    pub const fn to_bits(self) -> i32 {
        self.0
    }
    /// Converts an integer, discarding anything above the 16 integer bits
    #[inline(always)]
    pub const fn from_int(int: i32) -> Self {
        Self(int.wrapping_shl(16))
    }
    /// Gets the integer part, rounding towards negative infinity
    #[inline(always)]
    pub const fn to_int(self) -> i32 {
        self.0 >> 16
    }
    /// Converts a float, truncating towards zero
    pub fn from_f64(value: f64) -> Self {
        Self((value * 65536.0) as i64 as i32)
    }
    /// Converts to a float. This is always exact.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }

    /// Absolute value, except `abs(MIN) == MAX`
    pub const fn abs(self) -> Self {
        match self.0 {
            i32::MIN => Self::MAX,
            bits => Self(bits.wrapping_abs()),
        }
    }
    /// Clears the fractional bits
    pub const fn floor(self) -> Self {
        Self(self.0 & !0xffff)
    }
    /// `-floor(-x)`
    pub const fn ceil(self) -> Self {
        Self(Self(self.0.wrapping_neg()).floor().0.wrapping_neg())
    }
    /// `-1` if the integer part is negative, `1` otherwise (including for `0`)
    pub const fn sgn(self) -> Self {
        if self.to_int() >= 0 {
            Self::ONE
        } else {
            Self::from_int(-1)
        }
    }
    /// The middle value of the three
    pub fn mid(self, y: Self, z: Self) -> Self {
        let x = self;
        if x > y {
            if y > z {
                y
            } else {
                x.min(z)
            }
        } else if x > z {
            x
        } else {
            y.min(z)
        }
    }
    /// `self` raised to the power `exp`, computed through [f64]
    pub fn pow(self, exp: Self) -> Self {
        Self::from_f64(self.to_f64().powf(exp.to_f64()))
    }

    /// Shifts left by `amount`. A negative amount shifts right logically.
    pub fn shl(self, amount: i32) -> Self {
        Self::shift_left(self.0, amount as i64)
    }
    /// Shifts right arithmetically by `amount`. A negative amount shifts left.
    pub fn shr(self, amount: i32) -> Self {
        Self::shift_right(self.0, amount as i64)
    }
    /// Shifts right logically by `amount`. A negative amount shifts left.
    pub fn lshr(self, amount: i32) -> Self {
        Self::shift_right_logical(self.0, amount as i64)
    }
    /// Rotates left by `amount` modulo 32
    pub const fn rotl(self, amount: i32) -> Self {
        Self((self.0 as u32).rotate_left(amount as u32 & 0x1f) as i32)
    }
    /// Rotates right by `amount` modulo 32
    pub const fn rotr(self, amount: i32) -> Self {
        Self((self.0 as u32).rotate_right(amount as u32 & 0x1f) as i32)
    }

    // Amounts are widened so that negating i32::MIN can't loop forever
    fn shift_left(bits: i32, amount: i64) -> Self {
        match amount {
            a if a < 0 => Self::shift_right_logical(bits, -a),
            a if a >= 32 => Self::ZERO,
            a => Self(bits << a),
        }
    }
    fn shift_right(bits: i32, amount: i64) -> Self {
        match amount {
            a if a < 0 => Self::shift_left(bits, -a),
            a => Self(bits >> a.min(31)),
        }
    }
    fn shift_right_logical(bits: i32, amount: i64) -> Self {
        match amount {
            a if a < 0 => Self::shift_left(bits, -a),
            a if a >= 32 => Self::ZERO,
            a => Self(((bits as u32) >> a) as i32),
        }
    }
}

impl Add for Fix32 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fix32 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for Fix32 {
    type Output = Self;
    /// Widens to 64 bits and truncates the result. There is no saturation.
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        Self(((self.0 as i64 * rhs.0 as i64) >> 16) as i32)
    }
}

impl Div for Fix32 {
    type Output = Self;
    /// Divides, saturating on overflow and division by zero
    ///
    /// Dividing by exactly `1` returns the dividend untouched.
    /// Saturation goes to [Fix32::MAX], or [Fix32::NEG_INF] when the signs differ.
    /// ```rust
    /// # use pocket8::fix32::Fix32;
    /// assert_eq!(Fix32::from_int(5) / Fix32::ZERO, Fix32::MAX);
    /// assert_eq!(Fix32::from_int(-5) / Fix32::ZERO, Fix32::NEG_INF);
    /// ```
    fn div(self, rhs: Self) -> Self {
        let (a, b) = (self.0, rhs.0);
        if b == Self::ONE.0 {
            return self;
        }
        if b != 0 {
            let quotient = (a as i64 * 0x10000) / b as i64;
            if quotient.abs() <= i32::MAX as i64 {
                return Self(quotient as i32);
            }
        }
        if (a ^ b) >= 0 {
            Self::MAX
        } else {
            Self::NEG_INF
        }
    }
}

impl Rem for Fix32 {
    type Output = Self;
    /// The console's `%`: the result is never negative, and `x % 0 == 0`
    fn rem(self, rhs: Self) -> Self {
        let divisor = rhs.abs().0;
        let remainder = if divisor != 0 {
            self.0.wrapping_rem(divisor)
        } else {
            0
        };
        if remainder >= 0 {
            Self(remainder)
        } else {
            Self(remainder + divisor)
        }
    }
}

impl Neg for Fix32 {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl Not for Fix32 {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

/// Implements a bitwise operator and its assigning form on the raw bits
macro_rules! impl_bitwise {
    ($($trait:ident::$fn:ident, $assign:ident::$assign_fn:ident => $op:tt);* $(;)?) => {
        $(
            impl $trait for Fix32 {
                type Output = Self;
                #[inline(always)]
                fn $fn(self, rhs: Self) -> Self {
                    Self(self.0 $op rhs.0)
                }
            }
            impl $assign for Fix32 {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

impl_bitwise! {
    BitAnd::bitand, BitAndAssign::bitand_assign => &;
    BitOr::bitor, BitOrAssign::bitor_assign => |;
    BitXor::bitxor, BitXorAssign::bitxor_assign => ^;
}

/// Implements the assigning form of an arithmetic operator
macro_rules! impl_assign {
    ($($assign:ident::$assign_fn:ident => $op:tt);* $(;)?) => {
        $(
            impl $assign for Fix32 {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Self) {
                    *self = *self $op rhs;
                }
            }
        )*
    };
}

impl_assign! {
    AddAssign::add_assign => +;
    SubAssign::sub_assign => -;
    MulAssign::mul_assign => *;
    DivAssign::div_assign => /;
    RemAssign::rem_assign => %;
}

impl From<i16> for Fix32 {
    fn from(value: i16) -> Self {
        Self::from_int(value as i32)
    }
}

impl From<u8> for Fix32 {
    fn from(value: u8) -> Self {
        Self::from_int(value as i32)
    }
}

impl From<bool> for Fix32 {
    fn from(value: bool) -> Self {
        Self::from_int(value as i32)
    }
}

impl Display for Fix32 {
    /// Prints up to four decimal places, without trailing zeroes
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = format!("{:.4}", self.to_f64());
        f.write_str(text.trim_end_matches('0').trim_end_matches('.'))
    }
}

impl Debug for Fix32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fix32({self} [{:08x}])", self.0)
    }
}

impl FromStr for Fix32 {
    type Err = Error;
    /// Parses decimal, `0x` hexadecimal and `0b` binary numerals
    ///
    /// Hex and binary numerals may carry a fraction after a point.
    /// ```rust
    /// # use pocket8::fix32::Fix32;
    /// assert_eq!("0x1.8".parse::<Fix32>().unwrap(), Fix32::from_bits(0x18000));
    /// assert_eq!("-0b10".parse::<Fix32>().unwrap(), Fix32::from_int(-2));
    /// assert!("nan".parse::<Fix32>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let error = || Error::ParseNumber { text: s.to_owned() };
        let text = s.trim();
        // inf, nan and friends have no fixed-point meaning
        if text.contains(['n', 'N']) {
            return Err(error());
        }
        let (negative, body) = match text.strip_prefix('-') {
            Some(body) => (true, body),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        if body.starts_with(['-', '+']) {
            return Err(error());
        }
        let value = match body.get(..2) {
            Some("0x" | "0X") => parse_radix(&body[2..], 16),
            Some("0b" | "0B") => parse_radix(&body[2..], 2),
            _ => body.parse::<f64>().ok(),
        }
        .ok_or_else(error)?;
        Ok(Self::from_f64(if negative { -value } else { value }))
    }
}

/// Parses `int[.frac]` digits in the given radix into a float
fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (digits, ""),
    };
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    let mut whole = 0u64;
    for c in int.chars() {
        whole = whole
            .wrapping_mul(radix as u64)
            .wrapping_add(c.to_digit(radix)? as u64);
    }
    let (mut fraction, mut scale) = (0.0, 1.0);
    for c in frac.chars() {
        scale *= radix as f64;
        fraction += c.to_digit(radix)? as f64 / scale;
    }
    Some(whole as f64 + fraction)
}
