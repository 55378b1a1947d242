//! LSL scalar value types: `Integer`, `Float`, and `LslString`.
//!
//! Script casts in LSL never fail: malformed numeric text degrades to a
//! zero-like default instead of raising. The constructors here reproduce
//! that grammar, including the hex form, the `TRUE`/`FALSE` literals, and
//! the longest-leading-run rule that silently drops trailing garbage.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};
use uuid::Uuid;

/// Absolute tolerance shared by float equality and float truthiness.
pub const FLOAT_TOLERANCE: f64 = 0.000_000_5;

/// Longest leading integer run: optional sign, then hex (`0x`) or decimal digits.
static INT_SCAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-])?(0[xX][0-9A-Fa-f]+|[0-9]+)").unwrap());

/// Longest leading float run: optional sign, mandatory mantissa digits,
/// optional fraction and exponent.
static FLOAT_SCAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?").unwrap());

// ---------------------------------------------------------------------------
// Integer
// ---------------------------------------------------------------------------

/// A 32-bit LSL integer. All arithmetic wraps (two's complement).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Integer(pub i32);

impl Integer {
    /// Construct from script text using the LSL cast grammar.
    ///
    /// Accepts `TRUE`/`FALSE`, a `0x`-prefixed hex run, or a signed decimal
    /// run; trailing garbage after the run is ignored. Unparsable input
    /// yields 0. A run whose value does not fit 32 bits yields -1, except
    /// that hex runs convert through `u32` and reinterpret the bits, so
    /// `"0xFFFFFFFF"` is -1 by reinterpretation rather than by overflow.
    pub fn from_lsl(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed == "TRUE" {
            return Integer(1);
        }
        if trimmed == "FALSE" {
            return Integer(0);
        }
        let Some(caps) = INT_SCAN.captures(s) else {
            return Integer(0);
        };
        let negative = caps.get(1).is_some_and(|m| m.as_str() == "-");
        let body = &caps[2];
        let value = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
            let bits = match u32::from_str_radix(hex, 16) {
                Ok(bits) => bits as i32,
                Err(_) => return Integer(-1),
            };
            if negative {
                bits.wrapping_neg()
            } else {
                bits
            }
        } else {
            let mut literal = String::with_capacity(body.len() + 1);
            if negative {
                literal.push('-');
            }
            literal.push_str(body);
            match literal.parse::<i32>() {
                Ok(v) => v,
                Err(_) => -1,
            }
        };
        Integer(value)
    }

    /// Nonzero is true.
    pub fn is_truthy(self) -> bool {
        self.0 != 0
    }

    /// Widen to an LSL float.
    pub fn to_float(self) -> Float {
        Float(f64::from(self.0))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Integer {
    fn from(v: i32) -> Self {
        Integer(v)
    }
}

impl Add for Integer {
    type Output = Integer;
    fn add(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Integer {
    type Output = Integer;
    fn sub(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for Integer {
    type Output = Integer;
    fn mul(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_mul(rhs.0))
    }
}

impl Div for Integer {
    type Output = Integer;
    fn div(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_div(rhs.0))
    }
}

impl Rem for Integer {
    type Output = Integer;
    fn rem(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_rem(rhs.0))
    }
}

impl Neg for Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(self.0.wrapping_neg())
    }
}

impl Not for Integer {
    type Output = Integer;
    fn not(self) -> Integer {
        Integer(!self.0)
    }
}

impl BitAnd for Integer {
    type Output = Integer;
    fn bitand(self, rhs: Integer) -> Integer {
        Integer(self.0 & rhs.0)
    }
}

impl BitOr for Integer {
    type Output = Integer;
    fn bitor(self, rhs: Integer) -> Integer {
        Integer(self.0 | rhs.0)
    }
}

impl BitXor for Integer {
    type Output = Integer;
    fn bitxor(self, rhs: Integer) -> Integer {
        Integer(self.0 ^ rhs.0)
    }
}

impl Shl<Integer> for Integer {
    type Output = Integer;
    fn shl(self, rhs: Integer) -> Integer {
        // shift count taken mod 32, matching the script engine
        Integer(self.0.wrapping_shl(rhs.0 as u32))
    }
}

impl Shr<Integer> for Integer {
    type Output = Integer;
    fn shr(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_shr(rhs.0 as u32))
    }
}

// ---------------------------------------------------------------------------
// Float
// ---------------------------------------------------------------------------

/// A 64-bit LSL float.
///
/// Equality and truthiness are tolerance-based: two floats compare equal
/// when they differ by at most [`FLOAT_TOLERANCE`], and a float is true
/// when its magnitude exceeds the tolerance.
///
/// Legacy script engines compared `|a| - |b| <= tolerance`, an
/// order-dependent check that also reports distant values as equal
/// whenever the left magnitude is the smaller one. The default here is
/// the symmetric `|a - b| <= tolerance`; enable the `legacy-float-eq`
/// feature to reproduce the historical comparison bit-for-bit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Float(pub f64);

impl Float {
    /// Construct from script text using the LSL cast grammar.
    ///
    /// Accepts `TRUE`/`FALSE` and the longest leading run of
    /// `[+-]? digits [.digits] [e[+-]digits]`; trailing garbage is ignored
    /// and unparsable input yields 0.0. Never fails.
    pub fn from_lsl(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed == "TRUE" {
            return Float(1.0);
        }
        if trimmed == "FALSE" {
            return Float(0.0);
        }
        match FLOAT_SCAN.find(s) {
            Some(m) => m.as_str().trim().parse::<f64>().map(Float).unwrap_or(Float(0.0)),
            None => Float(0.0),
        }
    }

    /// True when the magnitude exceeds the comparison tolerance.
    pub fn is_truthy(self) -> bool {
        self.0.abs() > FLOAT_TOLERANCE
    }

    /// Truncate to an LSL integer.
    pub fn to_integer(self) -> Integer {
        Integer(self.0 as i32)
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // fixed six decimal places, the script string form
        write!(f, "{:.6}", self.0)
    }
}

impl From<f64> for Float {
    fn from(v: f64) -> Self {
        Float(v)
    }
}

impl From<Integer> for Float {
    fn from(v: Integer) -> Self {
        v.to_float()
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        if cfg!(feature = "legacy-float-eq") {
            self.0.abs() - other.0.abs() <= FLOAT_TOLERANCE
        } else {
            (self.0 - other.0).abs() <= FLOAT_TOLERANCE
        }
    }
}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

impl Add for Float {
    type Output = Float;
    fn add(self, rhs: Float) -> Float {
        Float(self.0 + rhs.0)
    }
}

impl Sub for Float {
    type Output = Float;
    fn sub(self, rhs: Float) -> Float {
        Float(self.0 - rhs.0)
    }
}

impl Mul for Float {
    type Output = Float;
    fn mul(self, rhs: Float) -> Float {
        Float(self.0 * rhs.0)
    }
}

impl Div for Float {
    type Output = Float;
    fn div(self, rhs: Float) -> Float {
        Float(self.0 / rhs.0)
    }
}

impl Neg for Float {
    type Output = Float;
    fn neg(self) -> Float {
        Float(-self.0)
    }
}

// ---------------------------------------------------------------------------
// LslString
// ---------------------------------------------------------------------------

/// An LSL string.
///
/// Boolean context treats the empty string and any spelling of the nil
/// UUID as false; every other string, parseable as a UUID or not, is true.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LslString(pub String);

impl LslString {
    pub fn new(s: impl Into<String>) -> Self {
        LslString(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_truthy(&self) -> bool {
        if self.0.is_empty() {
            return false;
        }
        match Uuid::try_parse(&self.0) {
            Ok(id) => !id.is_nil(),
            Err(_) => true,
        }
    }

    /// The UUID this string names, when it is UUID-shaped.
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::try_parse(&self.0).ok()
    }

    /// Cast to an integer with the permissive script grammar.
    pub fn to_integer(&self) -> Integer {
        Integer::from_lsl(&self.0)
    }

    /// Cast to a float with the permissive script grammar.
    pub fn to_float(&self) -> Float {
        Float::from_lsl(&self.0)
    }
}

impl fmt::Display for LslString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LslString {
    fn from(s: &str) -> Self {
        LslString(s.to_owned())
    }
}

impl From<String> for LslString {
    fn from(s: String) -> Self {
        LslString(s)
    }
}

impl From<Integer> for LslString {
    fn from(v: Integer) -> Self {
        LslString(v.to_string())
    }
}

impl From<Float> for LslString {
    fn from(v: Float) -> Self {
        LslString(v.to_string())
    }
}

impl Add for LslString {
    type Output = LslString;
    fn add(self, rhs: LslString) -> LslString {
        LslString(self.0 + &rhs.0)
    }
}

impl Add<&str> for LslString {
    type Output = LslString;
    fn add(self, rhs: &str) -> LslString {
        LslString(self.0 + rhs)
    }
}
