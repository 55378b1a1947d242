//! Vector and rotation types with LSL operator semantics.
//!
//! `Vector3` and `Quaternion` parse from the `<x,y,z>` / `<x,y,z,s>`
//! literal forms and degrade to their zero-like defaults on malformed
//! input. Rotation composition and vector rotation follow the script
//! engine's Hamilton-product conventions, including the division forms
//! that negate the scalar part of the right operand.

use crate::scalar::{Float, LslString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// Split a `<a,b,c,...>` literal into strictly-parsed f64 components.
/// Angle brackets are optional; surrounding whitespace is allowed.
fn parse_components<const N: usize>(s: &str) -> Option<[f64; N]> {
    let inner = s.trim().trim_start_matches('<').trim_end_matches('>');
    let mut parts = inner.split(',');
    let mut out = [0.0; N];
    for slot in out.iter_mut() {
        *slot = parts.next()?.trim().parse::<f64>().ok()?;
    }
    Some(out)
}

// ---------------------------------------------------------------------------
// Vector3
// ---------------------------------------------------------------------------

/// A three-component LSL vector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    /// Parse the `<x,y,z>` literal form; malformed input yields the zero
    /// vector. Extra components beyond the third are ignored.
    pub fn from_lsl(s: &str) -> Self {
        match parse_components::<3>(s) {
            Some([x, y, z]) => Vector3 { x, y, z },
            None => Vector3::ZERO,
        }
    }

    /// Magnitude.
    pub fn mag(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector, or the zero vector when the magnitude is zero.
    pub fn norm(self) -> Self {
        let mag = self.mag();
        if mag > 0.0 {
            Vector3 {
                x: self.x / mag,
                y: self.y / mag,
                z: self.z / mag,
            }
        } else {
            Vector3::ZERO
        }
    }

    /// True when any component is true in the float sense.
    pub fn is_truthy(self) -> bool {
        Float(self.x).is_truthy() || Float(self.y).is_truthy() || Float(self.z).is_truthy()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:.6},{:.6},{:.6}>", self.x, self.y, self.z)
    }
}

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        Float(self.x) == Float(other.x)
            && Float(self.y) == Float(other.y)
            && Float(self.z) == Float(other.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

/// Dot product.
impl Mul for Vector3 {
    type Output = Float;
    fn mul(self, rhs: Vector3) -> Float {
        Float(self.x * rhs.x + self.y * rhs.y + self.z * rhs.z)
    }
}

/// Cross product, the script engine's `%` operator.
impl Rem for Vector3 {
    type Output = Vector3;
    fn rem(self, rhs: Vector3) -> Vector3 {
        Vector3::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;
    fn div(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Mul<Float> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: Float) -> Vector3 {
        self * rhs.0
    }
}

impl Div<Float> for Vector3 {
    type Output = Vector3;
    fn div(self, rhs: Float) -> Vector3 {
        self / rhs.0
    }
}

/// Rotate by a quaternion: `q * v * q̄` in Hamilton-product terms.
impl Mul<Quaternion> for Vector3 {
    type Output = Vector3;
    fn mul(self, r: Quaternion) -> Vector3 {
        let vq = Quaternion::new(self.x, self.y, self.z, 0.0);
        let nq = Quaternion::new(-r.x, -r.y, -r.z, r.s);
        let rotated = (nq * vq) * r;
        Vector3::new(rotated.x, rotated.y, rotated.z)
    }
}

/// Rotate by the inverse: negate the rotation's scalar part, then rotate.
impl Div<Quaternion> for Vector3 {
    type Output = Vector3;
    fn div(self, r: Quaternion) -> Vector3 {
        self * Quaternion::new(r.x, r.y, r.z, -r.s)
    }
}

// ---------------------------------------------------------------------------
// Quaternion
// ---------------------------------------------------------------------------

/// A four-component LSL rotation; `s` is the scalar part.
///
/// An all-zero payload is forced to the identity `(0,0,0,1)` at every
/// construction path, so a degenerate zero rotation never propagates.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub s: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { x: 0.0, y: 0.0, z: 0.0, s: 1.0 };

    pub fn new(x: f64, y: f64, z: f64, s: f64) -> Self {
        if x == 0.0 && y == 0.0 && z == 0.0 && s == 0.0 {
            Quaternion::IDENTITY
        } else {
            Quaternion { x, y, z, s }
        }
    }

    /// Parse the `<x,y,z,s>` literal form; malformed input degrades to the
    /// zero payload and therefore to the identity rotation.
    pub fn from_lsl(s: &str) -> Self {
        match parse_components::<4>(s) {
            Some([x, y, z, w]) => Quaternion::new(x, y, z, w),
            None => Quaternion::IDENTITY,
        }
    }

    /// Magnitude over all four components.
    pub fn mag(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.s * self.s).sqrt()
    }

    /// True when any component differs from the identity in the float sense.
    pub fn is_truthy(self) -> bool {
        Float(self.x).is_truthy()
            || Float(self.y).is_truthy()
            || Float(self.z).is_truthy()
            || Float(self.s - 1.0).is_truthy()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::IDENTITY
    }
}

// Deserialization funnels through the constructor so the zero-payload
// guard holds for decoded data too.
impl<'de> Deserialize<'de> for Quaternion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            x: f64,
            y: f64,
            z: f64,
            s: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Quaternion::new(raw.x, raw.y, raw.z, raw.s))
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:.6},{:.6},{:.6},{:.6}>", self.x, self.y, self.z, self.s)
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        Float(self.x) == Float(other.x)
            && Float(self.y) == Float(other.y)
            && Float(self.z) == Float(other.z)
            && Float(self.s) == Float(other.s)
    }
}

impl Add for Quaternion {
    type Output = Quaternion;
    fn add(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.s + rhs.s)
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;
    fn sub(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.s - rhs.s)
    }
}

/// Rotation composition; `a * b` applies `a` first, then `b`, so
/// `v * (a * b)` equals `(v * a) * b`.
impl Mul for Quaternion {
    type Output = Quaternion;
    fn mul(self, b: Quaternion) -> Quaternion {
        let a = self;
        Quaternion::new(
            b.s * a.x + b.x * a.s + b.y * a.z - b.z * a.y,
            b.s * a.y + b.y * a.s + b.z * a.x - b.x * a.z,
            b.s * a.z + b.z * a.s + b.x * a.y - b.y * a.x,
            b.s * a.s - b.x * a.x - b.y * a.y - b.z * a.z,
        )
    }
}

/// Multiply by the right operand with its scalar part negated.
impl Div for Quaternion {
    type Output = Quaternion;
    fn div(self, rhs: Quaternion) -> Quaternion {
        self * Quaternion::new(rhs.x, rhs.y, rhs.z, -rhs.s)
    }
}

// String casts for the literal forms live here, next to the parsers.
impl LslString {
    /// Cast to a vector; anything but a well-formed `<x,y,z>` is zero.
    pub fn to_vector(&self) -> Vector3 {
        Vector3::from_lsl(&self.0)
    }

    /// Cast to a rotation; malformed input degrades to the identity.
    pub fn to_rotation(&self) -> Quaternion {
        Quaternion::from_lsl(&self.0)
    }
}

impl From<Vector3> for LslString {
    fn from(v: Vector3) -> Self {
        LslString(v.to_string())
    }
}

impl From<Quaternion> for LslString {
    fn from(q: Quaternion) -> Self {
        LslString(q.to_string())
    }
}
