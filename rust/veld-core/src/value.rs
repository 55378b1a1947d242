//! The tagged element type carried by the heterogeneous list.
//!
//! A closed union over the five script value types. Keeping the set
//! closed makes the list accessors' coercion rules a compile-checked
//! match instead of a reflection walk.

use crate::scalar::{Float, Integer, LslString};
use crate::vector::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Any value a script list element may hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Integer(Integer),
    Float(Float),
    String(LslString),
    Vector(Vector3),
    Rotation(Quaternion),
}

impl Value {
    /// The script-language name of the stored type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Vector(_) => "vector",
            Value::Rotation(_) => "rotation",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer(i) => i.is_truthy(),
            Value::Float(f) => f.is_truthy(),
            Value::String(s) => s.is_truthy(),
            Value::Vector(v) => v.is_truthy(),
            Value::Rotation(r) => r.is_truthy(),
        }
    }

    pub fn as_integer(&self) -> Option<Integer> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<Float> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<Vector3> {
        match self {
            Value::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_rotation(&self) -> Option<Quaternion> {
        match self {
            Value::Rotation(r) => Some(*r),
            _ => None,
        }
    }
}

/// The script string form: integers plain, floats with six decimals,
/// vectors and rotations in their `<...>` literal form.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Vector(v) => write!(f, "{v}"),
            Value::Rotation(r) => write!(f, "{r}"),
        }
    }
}

impl From<Integer> for Value {
    fn from(v: Integer) -> Self {
        Value::Integer(v)
    }
}

impl From<Float> for Value {
    fn from(v: Float) -> Self {
        Value::Float(v)
    }
}

impl From<LslString> for Value {
    fn from(v: LslString) -> Self {
        Value::String(v)
    }
}

impl From<Vector3> for Value {
    fn from(v: Vector3) -> Self {
        Value::Vector(v)
    }
}

impl From<Quaternion> for Value {
    fn from(v: Quaternion) -> Self {
        Value::Rotation(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(Integer(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(Float(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(LslString::from(v))
    }
}
