//! The heterogeneous script list.
//!
//! Lists are ordered, mixed-type sequences. Slicing carries the script
//! language's negative-index and wrap-around rules, sorting is feathered
//! (elements of unlike types compare equal and keep their relative
//! order), and the statistical reductions silently skip elements that do
//! not read as numbers.

use crate::scalar::{Float, Integer, LslString};
use crate::value::Value;
use crate::vector::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::mem::discriminant;
use std::ops::Add;
use thiserror::Error;

/// Failure of a typed list accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} out of bounds for list of length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("{expected} expected but {actual} given")]
    Cast {
        expected: &'static str,
        actual: &'static str,
    },
}

/// An ordered, mixed-type sequence of script values. The empty list is a
/// zero-length sequence, never an absent one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct List {
    data: Vec<Value>,
}

impl List {
    pub fn new() -> Self {
        List { data: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.data.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.data.get(index)
    }

    /// Append a single element in place.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.data.push(value.into());
    }

    fn item(&self, index: usize) -> Result<&Value, ListError> {
        self.data.get(index).ok_or(ListError::OutOfBounds {
            index,
            len: self.data.len(),
        })
    }

    // -- typed accessors ---------------------------------------------------

    /// Integer at `index`; floats truncate and strings go through the
    /// permissive cast grammar.
    pub fn get_integer(&self, index: usize) -> Result<Integer, ListError> {
        match self.item(index)? {
            Value::Integer(i) => Ok(*i),
            Value::Float(f) => Ok(f.to_integer()),
            Value::String(s) => Ok(s.to_integer()),
            other => Err(ListError::Cast {
                expected: "integer",
                actual: other.type_name(),
            }),
        }
    }

    /// Float at `index`; integers widen and strings go through the
    /// permissive cast grammar.
    pub fn get_float(&self, index: usize) -> Result<Float, ListError> {
        match self.item(index)? {
            Value::Integer(i) => Ok(i.to_float()),
            Value::Float(f) => Ok(*f),
            Value::String(s) => Ok(s.to_float()),
            other => Err(ListError::Cast {
                expected: "float",
                actual: other.type_name(),
            }),
        }
    }

    /// String form of the element at `index`; every type converts.
    pub fn get_string(&self, index: usize) -> Result<LslString, ListError> {
        let item = self.item(index)?;
        match item {
            Value::String(s) => Ok(s.clone()),
            other => Ok(LslString::new(other.to_string())),
        }
    }

    /// Vector at `index`. Only a stored vector qualifies; strings are not
    /// coerced even when they hold a well-formed literal.
    pub fn get_vector(&self, index: usize) -> Result<Vector3, ListError> {
        match self.item(index)? {
            Value::Vector(v) => Ok(*v),
            other => Err(ListError::Cast {
                expected: "vector",
                actual: other.type_name(),
            }),
        }
    }

    /// Rotation at `index`. Only a stored rotation qualifies.
    pub fn get_rotation(&self, index: usize) -> Result<Quaternion, ListError> {
        match self.item(index)? {
            Value::Rotation(r) => Ok(*r),
            other => Err(ListError::Cast {
                expected: "rotation",
                actual: other.type_name(),
            }),
        }
    }

    // -- slicing -----------------------------------------------------------

    /// The sublist from `start` through `end`, both inclusive. Negative
    /// indices count from the end. When the normalized `start` exceeds
    /// `end`, the selection wraps: the prefix `0..=end` followed by the
    /// tail `start..`.
    pub fn sublist(&self, start: i32, end: i32) -> List {
        let len = self.data.len() as i32;
        let start = if start < 0 { len + start } else { start };
        let end = if end < 0 { len + end } else { end };

        if start <= end {
            if start >= len || end < 0 {
                return List::new();
            }
            let s = start.max(0) as usize;
            let e = end.min(len - 1) as usize;
            return List::from(self.data[s..=e].to_vec());
        }

        // Wrapped: everything except the excluded middle.
        let mut out = if end < 0 {
            if start < 0 {
                return self.clone();
            }
            List::new()
        } else {
            self.sublist(0, end)
        };
        if start < len {
            out = out + self.sublist(start, len - 1);
        }
        out
    }

    /// The list with `start..=end` removed, using the same normalization
    /// as [`List::sublist`]. When the normalized `start` exceeds `end` the
    /// deletion wraps, keeping only `end+1 ..= start-1`.
    pub fn delete_sublist(&self, start: i32, end: i32) -> List {
        let len = self.data.len() as i32;
        let start = if start < 0 { len + start } else { start };
        let end = if end < 0 { len + end } else { end };

        if start <= end {
            if start >= len || end < 0 {
                return self.clone();
            }
            let s = start.max(0) as usize;
            let e = end.min(len - 1) as usize;
            let mut out = Vec::with_capacity(self.data.len() - (e - s + 1));
            out.extend_from_slice(&self.data[..s]);
            out.extend_from_slice(&self.data[e + 1..]);
            return List::from(out);
        }

        let keep_from = (end + 1).max(0).min(len) as usize;
        let keep_to = start.max(0).min(len) as usize;
        if keep_from >= keep_to {
            return List::new();
        }
        List::from(self.data[keep_from..keep_to].to_vec())
    }

    // -- sorting -----------------------------------------------------------

    /// Sort in blocks of `stride` elements, ordering blocks by their first
    /// element. A length not divisible by `stride` returns an unsorted
    /// copy. Unlike types compare equal and keep their relative order, so
    /// the general path is a literal bubble sort; a library sort is used
    /// only for a homogeneous stride-1 list.
    pub fn sort(&self, stride: i32, ascending: bool) -> List {
        let mut ret = self.data.clone();
        if ret.is_empty() {
            return List::new();
        }
        let stride = if stride <= 0 { 1 } else { stride as usize };
        if ret.len() % stride != 0 {
            return List::from(ret);
        }

        let first = discriminant(&ret[0]);
        let homogeneous = ret.iter().all(|v| discriminant(v) == first);
        if stride == 1 && homogeneous {
            ret.sort_by(compare_same);
            if !ascending {
                ret.reverse();
            }
            return List::from(ret);
        }

        let n = ret.len();
        let mut i = 0;
        while i + stride < n {
            let mut j = i + stride;
            while j < n {
                if feathered_compare(&ret[i], &ret[j], ascending) == Ordering::Greater {
                    for k in 0..stride {
                        ret.swap(i + k, j + k);
                    }
                }
                j += stride;
            }
            i += stride;
        }
        List::from(ret)
    }

    // -- statistics --------------------------------------------------------

    /// Elements whose string form reads as a number.
    fn numeric_values(&self) -> Vec<f64> {
        self.data
            .iter()
            .filter_map(|v| v.to_string().trim().parse::<f64>().ok())
            .collect()
    }

    /// Smallest numeric element, or +infinity when none is numeric.
    pub fn min(&self) -> f64 {
        let mut minimum = f64::INFINITY;
        for v in self.numeric_values() {
            if v < minimum {
                minimum = v;
            }
        }
        minimum
    }

    /// Largest numeric element, or -infinity when none is numeric.
    pub fn max(&self) -> f64 {
        let mut maximum = f64::NEG_INFINITY;
        for v in self.numeric_values() {
            if v > maximum {
                maximum = v;
            }
        }
        maximum
    }

    /// The quotient max / min, the script engine's notion of range.
    pub fn range(&self) -> f64 {
        self.max() / self.min()
    }

    pub fn sum(&self) -> f64 {
        self.numeric_values().iter().sum()
    }

    pub fn sum_sqrs(&self) -> f64 {
        self.numeric_values().iter().map(|v| v * v).sum()
    }

    /// Sum of the numeric elements over the full list length, so a list
    /// with no numeric elements has mean 0.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.sum() / self.data.len() as f64
    }

    /// Quantile `i` in [0,1] over the sorted numeric elements; 0 when
    /// nothing is numeric.
    pub fn qi(&self, i: f64) -> f64 {
        let mut nums = self.numeric_values();
        nums.sort_by(f64::total_cmp);
        let m = nums.len();
        if m == 0 {
            return 0.0;
        }
        let pos = m as f64 * i;
        if pos.ceil() == pos {
            let k = pos as usize;
            if k == 0 {
                return nums[0];
            }
            if k >= m {
                return nums[m - 1];
            }
            (nums[k - 1] + nums[k]) / 2.0
        } else {
            let k = (pos.ceil() as usize).clamp(1, m);
            nums[k - 1]
        }
    }

    pub fn median(&self) -> f64 {
        self.qi(0.5)
    }

    pub fn geometric_mean(&self) -> f64 {
        let nums = self.numeric_values();
        if nums.is_empty() {
            return 0.0;
        }
        let product: f64 = nums.iter().product();
        (product.ln() / nums.len() as f64).exp()
    }

    pub fn harmonic_mean(&self) -> f64 {
        let nums = self.numeric_values();
        if nums.is_empty() {
            return 0.0;
        }
        nums.len() as f64 / nums.iter().map(|v| 1.0 / v).sum::<f64>()
    }

    /// Sample variance (n-1 denominator) over the numeric elements; 0 when
    /// fewer than two are numeric.
    pub fn variance(&self) -> f64 {
        let nums = self.numeric_values();
        if nums.len() < 2 {
            return 0.0;
        }
        let mean = nums.iter().sum::<f64>() / nums.len() as f64;
        nums.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nums.len() - 1) as f64
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    // -- string forms ------------------------------------------------------

    /// Comma-and-space separated string forms.
    pub fn to_csv(&self) -> LslString {
        let joined = self
            .data
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        LslString(joined)
    }

    /// Split a CSV row into string elements. Commas inside `<...>`
    /// vector/rotation literals do not split; pieces are trimmed.
    pub fn from_csv(csv: &str) -> List {
        let mut out = Vec::new();
        let mut depth = 0usize;
        let mut piece = String::new();
        for ch in csv.chars() {
            match ch {
                '<' => {
                    depth += 1;
                    piece.push(ch);
                }
                '>' => {
                    depth = depth.saturating_sub(1);
                    piece.push(ch);
                }
                ',' if depth == 0 => {
                    out.push(Value::String(LslString::new(piece.trim())));
                    piece.clear();
                }
                _ => piece.push(ch),
            }
        }
        out.push(Value::String(LslString::new(piece.trim())));
        List::from(out)
    }

    /// All element string forms concatenated with no separator.
    pub fn to_soup(&self) -> String {
        let mut out = String::new();
        for v in &self.data {
            out.push_str(&v.to_string());
        }
        out
    }
}

/// Compare two values of the same variant; numbers by value, strings by
/// ordinal order, vectors and rotations by magnitude.
fn compare_same(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Integer(l), Value::Integer(r)) => l.cmp(r),
        (Value::Float(l), Value::Float(r)) => l.0.partial_cmp(&r.0).unwrap_or(Ordering::Equal),
        (Value::String(l), Value::String(r)) => l.0.cmp(&r.0),
        (Value::Vector(l), Value::Vector(r)) => {
            l.mag().partial_cmp(&r.mag()).unwrap_or(Ordering::Equal)
        }
        (Value::Rotation(l), Value::Rotation(r)) => {
            l.mag().partial_cmp(&r.mag()).unwrap_or(Ordering::Equal)
        }
        _ => Ordering::Equal,
    }
}

/// Feathered comparison: unlike variants are equal, so they are never
/// swapped past each other.
fn feathered_compare(a: &Value, b: &Value, ascending: bool) -> Ordering {
    if discriminant(a) != discriminant(b) {
        return Ordering::Equal;
    }
    let ord = compare_same(a, b);
    if ascending {
        ord
    } else {
        ord.reverse()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_soup())
    }
}

impl From<Vec<Value>> for List {
    fn from(data: Vec<Value>) -> Self {
        List { data }
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List {
            data: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Concatenation.
impl Add for List {
    type Output = List;
    fn add(mut self, rhs: List) -> List {
        self.data.extend(rhs.data);
        self
    }
}

/// Append one element, producing a new list.
impl Add<Value> for List {
    type Output = List;
    fn add(mut self, rhs: Value) -> List {
        self.data.push(rhs);
        self
    }
}
