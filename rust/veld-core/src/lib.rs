//! Veld Core
//!
//! LSL value types and the heterogeneous list container shared across the
//! scripting API surface: tagged scalars with script-faithful cast
//! grammars, vector/rotation math, and list slicing, sorting, and
//! statistics.

pub mod list;
pub mod scalar;
pub mod value;
pub mod vector;

pub use list::{List, ListError};
pub use scalar::{Float, Integer, LslString, FLOAT_TOLERANCE};
pub use value::Value;
pub use vector::{Quaternion, Vector3};
