//! Veld RT — runtime services consumed by the scripting API surface.
//!
//! Provides the notecard line cache used to serve line-oriented notecard
//! reads with limited retention.
#![warn(clippy::all)]

pub mod services;

// Re-export the value types so API glue can depend on this crate alone.
pub use veld_core::{list, scalar, value, vector};
pub use veld_core::{Float, Integer, List, ListError, LslString, Quaternion, Value, Vector3};
