//! Opal Value - generic values exchanged by operators.
//!
//! Operators never own their inputs or outputs. A caller hands an ordered
//! slice of [`ValueRef`] to an operator for the duration of one call and
//! receives freshly produced handles back. This crate holds that data model:
//!
//! - [`DType`] and [`Shape`] describe tensor metadata
//! - [`TensorValue`] is an opaque, immutable byte buffer plus metadata
//! - [`Value`] is the closed set of things an operator can consume or produce
//! - [`ValueRef`] is the cheap, thread-safe shared handle passed around
//!
//! No arithmetic lives here. Tensor payloads are stored as raw little-endian
//! bytes and only ever copied or shared, never interpreted.

mod dtype;
mod shape;
mod value;

pub use dtype::DType;
pub use shape::Shape;
pub use value::{TensorValue, Value, ValueError, ValueRef};
