//! Opal Ops - open operator registry and dispatch contract.
//!
//! This crate provides:
//! - `TypeRegistry`: process-wide, append-only map from operator type to a
//!   dense `TypeCode`
//! - `Operator`: the base trait, with code-based checked downcasts and a
//!   coarse structural `Kind`
//! - `#[derive(Operator)]`: binds a concrete type to its lazily registered
//!   code and fixed kind; an `OpBase<Self>` field registers the type when
//!   its first instance is built
//! - `OperatorTable`: specialised handlers keyed by type code, falling back
//!   to `Operator::fallback`
//! - Built-in structural operators (`GetAttr`, `IsScalar`, `Identity`, ...)
//!
//! # Architecture
//!
//! The operator family is open. New variants are added by deriving
//! `Operator` in any crate; no central enum is edited. Identity is nominal:
//! two operators are the same variant iff their type codes are equal.

// Lets `#[derive(Operator)]` expand to `::opal_ops::...` inside this crate.
extern crate self as opal_ops;

pub mod builtin;
mod dispatch;
mod error;
mod operator;
mod registry;

pub use dispatch::{Dispatched, ExecutionPath, OperatorTable};
pub use error::{FallbackError, FallbackResult};
pub use opal_macros::Operator;
pub use operator::{Fallback, Kind, OpBase, Operator, OperatorType};
pub use registry::{registry, TypeCode, TypeIdentity, TypeRegistry, TypeSnapshot};

pub use opal_value::{DType, Shape, TensorValue, Value, ValueError, ValueRef};

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=opal_ops=debug` to
/// log every new type registration or `RUST_LOG=opal_ops=trace` to also log
/// each dispatch. Calling it again, or after another subscriber was
/// installed, leaves the existing subscriber in place.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return;
    };
    // Err means a global subscriber already exists.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
