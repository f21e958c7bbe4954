//! Built-in structural operators.
//!
//! Every graph runtime needs a handful of operators that only inspect or
//! re-label values: attribute queries, identity and renaming, tensor
//! creation. None of them does arithmetic. Their fallbacks are the portable
//! reference path; backends install faster versions in an `OperatorTable`.

mod attr;
mod create;
mod identity;

pub use attr::{Attr, GetAttr, IsScalar};
pub use create::CreateTensor;
pub use identity::{Identity, RenameValue};

use opal_value::{TensorValue, ValueRef};
use std::fmt;

use crate::error::FallbackError;

/// Check that exactly `N` inputs were passed.
fn exact_inputs<'a, const N: usize>(
    op: &dyn fmt::Display,
    inputs: &'a [ValueRef],
) -> Result<&'a [ValueRef; N], FallbackError> {
    inputs
        .try_into()
        .map_err(|_| FallbackError::arity(op, N, inputs.len()))
}

/// Borrow input `index` as a tensor.
fn tensor_input<'a>(
    op: &dyn fmt::Display,
    index: usize,
    input: &'a ValueRef,
) -> Result<&'a TensorValue, FallbackError> {
    input.as_tensor().ok_or_else(|| {
        FallbackError::invalid_input(op, index, format!("is a {}, not a tensor", input.kind_name()))
    })
}
