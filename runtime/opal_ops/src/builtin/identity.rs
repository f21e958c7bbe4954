//! Identity-like operators: one input, one output shaped like it.

use opal_value::ValueRef;
use std::fmt;

use super::{exact_inputs, tensor_input};
use crate::error::FallbackResult;
use crate::{Fallback, OpBase, Operator};

/// Pass the input through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Operator)]
#[operator(kind = IdentityLike, fallback)]
pub struct Identity {
    base: OpBase<Self>,
}

impl Identity {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Identity")
    }
}

impl Fallback for Identity {
    fn compute(&self, inputs: &[ValueRef]) -> FallbackResult {
        let [input] = exact_inputs::<1>(self, inputs)?;
        Ok(vec![input.clone()])
    }
}

/// Give a tensor a new name. The payload is shared, not copied.
#[derive(Clone, Debug, PartialEq, Eq, Operator)]
#[operator(kind = IdentityLike, fallback)]
pub struct RenameValue {
    base: OpBase<Self>,
    pub name: String,
}

impl RenameValue {
    pub fn new(name: impl Into<String>) -> Self {
        RenameValue {
            base: OpBase::new(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RenameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RenameValue{{name={}}}", self.name)
    }
}

impl Fallback for RenameValue {
    fn compute(&self, inputs: &[ValueRef]) -> FallbackResult {
        let [input] = exact_inputs::<1>(self, inputs)?;
        let tensor = tensor_input(self, 0, input)?;
        Ok(vec![tensor.with_name(self.name.as_str()).into()])
    }
}
