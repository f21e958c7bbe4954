//! Attribute queries.

use opal_value::{Value, ValueRef};
use std::fmt;

use super::{exact_inputs, tensor_input};
use crate::error::FallbackResult;
use crate::{Fallback, OpBase, Operator};

/// Tensor attribute read by [`GetAttr`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attr {
    Shape,
    DType,
    NDim,
    /// The tensor's name, or an empty string if it has none.
    Name,
}

/// Read one attribute of a tensor. Produces a non-tensor value.
#[derive(Clone, Debug, PartialEq, Eq, Operator)]
#[operator(kind = GetAttrLike, fallback)]
pub struct GetAttr {
    base: OpBase<Self>,
    pub attr: Attr,
}

impl GetAttr {
    pub fn new(attr: Attr) -> Self {
        GetAttr {
            base: OpBase::new(),
            attr,
        }
    }
}

impl fmt::Display for GetAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GetAttr{{attr={:?}}}", self.attr)
    }
}

impl Fallback for GetAttr {
    fn compute(&self, inputs: &[ValueRef]) -> FallbackResult {
        let [input] = exact_inputs::<1>(self, inputs)?;
        let tensor = tensor_input(self, 0, input)?;

        let value = match self.attr {
            Attr::Shape => Value::Shape(tensor.shape().clone()),
            Attr::DType => Value::DType(tensor.dtype()),
            Attr::NDim => Value::Int(i64::try_from(tensor.shape().ndim()).unwrap_or(i64::MAX)),
            Attr::Name => Value::Str(tensor.name().unwrap_or_default().to_owned()),
        };
        Ok(vec![ValueRef::new(value)])
    }
}

/// True if the input is a rank-0 tensor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Operator)]
#[operator(kind = GetAttrLike, fallback)]
pub struct IsScalar {
    base: OpBase<Self>,
}

impl IsScalar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for IsScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IsScalar")
    }
}

impl Fallback for IsScalar {
    fn compute(&self, inputs: &[ValueRef]) -> FallbackResult {
        let [input] = exact_inputs::<1>(self, inputs)?;
        let tensor = tensor_input(self, 0, input)?;
        Ok(vec![ValueRef::new(Value::Bool(tensor.shape().is_scalar()))])
    }
}
