//! Tensor creation.

use opal_value::{DType, Shape};
use std::fmt;

use crate::{OpBase, Operator};

/// Materialise a new tensor on the executing device.
///
/// Has no fallback: where the storage lives is backend-specific, so only a
/// specialised handler can run it.
#[derive(Clone, Debug, PartialEq, Eq, Operator)]
pub struct CreateTensor {
    base: OpBase<Self>,
    pub dtype: DType,
    pub shape: Shape,
}

impl CreateTensor {
    pub fn new(dtype: DType, shape: impl Into<Shape>) -> Self {
        CreateTensor {
            base: OpBase::new(),
            dtype,
            shape: shape.into(),
        }
    }
}

impl fmt::Display for CreateTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CreateTensor{{dtype={}, shape={}}}", self.dtype, self.shape)
    }
}
