//! Tensor shapes.

use smallvec::SmallVec;
use std::fmt;

/// Dimensions of a tensor, outermost first.
///
/// Most tensors have rank 4 or less, so dims are stored inline.
/// A shape with no dims describes a scalar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape(SmallVec<[usize; 4]>);

impl Shape {
    /// The rank-0 (scalar) shape.
    pub fn scalar() -> Self {
        Shape(SmallVec::new())
    }

    pub fn new(dims: &[usize]) -> Self {
        Shape(SmallVec::from_slice(dims))
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements. A scalar has exactly one.
    pub fn numel(&self) -> usize {
        self.0.iter().product()
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape::new(dims)
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(dims: [usize; N]) -> Self {
        Shape::new(&dims)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{dim}")?;
        }
        // Single-element tuples keep the trailing comma so `(3,)` is not read as `3`.
        if self.0.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}
