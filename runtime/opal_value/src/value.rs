//! Values and shared value handles.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::{DType, Shape};

/// Error constructing a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Payload length does not match `shape.numel() * dtype.size_in_bytes()`.
    #[error("tensor of {dtype} {shape} needs {expected} bytes, got {got}")]
    ByteLength {
        dtype: DType,
        shape: Shape,
        expected: usize,
        got: usize,
    },
}

/// An immutable tensor: metadata plus an opaque little-endian payload.
///
/// The payload is shared, so renaming or re-wrapping a tensor never copies
/// its bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TensorValue {
    dtype: DType,
    shape: Shape,
    bytes: Arc<[u8]>,
    name: Option<String>,
}

impl TensorValue {
    /// Create a tensor from a raw payload, validating its length.
    pub fn from_bytes(dtype: DType, shape: Shape, bytes: &[u8]) -> Result<Self, ValueError> {
        let expected = shape.numel() * dtype.size_in_bytes();
        if bytes.len() != expected {
            return Err(ValueError::ByteLength {
                dtype,
                shape,
                expected,
                got: bytes.len(),
            });
        }
        Ok(TensorValue {
            dtype,
            shape,
            bytes: Arc::from(bytes),
            name: None,
        })
    }

    /// Create a `float32` tensor from host data.
    pub fn from_f32(shape: Shape, data: &[f32]) -> Result<Self, ValueError> {
        let bytes: Vec<u8> = data.iter().flat_map(|x| x.to_le_bytes()).collect();
        Self::from_bytes(DType::Float32, shape, &bytes)
    }

    /// Create an `int32` tensor from host data.
    pub fn from_i32(shape: Shape, data: &[i32]) -> Result<Self, ValueError> {
        let bytes: Vec<u8> = data.iter().flat_map(|x| x.to_le_bytes()).collect();
        Self::from_bytes(DType::Int32, shape, &bytes)
    }

    /// A zero-filled tensor of the given type and shape.
    pub fn zeros(dtype: DType, shape: Shape) -> Self {
        let len = shape.numel() * dtype.size_in_bytes();
        TensorValue {
            dtype,
            shape,
            bytes: Arc::from(vec![0u8; len]),
            name: None,
        }
    }

    /// Same payload and metadata under a new name.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        TensorValue {
            dtype: self.dtype,
            shape: self.shape.clone(),
            bytes: Arc::clone(&self.bytes),
            name: Some(name.into()),
        }
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True if both tensors share one payload allocation.
    pub fn shares_payload(&self, other: &TensorValue) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

/// Anything an operator can consume or produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Tensor(TensorValue),
    Shape(Shape),
    DType(DType),
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Tensor(_) => "tensor",
            Value::Shape(_) => "shape",
            Value::DType(_) => "dtype",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
        }
    }

    pub fn as_tensor(&self) -> Option<&TensorValue> {
        match self {
            Value::Tensor(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_tensor(&self) -> bool {
        matches!(self, Value::Tensor(_))
    }
}

impl From<TensorValue> for Value {
    fn from(tensor: TensorValue) -> Self {
        Value::Tensor(tensor)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Tensor(t) => {
                write!(f, "Tensor({}, {}", t.dtype, t.shape)?;
                if let Some(name) = &t.name {
                    write!(f, ", name={name}")?;
                }
                f.write_str(")")
            }
            Value::Shape(s) => write!(f, "{s}"),
            Value::DType(d) => write!(f, "{d}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// Shared, immutable handle to a [`Value`].
///
/// Cloning is a reference-count bump. Handles are `Send + Sync` so operators
/// can be invoked from any execution context.
#[derive(Clone, PartialEq, Eq)]
pub struct ValueRef(Arc<Value>);

impl ValueRef {
    pub fn new(value: Value) -> Self {
        ValueRef(Arc::new(value))
    }

    /// True if both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &ValueRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ValueRef {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Value> for ValueRef {
    fn from(value: Value) -> Self {
        ValueRef::new(value)
    }
}

impl From<TensorValue> for ValueRef {
    fn from(tensor: TensorValue) -> Self {
        ValueRef::new(Value::Tensor(tensor))
    }
}

impl fmt::Debug for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueRef({:?})", &*self.0)
    }
}

impl fmt::Display for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}
