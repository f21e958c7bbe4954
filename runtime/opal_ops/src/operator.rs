//! Operator base contract.
//!
//! Operators are open: any crate can add a variant by deriving
//! [`Operator`](derive@crate::Operator) on its own type. There is no central
//! enum. Instead each concrete type is assigned a dense `TypeCode` by the
//! registry the first time it is used, and every identity question about an
//! operator is answered by comparing codes.
//!
//! # Dispatch Axes
//!
//! - **By concrete type**: `downcast_ref`, `is`, `cast`. Exact code equality,
//!   never structural or subtype-based.
//! - **By structural kind**: `is_kind`. A coarse `Kind` fixed per type,
//!   used for fast-path decisions that don't care about the concrete variant.
//!
//! Rendering goes through `Display` and the generic reference path through
//! `fallback`. Both are ordinary trait-object methods, independent of the
//! code-based downcast.

use opal_value::ValueRef;
use std::any::{self, Any};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::error::{FallbackError, FallbackResult};
use crate::registry::{registry, TypeCode, TypeIdentity};

/// Structural category of an operator type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Exactly one input and one output; the output mirrors the input.
    IdentityLike,
    /// Produces no tensor output (metadata and attribute queries).
    GetAttrLike,
    #[default]
    Other,
}

/// Registered type code carried by every operator instance.
///
/// `#[derive(Operator)]` requires exactly one field of type `OpBase<Self>`.
/// The field is private and only [`OpBase::new`] (or `Default`) builds one,
/// which registers `T` first, so no instance of `T` can exist before `T`
/// has a code.
pub struct OpBase<T> {
    code: TypeCode,
    marker: PhantomData<fn() -> T>,
}

impl<T: OperatorType> OpBase<T> {
    /// Register `T` if this is its first use and record its code.
    pub fn new() -> Self {
        OpBase {
            code: T::type_code(),
            marker: PhantomData,
        }
    }
}

impl<T> OpBase<T> {
    #[inline]
    pub fn code(&self) -> TypeCode {
        self.code
    }
}

impl<T: OperatorType> Default for OpBase<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for OpBase<T> {
    fn clone(&self) -> Self {
        OpBase {
            code: self.code,
            marker: PhantomData,
        }
    }
}

impl<T> PartialEq for OpBase<T> {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl<T> Eq for OpBase<T> {}

impl<T> Hash for OpBase<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl<T> fmt::Debug for OpBase<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpBase").field(&self.code).finish()
    }
}

/// Base trait of every operator.
///
/// Implement it with `#[derive(Operator)]`, which ties the type to its
/// registered code and fixes its `Kind`. Hand-written impls must return
/// `<Self as OperatorType>::type_code()` from `typecode`, or downcasts will
/// misbehave.
///
/// `Display` is the operator's human-readable rendering; every variant must
/// provide it.
pub trait Operator: Any + Send + Sync + fmt::Display + fmt::Debug + 'static {
    /// Code registered for this operator's concrete type.
    fn typecode(&self) -> TypeCode;

    /// Structural category of this operator's concrete type.
    fn kind(&self) -> Kind;

    fn as_any(&self) -> &dyn Any;

    /// Generic, non-specialised implementation.
    ///
    /// Inputs are borrowed for the duration of the call and never retained.
    /// The default reports [`FallbackError::Unsupported`].
    fn fallback(&self, inputs: &[ValueRef]) -> FallbackResult {
        let _ = inputs;
        Err(FallbackError::Unsupported {
            operator: self.to_string(),
        })
    }
}

/// Static side of an operator type: its lazily registered code and kind.
///
/// Generated by `#[derive(Operator)]`.
pub trait OperatorType: Operator + Sized {
    const KIND: Kind;

    /// Code for `Self`, registered on first call and cached for the rest of
    /// the process. Constructing the first instance makes that call through
    /// its `OpBase`.
    fn type_code() -> TypeCode;
}

/// Reference-path implementation for operators declared with
/// `#[operator(fallback)]`.
///
/// The derive routes `Operator::fallback` here. The method has its own
/// name so a concrete type implementing both traits has no ambiguous
/// `fallback` call.
pub trait Fallback {
    fn compute(&self, inputs: &[ValueRef]) -> FallbackResult;
}

impl dyn Operator {
    /// Identity of the concrete type, resolved through the global registry.
    pub fn type_identity(&self) -> TypeIdentity {
        registry().resolve(self.typecode())
    }

    /// Typed view of this operator if it is exactly a `U`.
    #[inline]
    pub fn downcast_ref<U: OperatorType>(&self) -> Option<&U> {
        if self.typecode() != U::type_code() {
            return None;
        }
        let concrete = self.as_any().downcast_ref::<U>();
        debug_assert!(
            concrete.is_some(),
            "{self:?} reports the type code of {}",
            any::type_name::<U>()
        );
        concrete
    }

    /// True if this operator is exactly a `U`.
    #[inline]
    pub fn is<U: OperatorType>(&self) -> bool {
        self.downcast_ref::<U>().is_some()
    }

    /// True if this operator's type has structural kind `kind`.
    #[inline]
    pub fn is_kind(&self, kind: Kind) -> bool {
        self.kind() == kind
    }

    /// Typed view of an operator already known to be a `U`.
    ///
    /// # Panics
    /// Panics if the operator is not a `U`. Use `downcast_ref` when the type
    /// has not been established by other means (e.g. a table keyed by
    /// `typecode()`).
    pub fn cast<U: OperatorType>(&self) -> &U {
        match self.downcast_ref::<U>() {
            Some(op) => op,
            None => panic!(
                "cannot cast operator {self} ({}) to {}",
                self.type_identity(),
                any::type_name::<U>()
            ),
        }
    }
}
