//! Type-code keyed dispatch with fallback.
//!
//! An `OperatorTable` holds the specialised ("fast path") implementations a
//! backend knows about. `apply` looks the operator's code up in the table and
//! runs the handler on a hit; on a miss it runs the operator's generic
//! `fallback`. The returned `ExecutionPath` says which one ran.

use opal_value::ValueRef;
use rustc_hash::FxHashMap;
use std::fmt;

use crate::error::{FallbackError, FallbackResult};
use crate::operator::{Operator, OperatorType};
use crate::registry::TypeCode;

type Handler = Box<dyn Fn(&dyn Operator, &[ValueRef]) -> FallbackResult + Send + Sync>;

/// Which implementation produced a dispatch result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExecutionPath {
    Specialized,
    Fallback,
}

/// Outputs of a dispatch plus the path that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatched {
    pub outputs: Vec<ValueRef>,
    pub path: ExecutionPath,
}

/// Specialised operator implementations keyed by type code.
#[derive(Default)]
pub struct OperatorTable {
    handlers: FxHashMap<TypeCode, Handler>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the specialised implementation for operator type `T`.
    ///
    /// Returns `true` if a previous handler for `T` was replaced.
    pub fn register<T, F>(&mut self, handler: F) -> bool
    where
        T: OperatorType,
        F: Fn(&T, &[ValueRef]) -> FallbackResult + Send + Sync + 'static,
    {
        // The table is keyed by code, so the cast cannot fail.
        let erased: Handler = Box::new(move |op: &dyn Operator, inputs: &[ValueRef]| {
            handler(op.cast::<T>(), inputs)
        });
        self.handlers.insert(T::type_code(), erased).is_some()
    }

    pub fn contains<T: OperatorType>(&self) -> bool {
        self.contains_code(T::type_code())
    }

    pub fn contains_code(&self, code: TypeCode) -> bool {
        self.handlers.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run `op` on `inputs`, preferring a specialised handler.
    ///
    /// Errors from either path are returned unchanged; an operator with no
    /// handler and no fallback yields `FallbackError::Unsupported`.
    #[tracing::instrument(level = "trace", skip_all, fields(op = %op, code = %op.typecode()))]
    pub fn apply(&self, op: &dyn Operator, inputs: &[ValueRef]) -> Result<Dispatched, FallbackError> {
        if let Some(handler) = self.handlers.get(&op.typecode()) {
            let outputs = handler(op, inputs)?;
            return Ok(Dispatched {
                outputs,
                path: ExecutionPath::Specialized,
            });
        }

        tracing::trace!("no specialized handler, running fallback");
        let outputs = op.fallback(inputs)?;
        Ok(Dispatched {
            outputs,
            path: ExecutionPath::Fallback,
        })
    }
}

impl fmt::Debug for OperatorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<_> = self.handlers.keys().copied().collect();
        codes.sort_unstable();
        f.debug_struct("OperatorTable")
            .field("codes", &codes)
            .finish()
    }
}
