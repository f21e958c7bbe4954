//! Procedural macros for the Opal runtime.
//!
//! The only macro here is `#[derive(Operator)]`. It is re-exported by
//! `opal_ops` and generates code that refers to `::opal_ops`, so use it
//! through that crate rather than depending on this one directly.

use proc_macro::TokenStream;

mod operator;

/// Register a concrete type as an operator variant.
///
/// Generates `opal_ops::Operator` and `opal_ops::OperatorType` impls: the
/// type's code is registered with the global registry on first use and
/// cached in a per-type `OnceLock`.
///
/// The struct must have exactly one field of type `opal_ops::OpBase<Self>`.
/// Building that field registers the type, so every instance carries a
/// registered code and `typecode()` reads it from there.
///
/// # Attributes
///
/// - `#[operator(kind = IdentityLike)]`: structural kind, one of
///   `IdentityLike`, `GetAttrLike`, `Other` (default).
/// - `#[operator(fallback)]`: route `Operator::fallback` to the type's
///   `opal_ops::Fallback` impl. Without it the operator reports
///   "unsupported".
///
/// The type must also implement `Debug` and `Display`. Enums, unions and
/// generic types are rejected: every instantiation of a generic type would
/// share one code.
///
/// # Example
///
/// ```text
/// #[derive(Debug, Default, Operator)]
/// #[operator(kind = IdentityLike, fallback)]
/// pub struct Identity {
///     base: OpBase<Self>,
/// }
/// ```
#[proc_macro_derive(Operator, attributes(operator))]
pub fn derive_operator(input: TokenStream) -> TokenStream {
    operator::derive_operator(input)
}
