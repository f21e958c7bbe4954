//! Process-wide operator type registry.
//!
//! Maps the identity of every concrete operator type to a dense `TypeCode`
//! and back. The ledger is append-only: a code, once issued, names the same
//! type until the process exits, and codes are issued in first-use order
//! starting at 0.
//!
//! # Thread Safety
//! Registration takes a read lock on the fast path and a write lock only
//! when a type is seen for the first time, double-checking after the write
//! lock is acquired. Readers never hold the lock past a snapshot: the ordered
//! identity list is an immutable `Arc<[TypeIdentity]>` replaced wholesale on
//! each new registration, so a `TypeSnapshot` stays valid (and unchanging)
//! while other threads keep registering.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::any::{self, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::sync::{Arc, LazyLock};

/// Identity of a concrete Rust type.
///
/// Equality and hashing use only the `TypeId`; the name is kept for
/// diagnostics and is not guaranteed unique or stable across compilers.
#[derive(Copy, Clone)]
pub struct TypeIdentity {
    id: TypeId,
    name: &'static str,
}

impl TypeIdentity {
    /// Identity of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeIdentity {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn type_id(self) -> TypeId {
        self.id
    }

    /// Human-readable type path, for diagnostics only.
    #[inline]
    pub fn name(self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeIdentity({})", self.name)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Dense code assigned to a registered operator type.
///
/// Codes start at 0 and are only meaningful for the registry that issued
/// them.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeCode(u32);

impl TypeCode {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeCode(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position of this code in a `TypeSnapshot`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeCode({})", self.0)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only view of the registered identities, indexed by code.
///
/// A snapshot never changes after it is taken. Later snapshots of the same
/// registry extend earlier ones; they never shrink or reorder.
#[derive(Clone)]
pub struct TypeSnapshot(Arc<[TypeIdentity]>);

impl TypeSnapshot {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identity registered under `code`, if the code was issued before this
    /// snapshot was taken.
    #[inline]
    pub fn get(&self, code: TypeCode) -> Option<TypeIdentity> {
        self.0.get(code.index()).copied()
    }

    pub fn as_slice(&self) -> &[TypeIdentity] {
        &self.0
    }

    /// Iterate `(code, identity)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeCode, TypeIdentity)> + '_ {
        (0u32..).zip(self.0.iter()).map(|(raw, id)| (TypeCode(raw), *id))
    }
}

impl Index<TypeCode> for TypeSnapshot {
    type Output = TypeIdentity;

    fn index(&self, code: TypeCode) -> &TypeIdentity {
        match self.0.get(code.index()) {
            Some(identity) => identity,
            None => panic!(
                "type code {code} was never issued ({} types registered)",
                self.0.len()
            ),
        }
    }
}

impl fmt::Debug for TypeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

struct Ledger {
    /// Identity to code, for idempotent registration.
    codes: FxHashMap<TypeId, TypeCode>,
    /// Code to identity. Replaced, never mutated in place.
    types: Arc<[TypeIdentity]>,
}

/// Append-only ledger of operator type codes.
///
/// Most code uses the process-wide instance returned by [`registry`].
/// Independent instances exist for tests and embedders that want an
/// isolated code space.
pub struct TypeRegistry {
    ledger: RwLock<Ledger>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry {
            ledger: RwLock::new(Ledger {
                codes: FxHashMap::default(),
                types: Arc::from(Vec::new()),
            }),
        }
    }

    /// Register `identity`, returning its code.
    ///
    /// The first registration of an identity appends it and issues the next
    /// code. Every later registration, from any thread, returns that same
    /// code.
    pub fn register(&self, identity: TypeIdentity) -> TypeCode {
        // Fast path: already registered
        if let Some(&code) = self.ledger.read().codes.get(&identity.id) {
            return code;
        }

        let code = {
            let mut ledger = self.ledger.write();

            // Double-check after acquiring write lock
            if let Some(&code) = ledger.codes.get(&identity.id) {
                return code;
            }

            let len = ledger.types.len();
            let Ok(raw) = u32::try_from(len) else {
                panic!("operator type registry exceeded {} entries", u32::MAX);
            };
            let code = TypeCode(raw);

            let mut types = Vec::with_capacity(len + 1);
            types.extend_from_slice(&ledger.types);
            types.push(identity);
            ledger.types = Arc::from(types);
            ledger.codes.insert(identity.id, code);
            code
        };

        tracing::debug!(type_name = identity.name, code = code.0, "registered operator type");
        code
    }

    /// Current ordered view of all registered identities.
    pub fn snapshot(&self) -> TypeSnapshot {
        TypeSnapshot(Arc::clone(&self.ledger.read().types))
    }

    /// Code previously issued for `identity`, without registering it.
    pub fn code_of(&self, identity: TypeIdentity) -> Option<TypeCode> {
        self.ledger.read().codes.get(&identity.id).copied()
    }

    /// Identity registered under `code`.
    ///
    /// # Panics
    /// Panics if this registry never issued `code`. Holding such a code is a
    /// bug in the caller (e.g. a code taken from a different registry).
    pub fn resolve(&self, code: TypeCode) -> TypeIdentity {
        self.snapshot()[code]
    }

    pub fn len(&self) -> usize {
        self.ledger.read().types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.snapshot())
            .finish()
    }
}

static REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::new);

/// The process-wide operator type registry.
///
/// Created on first use and never torn down before the process exits.
#[inline]
pub fn registry() -> &'static TypeRegistry {
    &REGISTRY
}
