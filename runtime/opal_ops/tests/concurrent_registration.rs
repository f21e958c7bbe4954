//! Concurrent first-use stress tests for the type registry.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use opal_ops::{registry, OpBase, Operator, TypeCode, TypeIdentity, TypeRegistry};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Barrier;
use std::thread;

const THREADS: usize = 8;

type Constructor = fn() -> Box<dyn Operator>;

macro_rules! stress_operators {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Default, Operator)]
            struct $name {
                base: OpBase<Self>,
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))
                }
            }
        )*

        fn constructors() -> Vec<Constructor> {
            vec![$((|| Box::new($name::default()) as Box<dyn Operator>) as Constructor),*]
        }

        fn stress_identities() -> Vec<TypeIdentity> {
            vec![$(TypeIdentity::of::<$name>()),*]
        }
    };
}

stress_operators!(
    Op00, Op01, Op02, Op03, Op04, Op05, Op06, Op07, Op08, Op09, Op10, Op11, Op12, Op13, Op14,
    Op15,
);

fn primitive_identities() -> Vec<TypeIdentity> {
    vec![
        TypeIdentity::of::<u8>(),
        TypeIdentity::of::<u16>(),
        TypeIdentity::of::<u32>(),
        TypeIdentity::of::<u64>(),
        TypeIdentity::of::<u128>(),
        TypeIdentity::of::<usize>(),
        TypeIdentity::of::<i8>(),
        TypeIdentity::of::<i16>(),
        TypeIdentity::of::<i32>(),
        TypeIdentity::of::<i64>(),
        TypeIdentity::of::<i128>(),
        TypeIdentity::of::<isize>(),
        TypeIdentity::of::<f32>(),
        TypeIdentity::of::<f64>(),
        TypeIdentity::of::<bool>(),
        TypeIdentity::of::<char>(),
    ]
}

/// Every thread constructs every operator type at once, each starting at a
/// different type. All threads must agree on one code per type and the
/// ledger must hold each type exactly once.
#[test]
fn test_concurrent_first_construction() {
    let barrier = Barrier::new(THREADS);

    let observed: Vec<Vec<(TypeIdentity, TypeCode)>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    let mut makers = constructors();
                    let n = makers.len();
                    makers.rotate_left(t * 2 % n);
                    makers
                        .iter()
                        .map(|make| make())
                        .map(|op| (op.type_identity(), op.typecode()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut codes: FxHashMap<TypeIdentity, TypeCode> = FxHashMap::default();
    for (identity, code) in observed.into_iter().flatten() {
        let agreed = *codes.entry(identity).or_insert(code);
        assert_eq!(agreed, code, "threads disagree on the code of {identity}");
    }

    let identities = stress_identities();
    assert_eq!(codes.len(), identities.len());

    // No two types share a code.
    let mut distinct: Vec<TypeCode> = codes.values().copied().collect();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), identities.len());

    // Each type appears in the ledger exactly once, under its code.
    let snapshot = registry().snapshot();
    for identity in identities {
        let code = codes[&identity];
        assert_eq!(snapshot[code], identity);
        let entries = snapshot.iter().filter(|(_, id)| *id == identity).count();
        assert_eq!(entries, 1, "{identity} registered {entries} times");
    }
}

/// Many parallel registrations of a fixed set of identities into one
/// registry produce exactly one dense entry per identity.
#[test]
fn test_parallel_register_dense_and_unique() {
    let ledger = TypeRegistry::new();
    let pool = primitive_identities();

    let results: Vec<(TypeIdentity, TypeCode)> = (0..20_000usize)
        .into_par_iter()
        .map(|i| {
            let identity = pool[(i * 7) % pool.len()];
            (identity, ledger.register(identity))
        })
        .collect();

    assert_eq!(ledger.len(), pool.len());

    let snapshot = ledger.snapshot();
    for (identity, code) in results {
        assert_eq!(snapshot[code], identity);
    }

    // Dense: codes cover exactly 0..N.
    let mut codes: Vec<usize> = pool
        .iter()
        .map(|&identity| ledger.code_of(identity).unwrap().index())
        .collect();
    codes.sort_unstable();
    assert_eq!(codes, (0..pool.len()).collect::<Vec<_>>());
}

/// Racing first registrations of one identity agree on one code.
#[test]
fn test_same_identity_race() {
    let ledger = TypeRegistry::new();
    let barrier = Barrier::new(THREADS);
    let identity = TypeIdentity::of::<[u8; 32]>();

    let codes: Vec<TypeCode> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    ledger.register(identity)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(codes.iter().all(|&c| c == codes[0]));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.resolve(codes[0]), identity);
}
