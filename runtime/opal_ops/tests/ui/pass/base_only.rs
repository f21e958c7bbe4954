use opal_ops::{registry, Kind, OpBase, Operator, OperatorType, TypeIdentity};
use std::fmt;

#[derive(Debug, Default, Operator)]
struct Noop {
    base: OpBase<Self>,
}

impl fmt::Display for Noop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Noop")
    }
}

fn main() {
    let noop = Noop::default();
    assert!(registry().code_of(TypeIdentity::of::<Noop>()).is_some());

    let op: &dyn Operator = &noop;
    assert_eq!(op.kind(), Kind::Other);
    assert_eq!(op.typecode(), Noop::type_code());
    assert!(op.fallback(&[]).is_err());
}
