use opal_ops::{Fallback, FallbackResult, Kind, OpBase, Operator, ValueRef};
use std::fmt;

#[derive(Debug, Operator)]
#[operator(kind = IdentityLike, fallback)]
struct Echo {
    base: OpBase<Echo>,
    label: String,
}

impl fmt::Display for Echo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Echo({})", self.label)
    }
}

impl Fallback for Echo {
    fn compute(&self, inputs: &[ValueRef]) -> FallbackResult {
        Ok(inputs.to_vec())
    }
}

fn main() {
    let op: Box<dyn Operator> = Box::new(Echo {
        base: OpBase::new(),
        label: "e".to_owned(),
    });
    assert!(op.is_kind(Kind::IdentityLike));
    assert_eq!(op.fallback(&[]).map(|v| v.len()), Ok(0));
    assert_eq!(op.to_string(), "Echo(e)");
}
