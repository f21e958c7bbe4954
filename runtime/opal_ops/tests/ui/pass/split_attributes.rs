use opal_ops::{Fallback, FallbackResult, Kind, OpBase, Operator, OperatorType, Value, ValueRef};
use std::fmt;

#[derive(Debug, Clone, Copy)]
enum Dim {
    Rank,
    Size,
}

// Options may be spread across several attributes; the base may be a tuple
// field.
#[derive(Debug, Operator)]
#[operator(kind = GetAttrLike)]
#[operator(fallback)]
struct Query(Dim, opal_ops::OpBase<Self>);

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Query::{:?}", self.0)
    }
}

impl Fallback for Query {
    fn compute(&self, _inputs: &[ValueRef]) -> FallbackResult {
        let answer = match self.0 {
            Dim::Rank => 0,
            Dim::Size => 1,
        };
        Ok(vec![ValueRef::new(Value::Int(answer))])
    }
}

fn main() {
    assert_eq!(<Query as OperatorType>::KIND, Kind::GetAttrLike);
    for dim in [Dim::Rank, Dim::Size] {
        let query = Query(dim, OpBase::new());
        let op: &dyn Operator = &query;
        assert!(op.is::<Query>());
        assert_eq!(op.typecode(), Query::type_code());
        assert_eq!(op.fallback(&[]).map(|v| v.len()), Ok(1));
    }
}
