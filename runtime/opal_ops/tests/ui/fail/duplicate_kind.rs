//! Error: kind is fixed once per type.

#![allow(dead_code)]

use opal_ops::{OpBase, Operator};

#[derive(Operator)]
#[operator(kind = IdentityLike)]
#[operator(kind = GetAttrLike)]
struct Twice {
    base: OpBase<Self>,
}

fn main() {}
