//! Error: every instantiation of a generic type would share one code.

#![allow(dead_code)]

use opal_ops::{OpBase, Operator};

#[derive(Operator)]
struct Wrapper<T> {
    base: OpBase<Self>,
    value: T,
}

fn main() {}
