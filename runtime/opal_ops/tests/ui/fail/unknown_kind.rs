//! Error: kind must be one of the three structural categories.

#![allow(dead_code)]

use opal_ops::{OpBase, Operator};

#[derive(Operator)]
#[operator(kind = Elementwise)]
struct Add {
    base: OpBase<Self>,
}

fn main() {}
