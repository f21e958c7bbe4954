//! Error: a type cannot borrow another type's registration.

#![allow(dead_code)]

use opal_ops::{OpBase, Operator};

struct Victim;

#[derive(Operator)]
struct Thief {
    base: OpBase<Victim>,
}

fn main() {}
