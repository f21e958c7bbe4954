//! Error: Operator derive only supports structs.

#![allow(dead_code)]

use opal_ops::Operator;

#[derive(Operator)]
union Bits {
    int: u32,
    float: f32,
}

fn main() {}
