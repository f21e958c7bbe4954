//! Error: without an `OpBase<Self>` field an instance could exist before
//! its type is registered.

#![allow(dead_code)]

use opal_ops::Operator;

#[derive(Operator)]
struct Bare;

fn main() {}
