// Derive macro applied to a non-struct should abort.
#![allow(dead_code)]

use modkit_authorable_macros::Authorable;

#[derive(Authorable)]
enum NotAStruct {
    A,
    B,
}

fn main() {}
