// Unknown attribute key should abort with a clear message.
#![allow(dead_code)]

use modkit_authorable_macros::Authorable;

#[derive(Authorable)]
#[authorable(does_not_exist = "oops")]
struct Model {
    id: i64,
}

fn main() {}
