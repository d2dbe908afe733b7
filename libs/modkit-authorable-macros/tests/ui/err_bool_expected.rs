// Switches take bool literals, not strings.
#![allow(dead_code)]

use modkit_authorable_macros::Authorable;

#[derive(Authorable)]
#[authorable(set_author_when_creating = "yes")]
struct Model {
    id: i64,
}

fn main() {}
