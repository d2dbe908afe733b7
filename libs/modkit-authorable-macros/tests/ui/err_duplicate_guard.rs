// Each key may be given once.
#![allow(dead_code)]

use modkit_authorable_macros::Authorable;

#[derive(Authorable)]
#[authorable(guard = "api", guard = "web")]
struct Model {
    id: i64,
}

fn main() {}
