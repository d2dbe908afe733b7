// Column names must not be empty.
#![allow(dead_code)]

use modkit_authorable_macros::Authorable;

#[derive(Authorable)]
#[authorable(created_by_column_name = "")]
struct Model {
    id: i64,
    created_by: Option<i64>,
}

fn main() {}
