// Column names must refer to a field or sea_orm column of the model.
#![allow(dead_code)]

use modkit_authorable_macros::Authorable;

#[derive(Authorable)]
#[authorable(created_by_column_name = "author_id")]
struct Model {
    id: i64,
    created_by: Option<i64>,
}

fn main() {}
