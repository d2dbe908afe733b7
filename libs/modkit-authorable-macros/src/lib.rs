//! # modkit-authorable-macros
//!
//! Procedural macros for `modkit-authorable`.
//!
//! ## `#[derive(Authorable)]`
//!
//! Implements `AuthorableEntity` for the `Entity` generated next to a
//! `SeaORM` `Model`, turning `#[authorable(...)]` into per-entity overrides.
//! Options left out fall back to the global `authorable` configuration.
//!
//! ### Example
//!
//! ```ignore
//! use sea_orm::entity::prelude::*;
//! use modkit_authorable::Authorable;
//!
//! #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Authorable)]
//! #[sea_orm(table_name = "articles")]
//! #[authorable(
//!     created_by_column_name = "author_id",
//!     updated_by_column_name = "editor_id",
//!     guard = "api"
//! )]
//! pub struct Model {
//!     #[sea_orm(primary_key)]
//!     pub id: i64,
//!     pub author_id: Option<i64>,
//!     pub editor_id: Option<i64>,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro_error2::proc_macro_error;
use syn::{DeriveInput, parse_macro_input};

mod authorable;

/// Derive macro for implementing `AuthorableEntity`.
///
/// # Attributes
///
/// All keys are optional:
///
/// - `users_model = "users"` - table name of the user entity
/// - `guard = "web"` - guard providing the acting user
/// - `set_author_when_creating = true|false`
/// - `set_author_when_updating = true|false`
/// - `created_by_column_name = "created_by"` - must name a field of the struct
///   or its `#[sea_orm(column_name = "...")]`
/// - `updated_by_column_name = "updated_by"` - must name a field of the struct
///   or its `#[sea_orm(column_name = "...")]`
#[proc_macro_derive(Authorable, attributes(authorable))]
#[proc_macro_error]
pub fn derive_authorable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    authorable::expand_derive_authorable(input).into()
}
