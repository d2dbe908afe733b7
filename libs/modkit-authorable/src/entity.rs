use sea_orm::{EntityName, EntityTrait, Iterable, PrimaryKeyToColumn};

use crate::config::AuthorableOverrides;
use crate::error::AuthorableError;

/// Contract for entities whose records carry created-by / updated-by columns.
///
/// The only knob is the per-entity override set; everything not overridden
/// comes from the global [`AuthorableConfig`](crate::AuthorableConfig).
///
/// # Example (Manual Implementation)
/// ```rust,ignore
/// impl AuthorableEntity for post::Entity {
///     fn authorable() -> AuthorableOverrides {
///         AuthorableOverrides::new().created_by_column_name("author_id")
///     }
/// }
/// ```
///
/// # Example (Using Derive Macro)
/// ```rust,ignore
/// use modkit_authorable::Authorable;
///
/// #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Authorable)]
/// #[sea_orm(table_name = "posts")]
/// #[authorable(created_by_column_name = "author_id")]
/// pub struct Model {
///     #[sea_orm(primary_key)]
///     pub id: i64,
///     pub author_id: Option<i64>,
///     pub updated_by: Option<i64>,
/// }
/// ```
pub trait AuthorableEntity: EntityTrait {
    /// Per-entity overrides. Default: none.
    fn authorable() -> AuthorableOverrides {
        AuthorableOverrides::default()
    }
}

/// Contract for the user entity that authors point to.
pub trait AuthorEntity: EntityTrait {
    /// Soft-deletion marker column, if the entity soft-deletes.
    ///
    /// Author relations include soft-deleted users so historical authorship
    /// stays resolvable.
    fn deleted_at_column() -> Option<Self::Column> {
        None
    }
}

/// First primary-key column of `E`.
pub(crate) fn primary_key_column<E: EntityTrait>() -> Result<E::Column, AuthorableError> {
    <E::PrimaryKey as Iterable>::iter()
        .next()
        .map(PrimaryKeyToColumn::into_column)
        .ok_or_else(|| AuthorableError::MissingPrimaryKey(E::default().table_name().to_owned()))
}
