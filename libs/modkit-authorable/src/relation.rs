//! Belongs-to associations from a host entity to the user who created or
//! last updated its records.

use std::marker::PhantomData;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityName, EntityTrait, ForeignKeyAction, ModelTrait,
    QueryFilter, RelationDef, Select,
};

use crate::authorable::{Authorable, column_named};
use crate::entity::{AuthorEntity, AuthorableEntity, primary_key_column};
use crate::error::AuthorableError;
use crate::key::is_null;

/// Association from host entity `E` to user entity `U` through one author
/// column.
///
/// Soft-deleted users are included by default when `U` soft-deletes, so
/// historical authorship stays resolvable.
#[derive(Debug, Clone, Copy)]
pub struct AuthorRelation<E: EntityTrait, U: AuthorEntity> {
    column: E::Column,
    with_trashed: bool,
    _user: PhantomData<U>,
}

impl<E: EntityTrait, U: AuthorEntity> AuthorRelation<E, U> {
    fn new(column: E::Column) -> Self {
        Self {
            column,
            with_trashed: U::deleted_at_column().is_some(),
            _user: PhantomData,
        }
    }

    /// Host column holding the author id.
    #[must_use]
    pub fn column(&self) -> E::Column {
        self.column
    }

    /// Whether soft-deleted users are returned.
    #[must_use]
    pub fn includes_trashed(&self) -> bool {
        self.with_trashed
    }

    /// Exclude soft-deleted users.
    #[must_use]
    pub fn without_trashed(mut self) -> Self {
        self.with_trashed = false;
        self
    }

    /// `SeaORM` relation definition: `E.column -> U.<primary key>`, nulled on
    /// user deletion.
    ///
    /// # Errors
    /// Returns `AuthorableError::MissingPrimaryKey` if `U` has no primary key.
    pub fn def(&self) -> Result<RelationDef, AuthorableError> {
        let key = primary_key_column::<U>()?;
        Ok(E::belongs_to(U::default())
            .from(self.column)
            .to(key)
            .on_delete(ForeignKeyAction::SetNull)
            .into())
    }

    /// Query selecting the author of `model`.
    ///
    /// # Errors
    /// Returns `AuthorableError::MissingPrimaryKey` if `U` has no primary key.
    pub fn find_for(&self, model: &E::Model) -> Result<Select<U>, AuthorableError> {
        let key = primary_key_column::<U>()?;
        let mut query = U::find().filter(key.eq(model.get(self.column)));

        if !self.with_trashed
            && let Some(deleted_at) = U::deleted_at_column()
        {
            query = query.filter(deleted_at.is_null());
        }
        Ok(query)
    }

    /// Load the author of `model`; `None` when the column is null or the user
    /// is gone.
    ///
    /// # Errors
    /// Returns `AuthorableError::Db` if the query fails.
    pub async fn fetch<C>(
        &self,
        model: &E::Model,
        conn: &C,
    ) -> Result<Option<U::Model>, AuthorableError>
    where
        C: ConnectionTrait,
    {
        if is_null(&model.get(self.column)) {
            return Ok(None);
        }
        Ok(self.find_for(model)?.one(conn).await?)
    }
}

impl Authorable {
    /// The user who created records of `E`.
    ///
    /// # Errors
    /// Returns `AuthorableError::UsersModel` if the configured user entity is
    /// not `U`, or `AuthorableError::UnknownColumn` if the created-by column
    /// does not exist on `E`.
    pub fn created_by<E, U>(&self) -> Result<AuthorRelation<E, U>, AuthorableError>
    where
        E: AuthorableEntity,
        U: AuthorEntity,
    {
        let settings = self.settings::<E>();
        author_relation(&settings.users_model, &settings.created_by_column_name)
    }

    /// The user who last updated records of `E`.
    ///
    /// # Errors
    /// Same as [`Authorable::created_by`], for the updated-by column.
    pub fn updated_by<E, U>(&self) -> Result<AuthorRelation<E, U>, AuthorableError>
    where
        E: AuthorableEntity,
        U: AuthorEntity,
    {
        let settings = self.settings::<E>();
        author_relation(&settings.users_model, &settings.updated_by_column_name)
    }
}

fn author_relation<E, U>(
    users_model: &str,
    column_name: &str,
) -> Result<AuthorRelation<E, U>, AuthorableError>
where
    E: AuthorableEntity,
    U: AuthorEntity,
{
    let target = U::default().table_name().to_owned();
    if users_model != target {
        return Err(AuthorableError::UsersModel {
            configured: users_model.to_owned(),
            target,
        });
    }

    let column = column_named::<E>(column_name)?;
    Ok(AuthorRelation::new(column))
}
