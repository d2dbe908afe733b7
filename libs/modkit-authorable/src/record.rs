use std::sync::Arc;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityName,
    EntityTrait, IntoActiveModel,
};

use crate::authorable::{Authorable, column_named};
use crate::config::ResolvedConfig;
use crate::entity::AuthorableEntity;
use crate::error::AuthorableError;
use crate::guard::Guard;
use crate::key::coerce_key;

/// One in-flight record with attribution attached.
///
/// The guard is resolved on first use and kept for the lifetime of the
/// record, so a create that stamps both columns asks the resolver once.
pub struct AuthoredRecord<'a, A> {
    authorable: &'a Authorable,
    model: A,
    guard: Option<Arc<dyn Guard>>,
}

impl<'a, A> AuthoredRecord<'a, A>
where
    A: ActiveModelTrait,
    A::Entity: AuthorableEntity,
{
    pub(crate) fn new(authorable: &'a Authorable, model: A) -> Self {
        Self {
            authorable,
            model,
            guard: None,
        }
    }

    /// On-create hook: stamps the created-by column, then the updated-by
    /// column (a new record also counts as updated).
    ///
    /// # Errors
    /// Returns an error if the configured guard or column does not exist.
    pub fn creating(&mut self) -> Result<(), AuthorableError> {
        let settings = self.authorable.settings::<A::Entity>();
        if settings.set_author_when_creating {
            self.stamp(&settings.guard, &settings.created_by_column_name)?;
        }
        self.stamp_updated_by(&settings)
    }

    /// On-update hook: stamps the updated-by column.
    ///
    /// # Errors
    /// Returns an error if the configured guard or column does not exist.
    pub fn updating(&mut self) -> Result<(), AuthorableError> {
        let settings = self.authorable.settings::<A::Entity>();
        self.stamp_updated_by(&settings)
    }

    /// Run the on-create hook and insert the record.
    ///
    /// # Errors
    /// Returns attribution errors, or `AuthorableError::Db` if the insert fails.
    pub async fn insert<'c, C>(
        mut self,
        conn: &'c C,
    ) -> Result<<A::Entity as EntityTrait>::Model, AuthorableError>
    where
        C: ConnectionTrait,
        A: ActiveModelBehavior + Send + 'c,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        self.creating()?;
        Ok(self.model.insert(conn).await?)
    }

    /// Run the on-update hook and update the record.
    ///
    /// # Errors
    /// Returns attribution errors, or `AuthorableError::Db` if the update fails.
    pub async fn update<'c, C>(
        mut self,
        conn: &'c C,
    ) -> Result<<A::Entity as EntityTrait>::Model, AuthorableError>
    where
        C: ConnectionTrait,
        A: ActiveModelBehavior + Send + 'c,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        self.updating()?;
        Ok(self.model.update(conn).await?)
    }

    #[must_use]
    pub fn model(&self) -> &A {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut A {
        &mut self.model
    }

    #[must_use]
    pub fn into_inner(self) -> A {
        self.model
    }

    fn stamp_updated_by(&mut self, settings: &ResolvedConfig) -> Result<(), AuthorableError> {
        if settings.set_author_when_updating {
            self.stamp(&settings.guard, &settings.updated_by_column_name)?;
        }
        Ok(())
    }

    fn stamp(&mut self, guard_name: &str, column_name: &str) -> Result<(), AuthorableError> {
        let column = column_named::<A::Entity>(column_name)?;
        let table = A::Entity::default().table_name().to_owned();

        let Some(user) = self.guard(guard_name)?.user() else {
            tracing::trace!(
                table = %table,
                column = column_name,
                guard = guard_name,
                "No authenticated user, author column left unset"
            );
            return Ok(());
        };

        tracing::debug!(
            table = %table,
            column = column_name,
            user_type = user.user_type(),
            "Stamping author column"
        );
        let invalid = |reason: String| AuthorableError::InvalidKey {
            table: table.clone(),
            column: column_name.to_owned(),
            reason,
        };
        let key = coerce_key(user.key(), column.def().get_column_type())
            .ok_or_else(|| invalid("key out of range for the column type".to_owned()))?;
        self.model
            .try_set(column, key)
            .map_err(|e| invalid(e.to_string()))
    }

    fn guard(&mut self, name: &str) -> Result<Arc<dyn Guard>, AuthorableError> {
        if let Some(guard) = &self.guard {
            return Ok(Arc::clone(guard));
        }
        let guard = self.authorable.resolve_guard(name)?;
        self.guard = Some(Arc::clone(&guard));
        Ok(guard)
    }
}
