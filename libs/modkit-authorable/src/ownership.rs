use sea_orm::ModelTrait;

use crate::authorable::{Authorable, column_named};
use crate::entity::AuthorableEntity;
use crate::error::AuthorableError;
use crate::guard::Principal;
use crate::key::same_key;

impl Authorable {
    /// Whether `user` created `record`.
    ///
    /// True iff the record's created-by value equals the user's key and the
    /// user's type is exactly the configured users model.
    ///
    /// # Errors
    /// Returns `AuthorableError::UnknownColumn` if the created-by column does
    /// not exist on the record's entity.
    pub fn is_owner<M>(&self, record: &M, user: &Principal) -> Result<bool, AuthorableError>
    where
        M: ModelTrait,
        M::Entity: AuthorableEntity,
    {
        let settings = self.settings::<M::Entity>();
        let column = column_named::<M::Entity>(&settings.created_by_column_name)?;

        if user.user_type() != settings.users_model {
            tracing::trace!(
                user_type = user.user_type(),
                users_model = %settings.users_model,
                "User type differs from configured users model"
            );
            return Ok(false);
        }

        Ok(same_key(&record.get(column), user.key()))
    }

    /// [`Authorable::is_owner`] for a loaded user model.
    ///
    /// # Errors
    /// Returns `AuthorableError::MissingPrimaryKey` if the user entity has no
    /// primary key, or the errors of [`Authorable::is_owner`].
    pub fn is_owner_model<M, N>(&self, record: &M, user: &N) -> Result<bool, AuthorableError>
    where
        M: ModelTrait,
        M::Entity: AuthorableEntity,
        N: ModelTrait,
    {
        let principal = Principal::from_model(user)?;
        self.is_owner(record, &principal)
    }
}
