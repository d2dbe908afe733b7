use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use sea_orm::{ActiveModelTrait, DbErr, EntityName, EntityTrait};

use crate::config::{AuthorableConfig, ResolvedConfig};
use crate::entity::AuthorableEntity;
use crate::error::AuthorableError;
use crate::guard::{Guard, GuardResolver};
use crate::record::AuthoredRecord;

/// Attribution service, wired once and shared (`Clone` is cheap).
///
/// ```rust,ignore
/// let authorable = Authorable::new(config, Arc::new(
///     AuthManager::new().with_guard("web", ContextGuard::authenticated(principal)),
/// ));
///
/// let post = authorable
///     .record(post::ActiveModel { title: Set("hello".into()), ..Default::default() })
///     .insert(conn)
///     .await?;
/// ```
#[derive(Clone)]
pub struct Authorable {
    config: Arc<AuthorableConfig>,
    guards: Arc<dyn GuardResolver>,
}

impl Authorable {
    #[must_use]
    pub fn new(config: AuthorableConfig, guards: Arc<dyn GuardResolver>) -> Self {
        Self {
            config: Arc::new(config),
            guards,
        }
    }

    /// Global settings.
    #[must_use]
    pub fn config(&self) -> &AuthorableConfig {
        &self.config
    }

    /// Effective settings for entity `E`, recomputed on every call.
    #[must_use]
    pub fn settings<E: AuthorableEntity>(&self) -> ResolvedConfig {
        self.config.resolve(&E::authorable())
    }

    /// Attach attribution to one in-flight record.
    pub fn record<A>(&self, model: A) -> AuthoredRecord<'_, A>
    where
        A: ActiveModelTrait,
        A::Entity: AuthorableEntity,
    {
        AuthoredRecord::new(self, model)
    }

    /// Run the on-create hook and hand the record back.
    ///
    /// # Errors
    /// Returns an error if the configured guard or column does not exist.
    pub fn creating<A>(&self, model: A) -> Result<A, AuthorableError>
    where
        A: ActiveModelTrait,
        A::Entity: AuthorableEntity,
    {
        let mut record = self.record(model);
        record.creating()?;
        Ok(record.into_inner())
    }

    /// Run the on-update hook and hand the record back.
    ///
    /// # Errors
    /// Returns an error if the configured guard or column does not exist.
    pub fn updating<A>(&self, model: A) -> Result<A, AuthorableError>
    where
        A: ActiveModelTrait,
        A::Entity: AuthorableEntity,
    {
        let mut record = self.record(model);
        record.updating()?;
        Ok(record.into_inner())
    }

    /// Adapter for `ActiveModelBehavior::before_save`.
    ///
    /// ```rust,ignore
    /// #[async_trait::async_trait]
    /// impl ActiveModelBehavior for ActiveModel {
    ///     async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    ///     where
    ///         C: ConnectionTrait,
    ///     {
    ///         current_authorable().before_save(self, insert)
    ///     }
    /// }
    /// ```
    ///
    /// # Errors
    /// Attribution errors are reported as `DbErr::Custom`.
    pub fn before_save<A>(&self, model: A, insert: bool) -> Result<A, DbErr>
    where
        A: ActiveModelTrait,
        A::Entity: AuthorableEntity,
    {
        let model = if insert {
            self.creating(model)?
        } else {
            self.updating(model)?
        };
        Ok(model)
    }

    pub(crate) fn resolve_guard(&self, name: &str) -> Result<Arc<dyn Guard>, AuthorableError> {
        self.guards.guard(name)
    }
}

impl fmt::Debug for Authorable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorable")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Look a column of `E` up by name.
pub(crate) fn column_named<E: EntityTrait>(name: &str) -> Result<E::Column, AuthorableError> {
    E::Column::from_str(name).map_err(|_| AuthorableError::UnknownColumn {
        table: E::default().table_name().to_owned(),
        column: name.to_owned(),
    })
}
