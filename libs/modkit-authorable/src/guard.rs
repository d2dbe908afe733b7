//! Acting-user resolution.
//!
//! A [`Guard`] answers "who is authenticated right now". Guards are looked up
//! by name through a [`GuardResolver`]; [`AuthManager`] is the map-backed
//! default. Guards are request-scoped: build an `AuthManager` per request (or
//! per task) from the request's security context.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use sea_orm::{EntityName, IdenStatic, ModelTrait, Value};

use crate::entity::primary_key_column;
use crate::error::AuthorableError;

/// The authenticated user as seen by the attribution layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    user_type: String,
    key_name: String,
    key: Value,
}

impl Principal {
    /// `user_type` is the table name of the user entity.
    #[must_use]
    pub fn new(
        user_type: impl Into<String>,
        key_name: impl Into<String>,
        key: impl Into<Value>,
    ) -> Self {
        Self {
            user_type: user_type.into(),
            key_name: key_name.into(),
            key: key.into(),
        }
    }

    /// Build a principal from a loaded user model, reading its first
    /// primary-key column.
    ///
    /// # Errors
    /// Returns `AuthorableError::MissingPrimaryKey` if the entity declares no
    /// primary key.
    pub fn from_model<M>(model: &M) -> Result<Self, AuthorableError>
    where
        M: ModelTrait,
    {
        let entity = M::Entity::default();
        let column = primary_key_column::<M::Entity>()?;

        Ok(Self {
            user_type: entity.table_name().to_owned(),
            key_name: column.as_str().to_owned(),
            key: model.get(column),
        })
    }

    #[must_use]
    pub fn user_type(&self) -> &str {
        &self.user_type
    }

    #[must_use]
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    #[must_use]
    pub fn key(&self) -> &Value {
        &self.key
    }
}

/// A named authentication mechanism.
pub trait Guard: Send + Sync {
    /// The authenticated principal, if any.
    fn user(&self) -> Option<Principal>;

    /// Whether a principal is currently authenticated.
    fn check(&self) -> bool {
        self.user().is_some()
    }
}

/// Looks guards up by name.
pub trait GuardResolver: Send + Sync {
    /// # Errors
    /// Returns `AuthorableError::UnknownGuard` if no guard has this name.
    fn guard(&self, name: &str) -> Result<Arc<dyn Guard>, AuthorableError>;
}

/// Guard over an already-authenticated (or anonymous) request context.
#[derive(Debug, Clone, Default)]
pub struct ContextGuard {
    principal: Option<Principal>,
}

impl ContextGuard {
    #[must_use]
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    #[must_use]
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }
}

impl Guard for ContextGuard {
    fn user(&self) -> Option<Principal> {
        self.principal.clone()
    }
}

/// Map-backed [`GuardResolver`].
#[derive(Clone, Default)]
pub struct AuthManager {
    guards: HashMap<String, Arc<dyn Guard>>,
}

impl AuthManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `guard` under `name`, replacing any previous guard.
    #[must_use]
    pub fn with_guard(mut self, name: impl Into<String>, guard: impl Guard + 'static) -> Self {
        self.register(name, Arc::new(guard));
        self
    }

    pub fn register(&mut self, name: impl Into<String>, guard: Arc<dyn Guard>) {
        self.guards.insert(name.into(), guard);
    }
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.guards.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("AuthManager").field("guards", &names).finish()
    }
}

impl GuardResolver for AuthManager {
    fn guard(&self, name: &str) -> Result<Arc<dyn Guard>, AuthorableError> {
        self.guards
            .get(name)
            .cloned()
            .ok_or_else(|| AuthorableError::UnknownGuard(name.to_owned()))
    }
}
