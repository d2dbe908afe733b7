//! Global attribution settings and per-entity overrides.
//!
//! Settings live under the `authorable` namespace of the application config:
//!
//! ```yaml
//! authorable:
//!   users_model: users
//!   guard: web
//!   set_author_when_creating: true
//!   set_author_when_updating: true
//!   created_by_column_name: created_by
//!   updated_by_column_name: updated_by
//! ```
//!
//! Entities may override any option (see [`AuthorableOverrides`]). The
//! effective value is computed on every call by [`AuthorableConfig::resolve`].

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Namespace of the attribution settings inside the application config.
pub const CONFIG_NAMESPACE: &str = "authorable";

/// Prefix of environment variables overriding file settings
/// (`AUTHORABLE_GUARD=api`).
pub const ENV_PREFIX: &str = "AUTHORABLE_";

/// Configuration template published by the installer.
pub const CONFIG_TEMPLATE: &str = include_str!("../config/authorable.yaml");

/// Configuration loading errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("invalid '{CONFIG_NAMESPACE}' config: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Process-wide attribution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorableConfig {
    /// Table name of the user entity authors are resolved against.
    pub users_model: String,
    /// Name of the guard that provides the acting user.
    pub guard: String,
    pub set_author_when_creating: bool,
    pub set_author_when_updating: bool,
    pub created_by_column_name: String,
    pub updated_by_column_name: String,
}

impl Default for AuthorableConfig {
    fn default() -> Self {
        Self {
            users_model: "users".to_owned(),
            guard: "web".to_owned(),
            set_author_when_creating: true,
            set_author_when_updating: true,
            created_by_column_name: "created_by".to_owned(),
            updated_by_column_name: "updated_by".to_owned(),
        }
    }
}

impl AuthorableConfig {
    /// Extract settings from the `authorable` namespace of a figment.
    ///
    /// A figment without the namespace yields the defaults; keys missing from
    /// the namespace keep their default values.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the namespace cannot be deserialized.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        if !figment.contains(CONFIG_NAMESPACE) {
            return Ok(Self::default());
        }
        figment
            .extract_inner(CONFIG_NAMESPACE)
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Layered load: defaults -> YAML file (if provided) -> env (`AUTHORABLE_*`).
    ///
    /// # Errors
    /// Returns `ConfigError::FileNotFound` if `path` is given but is not a file,
    /// or `ConfigError::Invalid` if the merged settings are malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment =
            Figment::new().merge(Serialized::default(CONFIG_NAMESPACE, Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }

        let figment = figment.merge(
            Env::prefixed(ENV_PREFIX).map(|key| format!("{CONFIG_NAMESPACE}.{key}").into()),
        );

        Self::from_figment(&figment)
    }

    /// Merge per-entity overrides over these settings.
    ///
    /// Column-name overrides that are empty strings are ignored; any other
    /// present override wins.
    #[must_use]
    pub fn resolve(&self, overrides: &AuthorableOverrides) -> ResolvedConfig {
        ResolvedConfig {
            users_model: overrides
                .users_model
                .clone()
                .unwrap_or_else(|| self.users_model.clone()),
            guard: overrides.guard.clone().unwrap_or_else(|| self.guard.clone()),
            set_author_when_creating: overrides
                .set_author_when_creating
                .unwrap_or(self.set_author_when_creating),
            set_author_when_updating: overrides
                .set_author_when_updating
                .unwrap_or(self.set_author_when_updating),
            created_by_column_name: non_empty(overrides.created_by_column_name.as_deref())
                .unwrap_or(&self.created_by_column_name)
                .to_owned(),
            updated_by_column_name: non_empty(overrides.updated_by_column_name.as_deref())
                .unwrap_or(&self.updated_by_column_name)
                .to_owned(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Per-entity settings. `None` falls back to [`AuthorableConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorableOverrides {
    pub users_model: Option<String>,
    pub guard: Option<String>,
    pub set_author_when_creating: Option<bool>,
    pub set_author_when_updating: Option<bool>,
    pub created_by_column_name: Option<String>,
    pub updated_by_column_name: Option<String>,
}

impl AuthorableOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn users_model(mut self, users_model: impl Into<String>) -> Self {
        self.users_model = Some(users_model.into());
        self
    }

    #[must_use]
    pub fn guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    #[must_use]
    pub fn set_author_when_creating(mut self, enabled: bool) -> Self {
        self.set_author_when_creating = Some(enabled);
        self
    }

    #[must_use]
    pub fn set_author_when_updating(mut self, enabled: bool) -> Self {
        self.set_author_when_updating = Some(enabled);
        self
    }

    #[must_use]
    pub fn created_by_column_name(mut self, column: impl Into<String>) -> Self {
        self.created_by_column_name = Some(column.into());
        self
    }

    #[must_use]
    pub fn updated_by_column_name(mut self, column: impl Into<String>) -> Self {
        self.updated_by_column_name = Some(column.into());
        self
    }
}

/// Effective settings for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub users_model: String,
    pub guard: String,
    pub set_author_when_creating: bool,
    pub set_author_when_updating: bool,
    pub created_by_column_name: String,
    pub updated_by_column_name: String,
}
