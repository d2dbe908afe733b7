#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `ModKit` author attribution for `SeaORM` entities.
//!
//! Stamps the acting user's id into a created-by column when a record is
//! created and into an updated-by column when it is updated. Also provides
//! belongs-to relations to those users, an ownership check, and migration
//! helpers adding the two columns to a table.
//!
//! # Features
//! - `macros` (default): `#[derive(Authorable)]` for per-entity overrides
//! - `db-sqlite`, `db-pg`, `db-mysql`: `SeaORM` drivers
//!
//! # Example
//! ```rust,ignore
//! use modkit_authorable::{AuthManager, Authorable, AuthorableConfig, ContextGuard, Principal};
//!
//! let config = AuthorableConfig::load(Some(Path::new("config/authorable.yaml")))?;
//! let guards = AuthManager::new().with_guard(
//!     "web",
//!     ContextGuard::authenticated(Principal::from_model(&current_user)?),
//! );
//! let authorable = Authorable::new(config, Arc::new(guards));
//!
//! // created_by and updated_by are set to current_user.id
//! let post = authorable.record(new_post).insert(&db).await?;
//!
//! let author = authorable
//!     .created_by::<post::Entity, user::Entity>()?
//!     .fetch(&post, &db)
//!     .await?;
//! assert!(authorable.is_owner_model(&post, &current_user)?);
//! ```

extern crate self as modkit_authorable;

pub mod authorable;
pub mod config;
pub mod entity;
pub mod error;
pub mod guard;
mod key;
mod ownership;
pub mod record;
pub mod relation;
pub mod schema;

pub use authorable::Authorable;
pub use config::{AuthorableConfig, AuthorableOverrides, ConfigError, ResolvedConfig};
pub use entity::{AuthorEntity, AuthorableEntity};
pub use error::AuthorableError;
pub use guard::{AuthManager, ContextGuard, Guard, GuardResolver, Principal};
pub use record::AuthoredRecord;
pub use relation::AuthorRelation;
pub use schema::{AuthorableColumns, SchemaObject};

#[cfg(feature = "macros")]
pub use modkit_authorable_macros::Authorable;
