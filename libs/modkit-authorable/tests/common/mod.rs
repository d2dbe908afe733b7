#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use modkit_authorable::{AuthManager, Authorable, AuthorableConfig, ContextGuard, Principal};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectOptions, ConnectionTrait, Database,
    DatabaseConnection, EntityTrait, Schema,
};

pub mod user {
    use modkit_authorable::AuthorEntity;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,
        pub name: String,
        pub deleted_at: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl AuthorEntity for Entity {
        fn deleted_at_column() -> Option<Column> {
            Some(Column::DeletedAt)
        }
    }
}

pub mod admin {
    use modkit_authorable::AuthorEntity;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "admins")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl AuthorEntity for Entity {}
}

/// User entity with a standard-width key.
pub mod member {
    use modkit_authorable::AuthorEntity;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "members")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i32,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl AuthorEntity for Entity {}
}

/// Default column names, global settings only.
pub mod post {
    use modkit_authorable::Authorable;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Authorable)]
    #[sea_orm(table_name = "posts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,
        pub title: String,
        pub created_by: Option<i64>,
        pub updated_by: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Custom column names.
pub mod article {
    use modkit_authorable::Authorable;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Authorable)]
    #[sea_orm(table_name = "articles")]
    #[authorable(
        created_by_column_name = "author_id",
        updated_by_column_name = "editor_id"
    )]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,
        pub title: String,
        pub author_id: Option<i64>,
        pub editor_id: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Created-by stamping switched off.
pub mod note {
    use modkit_authorable::Authorable;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Authorable)]
    #[sea_orm(table_name = "notes")]
    #[authorable(set_author_when_creating = false)]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i64,
        pub body: String,
        pub created_by: Option<i64>,
        pub updated_by: Option<i64>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Standard-width author columns.
pub mod memo {
    use modkit_authorable::Authorable;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Authorable)]
    #[sea_orm(table_name = "memos")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i32,
        pub body: String,
        pub created_by: Option<i32>,
        pub updated_by: Option<i32>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub const ADA: i64 = 7;
pub const GRACE: i64 = 8;
/// Soft-deleted user.
pub const LINUS: i64 = 9;

/// Single-connection in-memory `SQLite` database.
pub async fn connect() -> Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    Ok(Database::connect(opts).await?)
}

pub async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<()> {
    let backend = db.get_database_backend();
    let stmt = Schema::new(backend).create_table_from_entity(entity);
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// All test tables, with users ada (7), grace (8), linus (9, soft-deleted)
/// and admin 7.
pub async fn setup() -> Result<DatabaseConnection> {
    let db = connect().await?;
    create_table(&db, user::Entity).await?;
    create_table(&db, admin::Entity).await?;
    create_table(&db, post::Entity).await?;
    create_table(&db, article::Entity).await?;
    create_table(&db, note::Entity).await?;
    create_table(&db, member::Entity).await?;
    create_table(&db, memo::Entity).await?;

    let users = [
        (ADA, "ada", None),
        (GRACE, "grace", None),
        (LINUS, "linus", Some(1)),
    ];
    for (id, name, deleted_at) in users {
        user::ActiveModel {
            id: Set(id),
            name: Set(name.to_owned()),
            deleted_at: Set(deleted_at),
        }
        .insert(&db)
        .await?;
    }
    admin::ActiveModel {
        id: Set(ADA),
        name: Set("root".to_owned()),
    }
    .insert(&db)
    .await?;

    Ok(db)
}

pub fn principal(id: i64) -> Principal {
    Principal::new("users", "id", id)
}

/// Attribution with the `web` guard authenticated as `user`, or anonymous.
pub fn authorable_as(user: Option<i64>) -> Authorable {
    authorable_with(AuthorableConfig::default(), user)
}

pub fn authorable_with(config: AuthorableConfig, user: Option<i64>) -> Authorable {
    let guard = match user {
        Some(id) => ContextGuard::authenticated(principal(id)),
        None => ContextGuard::anonymous(),
    };
    Authorable::new(config, Arc::new(AuthManager::new().with_guard("web", guard)))
}

/// Attribution with the `web` guard authenticated as `user`.
pub fn authorable_for(user: Principal) -> Authorable {
    Authorable::new(
        AuthorableConfig::default(),
        Arc::new(AuthManager::new().with_guard("web", ContextGuard::authenticated(user))),
    )
}

pub fn new_post(id: i64, title: &str) -> post::ActiveModel {
    post::ActiveModel {
        id: Set(id),
        title: Set(title.to_owned()),
        ..Default::default()
    }
}
