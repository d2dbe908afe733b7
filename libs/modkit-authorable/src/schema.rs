//! Migration helpers adding or dropping the two author columns.
//!
//! ```rust,ignore
//! async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
//!     AuthorableColumns::new("posts").add_columns(manager).await
//! }
//!
//! async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
//!     AuthorableColumns::new("posts").drop_columns(manager).await
//! }
//! ```

use sea_orm::sea_query::{
    Alias, ColumnDef, Expr, ForeignKey, ForeignKeyAction, ForeignKeyCreateStatement, Index,
    IndexCreateStatement, Query, SelectStatement, Table, TableCreateStatement,
};
use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr};
use sea_orm_migration::SchemaManager;

use crate::config::ResolvedConfig;

/// A schema object created by [`AuthorableColumns::add_columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaObject {
    Column { name: String },
    Index { name: String, column: String },
    ForeignKey { name: String, column: String },
}

/// Author columns of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorableColumns {
    table: String,
    users_table: String,
    users_key: String,
    big_integer: bool,
    created_by: String,
    updated_by: String,
}

impl AuthorableColumns {
    /// `created_by` / `updated_by` big-integer columns referencing `users(id)`.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            users_table: "users".to_owned(),
            users_key: "id".to_owned(),
            big_integer: true,
            created_by: "created_by".to_owned(),
            updated_by: "updated_by".to_owned(),
        }
    }

    /// Column names and users table taken from resolved entity settings.
    #[must_use]
    pub fn from_config(table: impl Into<String>, config: &ResolvedConfig) -> Self {
        Self::new(table)
            .users_table(config.users_model.clone())
            .column_names(
                config.created_by_column_name.clone(),
                config.updated_by_column_name.clone(),
            )
    }

    /// Big (64-bit) or standard integer columns.
    #[must_use]
    pub fn big_integer(mut self, big_integer: bool) -> Self {
        self.big_integer = big_integer;
        self
    }

    #[must_use]
    pub fn users_table(mut self, users_table: impl Into<String>) -> Self {
        self.users_table = users_table.into();
        self
    }

    #[must_use]
    pub fn users_key(mut self, users_key: impl Into<String>) -> Self {
        self.users_key = users_key.into();
        self
    }

    #[must_use]
    pub fn column_names(
        mut self,
        created_by: impl Into<String>,
        updated_by: impl Into<String>,
    ) -> Self {
        self.created_by = created_by.into();
        self.updated_by = updated_by.into();
        self
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Objects created by `add_columns`, in creation order.
    ///
    /// `SQLite` cannot add or drop a foreign key on an existing table, so no
    /// foreign keys are planned there.
    #[must_use]
    pub fn plan(&self, backend: DatabaseBackend) -> Vec<SchemaObject> {
        let mut objects = Vec::with_capacity(6);
        for column in [&self.created_by, &self.updated_by] {
            objects.push(SchemaObject::Column {
                name: column.clone(),
            });
            objects.push(SchemaObject::Index {
                name: self.index_name(column),
                column: column.clone(),
            });
            if backend != DatabaseBackend::Sqlite {
                objects.push(SchemaObject::ForeignKey {
                    name: self.foreign_key_name(column),
                    column: column.clone(),
                });
            }
        }
        objects
    }

    /// Add both columns to an existing table.
    ///
    /// # Errors
    /// Returns the database error of the first failing statement.
    pub async fn add_columns(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        tracing::info!(table = %self.table, users = %self.users_table, "Adding author columns");

        for object in self.plan(backend) {
            match object {
                SchemaObject::Column { name } => {
                    manager
                        .alter_table(
                            Table::alter()
                                .table(Alias::new(self.table.as_str()))
                                .add_column(&mut self.column_def(&name))
                                .to_owned(),
                        )
                        .await?;
                }
                SchemaObject::Index { name, column } => {
                    manager.create_index(self.index(&name, &column)).await?;
                }
                SchemaObject::ForeignKey { name, column } => {
                    manager
                        .create_foreign_key(self.foreign_key(&name, &column))
                        .await?;
                }
            }
        }
        Ok(())
    }

    /// Drop the columns, indexes and foreign keys that `add_columns` created,
    /// skipping the ones that are already gone. Foreign keys are looked up
    /// by name in `information_schema`.
    ///
    /// # Errors
    /// Returns the database error of the first failing statement.
    pub async fn drop_columns(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        tracing::info!(table = %self.table, "Dropping author columns");

        for object in self.plan(backend).into_iter().rev() {
            match object {
                SchemaObject::ForeignKey { name, .. } => {
                    if self.has_foreign_key(manager, &name).await? {
                        manager
                            .drop_foreign_key(
                                ForeignKey::drop()
                                    .name(name.as_str())
                                    .table(Alias::new(self.table.as_str()))
                                    .to_owned(),
                            )
                            .await?;
                    }
                }
                SchemaObject::Index { name, .. } => {
                    if manager.has_index(&self.table, &name).await? {
                        manager
                            .drop_index(
                                Index::drop()
                                    .name(name.as_str())
                                    .table(Alias::new(self.table.as_str()))
                                    .to_owned(),
                            )
                            .await?;
                    }
                }
                SchemaObject::Column { name } => {
                    if manager.has_column(&self.table, &name).await? {
                        manager
                            .alter_table(
                                Table::alter()
                                    .table(Alias::new(self.table.as_str()))
                                    .drop_column(Alias::new(name.as_str()))
                                    .to_owned(),
                            )
                            .await?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Append the columns and foreign keys of [`AuthorableColumns::plan`] to a
    /// table being created, so [`AuthorableColumns::drop_columns`] can undo
    /// them. Pair with [`AuthorableColumns::index_statements`].
    pub fn create_table_columns(
        &self,
        table: &mut TableCreateStatement,
        backend: DatabaseBackend,
    ) {
        for object in self.plan(backend) {
            match object {
                SchemaObject::Column { name } => {
                    table.col(&mut self.column_def(&name));
                }
                SchemaObject::ForeignKey { name, column } => {
                    table.foreign_key(&mut self.foreign_key(&name, &column));
                }
                SchemaObject::Index { .. } => {}
            }
        }
    }

    /// Index statements for both columns.
    #[must_use]
    pub fn index_statements(&self) -> Vec<IndexCreateStatement> {
        [&self.created_by, &self.updated_by]
            .into_iter()
            .map(|column| self.index(&self.index_name(column), column))
            .collect()
    }

    async fn has_foreign_key(
        &self,
        manager: &SchemaManager<'_>,
        name: &str,
    ) -> Result<bool, DbErr> {
        let backend = manager.get_database_backend();
        let Some(query) = self.foreign_key_query(backend, name) else {
            return Ok(false);
        };
        Ok(manager
            .get_connection()
            .query_one(backend.build(&query))
            .await?
            .is_some())
    }

    /// Lookup of a named foreign key on this table in `information_schema`.
    fn foreign_key_query(
        &self,
        backend: DatabaseBackend,
        name: &str,
    ) -> Option<SelectStatement> {
        let current_schema = match backend {
            DatabaseBackend::Postgres => "CURRENT_SCHEMA()",
            DatabaseBackend::MySql => "DATABASE()",
            DatabaseBackend::Sqlite => return None,
        };
        Some(
            Query::select()
                .column(Alias::new("constraint_name"))
                .from((
                    Alias::new("information_schema"),
                    Alias::new("table_constraints"),
                ))
                .and_where(Expr::col(Alias::new("constraint_type")).eq("FOREIGN KEY"))
                .and_where(Expr::col(Alias::new("table_schema")).eq(Expr::cust(current_schema)))
                .and_where(Expr::col(Alias::new("table_name")).eq(self.table.as_str()))
                .and_where(Expr::col(Alias::new("constraint_name")).eq(name))
                .to_owned(),
        )
    }

    fn column_def(&self, name: &str) -> ColumnDef {
        let mut def = ColumnDef::new(Alias::new(name));
        if self.big_integer {
            def.big_integer();
        } else {
            def.integer();
        }
        def.null();
        def
    }

    fn index(&self, name: &str, column: &str) -> IndexCreateStatement {
        Index::create()
            .name(name)
            .table(Alias::new(self.table.as_str()))
            .col(Alias::new(column))
            .to_owned()
    }

    fn foreign_key(&self, name: &str, column: &str) -> ForeignKeyCreateStatement {
        ForeignKey::create()
            .name(name)
            .from(Alias::new(self.table.as_str()), Alias::new(column))
            .to(
                Alias::new(self.users_table.as_str()),
                Alias::new(self.users_key.as_str()),
            )
            .on_delete(ForeignKeyAction::SetNull)
            .to_owned()
    }

    fn index_name(&self, column: &str) -> String {
        format!("idx_{}_{column}", self.table)
    }

    fn foreign_key_name(&self, column: &str) -> String {
        format!("fk_{}_{column}", self.table)
    }
}
