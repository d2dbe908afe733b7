/// Errors raised while stamping authors or building author relations.
#[derive(thiserror::Error, Debug)]
pub enum AuthorableError {
    /// No guard is registered under the configured name.
    #[error("authentication guard '{0}' is not defined")]
    UnknownGuard(String),

    /// The configured attribution column does not exist on the entity.
    #[error("column '{column}' does not exist on table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// The user's key cannot be stored in the author column.
    #[error("user key does not fit column '{column}' on table '{table}': {reason}")]
    InvalidKey {
        table: String,
        column: String,
        reason: String,
    },

    /// The configured users model cannot serve the requested relation.
    #[error("users model mismatch: configured '{configured}', relation targets '{target}'")]
    UsersModel { configured: String, target: String },

    /// The users entity declares no primary key column.
    #[error("entity '{0}' has no primary key column")]
    MissingPrimaryKey(String),

    /// Database error while loading a related user.
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

impl From<AuthorableError> for sea_orm::DbErr {
    fn from(err: AuthorableError) -> Self {
        match err {
            AuthorableError::Db(db) => db,
            other => sea_orm::DbErr::Custom(other.to_string()),
        }
    }
}
