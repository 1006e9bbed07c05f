#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid condition row (id {id}): {reason}")]
    InvalidRow { id: i64, reason: String },

    #[error("failed to parse database url: {0}")]
    DatabaseUrl(sqlx::Error),
    #[error("failed to connect to condition store: {0}")]
    Connect(sqlx::Error),
    #[error("failed to apply condition store migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("failed to query condition store: {0}")]
    Query(sqlx::Error),
    #[error("failed to write condition store: {0}")]
    Write(sqlx::Error),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
