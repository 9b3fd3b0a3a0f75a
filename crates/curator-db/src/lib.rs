//! # curator-db
//!
//! PostgreSQL database layer for curator.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for all core entities
//! - Aggregate statistics queries
//!
//! ## Example
//!
//! ```rust,ignore
//! use curator_db::Database;
//! use curator_core::{CreateDocumentRequest, Department, DocumentRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/curator").await?;
//!
//!     let doc = db.documents.insert(CreateDocumentRequest {
//!         title: "Q3 pricing playbook".to_string(),
//!         description: None,
//!         department: Department::B2b,
//!         classification: Default::default(),
//!         owner_email: "owner@example.com".to_string(),
//!         file_type: None,
//!         file_size_bytes: None,
//!         review_date: None,
//!     }).await?;
//!
//!     println!("Created document: {}", doc.id);
//!     Ok(())
//! }
//! ```

pub mod documents;
pub mod golden_answers;
pub mod pool;
pub mod stats;
pub mod versions;

// Re-export core types
pub use curator_core::*;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// Re-export repository implementations
pub use documents::PgDocumentRepository;
pub use golden_answers::PgGoldenAnswerRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use stats::PgStatsRepository;
pub use versions::PgVersionRepository;

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Document repository for CRUD operations.
    pub documents: PgDocumentRepository,
    /// Document version history repository.
    pub versions: PgVersionRepository,
    /// Golden answer repository.
    pub golden_answers: PgGoldenAnswerRepository,
    /// Aggregate statistics repository.
    pub stats: PgStatsRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            documents: PgDocumentRepository::new(pool.clone()),
            versions: PgVersionRepository::new(pool.clone()),
            golden_answers: PgGoldenAnswerRepository::new(pool.clone()),
            stats: PgStatsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_passthrough() {
        assert_eq!(escape_like("plain title"), "plain title");
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
