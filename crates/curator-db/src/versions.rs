//! Document version history repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use curator_core::{
    CreateVersionRequest, DocumentVersion, Error, Result, VersionRepository,
};

/// PostgreSQL implementation of VersionRepository.
pub struct PgVersionRepository {
    pool: Pool<Postgres>,
}

impl PgVersionRepository {
    /// Create a new PgVersionRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_version_row(row: &PgRow) -> Result<DocumentVersion> {
    Ok(DocumentVersion {
        id: row.try_get("id")?,
        document_id: row.try_get("document_id")?,
        version_number: row.try_get("version_number")?,
        changelog: row.try_get("changelog")?,
        archive_path: row.try_get("archive_path")?,
        published_path: row.try_get("published_path")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl VersionRepository for PgVersionRepository {
    async fn create(
        &self,
        document_id: Uuid,
        req: CreateVersionRequest,
    ) -> Result<DocumentVersion> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM documents WHERE id = $1)")
                .bind(document_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(Error::Database)?;
        if !exists {
            return Err(Error::DocumentNotFound(document_id));
        }

        // MAX+1 inside the same transaction keeps version numbers
        // monotonically increasing per document.
        let row = sqlx::query(
            "INSERT INTO document_versions \
             (id, document_id, version_number, changelog, archive_path, published_path, created_at)
             VALUES ($1, $2, \
                     COALESCE((SELECT MAX(version_number) FROM document_versions \
                               WHERE document_id = $2), 0) + 1, \
                     $3, $4, $5, $6)
             RETURNING id, document_id, version_number, changelog, archive_path, \
                       published_path, created_at",
        )
        .bind(id)
        .bind(document_id)
        .bind(&req.changelog)
        .bind(&req.archive_path)
        .bind(&req.published_path)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        let version = map_version_row(&row)?;
        debug!(
            subsystem = "db",
            component = "versions",
            op = "create",
            document_id = %document_id,
            version_number = version.version_number,
            "Document version recorded"
        );
        Ok(version)
    }

    async fn list_for_document(&self, document_id: Uuid) -> Result<Vec<DocumentVersion>> {
        let rows = sqlx::query(
            "SELECT id, document_id, version_number, changelog, archive_path, \
                    published_path, created_at
             FROM document_versions WHERE document_id = $1
             ORDER BY version_number DESC",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        rows.iter().map(map_version_row).collect()
    }
}
