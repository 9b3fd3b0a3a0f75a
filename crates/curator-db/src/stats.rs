//! Aggregate statistics repository.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::try_join;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;

use curator_core::{DashboardStats, Error, Result, StatsRepository};

/// PostgreSQL implementation of StatsRepository.
pub struct PgStatsRepository {
    pool: Pool<Postgres>,
}

impl PgStatsRepository {
    /// Create a new PgStatsRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn count_where(&self, sql: &'static str) -> Result<i64> {
        sqlx::query_scalar(sql)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn dashboard(&self) -> Result<DashboardStats> {
        let (total_documents, active_documents, metadata_alerts) = try_join!(
            self.count_where("SELECT COUNT(*) FROM documents"),
            self.count_where(
                "SELECT COUNT(*) FROM documents WHERE status IN ('approved', 'published')"
            ),
            self.count_where("SELECT COUNT(*) FROM documents WHERE status = 'pending_approval'"),
        )?;

        debug!(
            subsystem = "db",
            component = "stats",
            op = "dashboard",
            total_documents = total_documents,
            "Dashboard stats computed"
        );

        Ok(DashboardStats {
            total_documents,
            active_documents,
            metadata_alerts,
            // No usage tracking exists yet, so the AI query count and the
            // period-over-period changes are fixed placeholders.
            ai_queries_count: 0,
            total_documents_change: "+5%".to_string(),
            active_documents_change: "+12%".to_string(),
            ai_queries_change: "+18%".to_string(),
        })
    }

    async fn by_department(&self) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query(
            "SELECT department, COUNT(*) AS doc_count FROM documents GROUP BY department",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut stats = HashMap::new();
        for row in rows {
            let department: String = row.try_get("department")?;
            let doc_count: i64 = row.try_get("doc_count")?;
            stats.insert(department, doc_count);
        }
        Ok(stats)
    }
}
