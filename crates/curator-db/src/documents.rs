//! Document repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use curator_core::{
    CreateDocumentRequest, Document, DocumentRepository, Error, ListDocumentsRequest,
    ListDocumentsResponse, Result, UpdateDocumentRequest,
};

use crate::escape_like;

/// Columns selected for a full document row, in mapping order.
const DOCUMENT_COLUMNS: &str = "id, title, description, department, status, classification, \
     owner_email, drive_file_id, drive_folder_path, notebook_source_id, \
     file_type, file_size_bytes, review_date, created_at, updated_at";

/// PostgreSQL implementation of DocumentRepository.
pub struct PgDocumentRepository {
    pool: Pool<Postgres>,
}

impl PgDocumentRepository {
    /// Create a new PgDocumentRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a database row to a Document.
fn map_document_row(row: &PgRow) -> Result<Document> {
    let department: String = row.try_get("department")?;
    let status: String = row.try_get("status")?;
    let classification: String = row.try_get("classification")?;

    Ok(Document {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        department: department.parse()?,
        status: status.parse()?,
        classification: classification.parse()?,
        owner_email: row.try_get("owner_email")?,
        drive_file_id: row.try_get("drive_file_id")?,
        drive_folder_path: row.try_get("drive_folder_path")?,
        notebook_source_id: row.try_get("notebook_source_id")?,
        file_type: row.try_get("file_type")?,
        file_size_bytes: row.try_get("file_size_bytes")?,
        review_date: row.try_get("review_date")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Build the WHERE clause for a document list request.
///
/// Returns the clause (empty string when unfiltered) and the next free
/// parameter index for LIMIT/OFFSET binding.
fn build_list_filter(req: &ListDocumentsRequest) -> (String, usize) {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx = 1;

    if req.department.is_some() {
        conditions.push(format!("department = ${param_idx}"));
        param_idx += 1;
    }
    if req.status.is_some() {
        conditions.push(format!("status = ${param_idx}"));
        param_idx += 1;
    }
    if req.search.is_some() {
        conditions.push(format!("title ILIKE ${param_idx}"));
        param_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, param_idx)
}

/// Bind list-request filter parameters onto a query, in clause order.
macro_rules! bind_list_filters {
    ($query:expr, $req:expr) => {{
        let mut q = $query;
        if let Some(department) = &$req.department {
            q = q.bind(department.as_str());
        }
        if let Some(status) = &$req.status {
            q = q.bind(status.as_str());
        }
        if let Some(search) = &$req.search {
            q = q.bind(format!("%{}%", escape_like(search)));
        }
        q
    }};
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn insert(&self, req: CreateDocumentRequest) -> Result<Document> {
        req.validate()?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let status = curator_core::DocumentStatus::default();

        sqlx::query(
            "INSERT INTO documents (id, title, description, department, status, classification, \
             owner_email, file_type, file_size_bytes, review_date, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)",
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.department.as_str())
        .bind(status.as_str())
        .bind(req.classification.as_str())
        .bind(&req.owner_email)
        .bind(&req.file_type)
        .bind(req.file_size_bytes)
        .bind(req.review_date)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "documents",
            op = "insert",
            document_id = %id,
            "Document created"
        );

        Ok(Document {
            id,
            title: req.title,
            description: req.description,
            department: req.department,
            status,
            classification: req.classification,
            owner_email: req.owner_email,
            drive_file_id: None,
            drive_folder_path: None,
            notebook_source_id: None,
            file_type: req.file_type,
            file_size_bytes: req.file_size_bytes,
            review_date: req.review_date,
            created_at: now,
            updated_at: now,
        })
    }

    async fn fetch(&self, id: Uuid) -> Result<Document> {
        let row = sqlx::query(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::DocumentNotFound(id))?;

        map_document_row(&row)
    }

    async fn list(&self, req: ListDocumentsRequest) -> Result<ListDocumentsResponse> {
        req.validate()?;

        let (where_clause, param_idx) = build_list_filter(&req);

        // One transaction so the count and the page see the same snapshot.
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let count_sql = format!("SELECT COUNT(*) FROM documents {where_clause}");
        let total: i64 = bind_list_filters!(sqlx::query_scalar(&count_sql), req)
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)?;

        let page_sql = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents {where_clause} \
             ORDER BY updated_at DESC LIMIT ${} OFFSET ${}",
            param_idx,
            param_idx + 1
        );
        let rows = bind_list_filters!(sqlx::query(&page_sql), req)
            .bind(req.page_size)
            .bind(req.offset())
            .fetch_all(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        let items = rows
            .iter()
            .map(map_document_row)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            subsystem = "db",
            component = "documents",
            op = "list",
            result_count = items.len(),
            total = total,
            "Documents listed"
        );

        Ok(ListDocumentsResponse {
            items,
            total,
            page: req.page,
            page_size: req.page_size,
        })
    }

    async fn update(&self, id: Uuid, req: UpdateDocumentRequest) -> Result<Document> {
        req.validate()?;

        // Nothing supplied: return the current row untouched.
        if req.is_empty() {
            return self.fetch(id).await;
        }

        // $1 = now, $2 = id, dynamic params start at $3.
        let mut updates: Vec<String> = vec!["updated_at = $1".to_string()];
        let mut param_idx = 3;

        if req.title.is_some() {
            updates.push(format!("title = ${param_idx}"));
            param_idx += 1;
        }
        match &req.description {
            Some(Some(_)) => {
                updates.push(format!("description = ${param_idx}"));
                param_idx += 1;
            }
            Some(None) => updates.push("description = NULL".to_string()),
            None => {}
        }
        if req.department.is_some() {
            updates.push(format!("department = ${param_idx}"));
            param_idx += 1;
        }
        if req.classification.is_some() {
            updates.push(format!("classification = ${param_idx}"));
            param_idx += 1;
        }
        if req.status.is_some() {
            updates.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        match &req.review_date {
            Some(Some(_)) => {
                updates.push(format!("review_date = ${param_idx}"));
            }
            Some(None) => updates.push("review_date = NULL".to_string()),
            None => {}
        }

        let sql = format!(
            "UPDATE documents SET {} WHERE id = $2 RETURNING {DOCUMENT_COLUMNS}",
            updates.join(", ")
        );

        let mut q = sqlx::query(&sql).bind(Utc::now()).bind(id);
        if let Some(title) = &req.title {
            q = q.bind(title);
        }
        if let Some(Some(description)) = &req.description {
            q = q.bind(description);
        }
        if let Some(department) = &req.department {
            q = q.bind(department.as_str());
        }
        if let Some(classification) = &req.classification {
            q = q.bind(classification.as_str());
        }
        if let Some(status) = &req.status {
            q = q.bind(status.as_str());
        }
        if let Some(Some(review_date)) = &req.review_date {
            q = q.bind(review_date);
        }

        let row = q
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::DocumentNotFound(id))?;

        map_document_row(&row)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::DocumentNotFound(id));
        }

        debug!(
            subsystem = "db",
            component = "documents",
            op = "delete",
            document_id = %id,
            "Document deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_core::{Department, DocumentStatus};

    #[test]
    fn test_build_list_filter_unfiltered() {
        let req = ListDocumentsRequest::default();
        let (clause, next_idx) = build_list_filter(&req);
        assert_eq!(clause, "");
        assert_eq!(next_idx, 1);
    }

    #[test]
    fn test_build_list_filter_all_predicates() {
        let req = ListDocumentsRequest {
            department: Some(Department::B2b),
            status: Some(DocumentStatus::Published),
            search: Some("pricing".to_string()),
            ..Default::default()
        };
        let (clause, next_idx) = build_list_filter(&req);
        assert_eq!(
            clause,
            "WHERE department = $1 AND status = $2 AND title ILIKE $3"
        );
        assert_eq!(next_idx, 4);
    }

    #[test]
    fn test_build_list_filter_search_only() {
        let req = ListDocumentsRequest {
            search: Some("plan".to_string()),
            ..Default::default()
        };
        let (clause, next_idx) = build_list_filter(&req);
        assert_eq!(clause, "WHERE title ILIKE $1");
        assert_eq!(next_idx, 2);
    }
}
