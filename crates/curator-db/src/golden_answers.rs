//! Golden answer repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use curator_core::{
    CreateGoldenAnswerRequest, Error, GoldenAnswer, GoldenAnswerRepository,
    ListGoldenAnswersRequest, Result, TrustLabel,
};

const ANSWER_COLUMNS: &str = "id, question, answer, department, trust_label, \
     source_document_ids, citations, verified_by, verified_at, next_review_date, \
     usage_count, helpful_count, created_at, updated_at";

/// PostgreSQL implementation of GoldenAnswerRepository.
pub struct PgGoldenAnswerRepository {
    pool: Pool<Postgres>,
}

impl PgGoldenAnswerRepository {
    /// Create a new PgGoldenAnswerRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_answer_row(row: &PgRow) -> Result<GoldenAnswer> {
    let department: String = row.try_get("department")?;
    let trust_label: String = row.try_get("trust_label")?;

    Ok(GoldenAnswer {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        department: department.parse()?,
        trust_label: trust_label.parse()?,
        source_document_ids: row.try_get("source_document_ids")?,
        citations: row.try_get("citations")?,
        verified_by: row.try_get("verified_by")?,
        verified_at: row.try_get("verified_at")?,
        next_review_date: row.try_get("next_review_date")?,
        usage_count: row.try_get("usage_count")?,
        helpful_count: row.try_get("helpful_count")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Build the WHERE clause for a golden-answer list request.
fn build_list_filter(req: &ListGoldenAnswersRequest) -> (String, usize) {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx = 1;

    if req.department.is_some() {
        conditions.push(format!("department = ${param_idx}"));
        param_idx += 1;
    }
    if req.trust_label.is_some() {
        conditions.push(format!("trust_label = ${param_idx}"));
        param_idx += 1;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, param_idx)
}

#[async_trait]
impl GoldenAnswerRepository for PgGoldenAnswerRepository {
    async fn insert(&self, req: CreateGoldenAnswerRequest) -> Result<GoldenAnswer> {
        req.validate()?;

        let id = Uuid::new_v4();
        let now = Utc::now();
        let trust_label = TrustLabel::default();

        sqlx::query(
            "INSERT INTO golden_answers \
             (id, question, answer, department, trust_label, source_document_ids, \
              citations, usage_count, helpful_count, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 0, 0, $8, $8)",
        )
        .bind(id)
        .bind(&req.question)
        .bind(&req.answer)
        .bind(req.department.as_str())
        .bind(trust_label.as_str())
        .bind(&req.source_document_ids)
        .bind(&req.citations)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "golden_answers",
            op = "insert",
            answer_id = %id,
            "Golden answer created"
        );

        Ok(GoldenAnswer {
            id,
            question: req.question,
            answer: req.answer,
            department: req.department,
            trust_label,
            source_document_ids: req.source_document_ids,
            citations: req.citations,
            verified_by: None,
            verified_at: None,
            next_review_date: None,
            usage_count: 0,
            helpful_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    async fn fetch(&self, id: Uuid) -> Result<GoldenAnswer> {
        let row = sqlx::query(&format!(
            "SELECT {ANSWER_COLUMNS} FROM golden_answers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::AnswerNotFound(id))?;

        map_answer_row(&row)
    }

    async fn list(&self, req: ListGoldenAnswersRequest) -> Result<Vec<GoldenAnswer>> {
        req.validate()?;

        let (where_clause, param_idx) = build_list_filter(&req);
        let sql = format!(
            "SELECT {ANSWER_COLUMNS} FROM golden_answers {where_clause} \
             ORDER BY usage_count DESC LIMIT ${param_idx}"
        );

        let mut q = sqlx::query(&sql);
        if let Some(department) = &req.department {
            q = q.bind(department.as_str());
        }
        if let Some(trust_label) = &req.trust_label {
            q = q.bind(trust_label.as_str());
        }
        let rows = q
            .bind(req.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        rows.iter().map(map_answer_row).collect()
    }

    async fn mark_helpful(&self, id: Uuid) -> Result<i32> {
        // Single UPDATE so concurrent callers cannot lose increments.
        let helpful_count: Option<i32> = sqlx::query_scalar(
            "UPDATE golden_answers \
             SET helpful_count = helpful_count + 1, updated_at = $2 \
             WHERE id = $1 RETURNING helpful_count",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        let helpful_count = helpful_count.ok_or(Error::AnswerNotFound(id))?;

        debug!(
            subsystem = "db",
            component = "golden_answers",
            op = "mark_helpful",
            answer_id = %id,
            helpful_count = helpful_count,
            "Helpful counter incremented"
        );
        Ok(helpful_count)
    }
}
