//! Shared application state.

use std::sync::Arc;

use curator_core::{AnswerBackend, FileStore};
use curator_db::Database;

use crate::GlobalRateLimiter;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    /// AI answer connector (mock until the real notebook integration lands).
    pub answers: Arc<dyn AnswerBackend>,
    /// File storage connector (mock until the real Drive integration lands).
    pub drive: Arc<dyn FileStore>,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    /// Assemble state from its parts.
    pub fn new(
        db: Database,
        answers: Arc<dyn AnswerBackend>,
        drive: Arc<dyn FileStore>,
        rate_limiter: Option<Arc<GlobalRateLimiter>>,
    ) -> Self {
        Self {
            db: Arc::new(db),
            answers,
            drive,
            rate_limiter,
        }
    }
}
