//! Handler modules for curator-api.

pub mod chat;
pub mod documents;
pub mod golden_answers;
pub mod stats;
pub mod system;
