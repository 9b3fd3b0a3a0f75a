//! # curator-connect
//!
//! External-integration connectors for curator.
//!
//! This crate provides concrete implementations of the connector traits
//! defined in `curator-core`:
//!
//! - [`MockNotebookBackend`]: an [`AnswerBackend`](curator_core::AnswerBackend)
//!   that returns canned replies in the shape the production notebook AI
//!   service will use.
//! - [`MockDriveStore`]: a [`FileStore`](curator_core::FileStore) that keeps
//!   blobs in memory with content-addressed ids.
//!
//! Both are placeholders: wiring in the real services replaces the
//! implementation without touching the request/response contract.

pub mod drive;
pub mod notebook;

pub use drive::MockDriveStore;
pub use notebook::MockNotebookBackend;
