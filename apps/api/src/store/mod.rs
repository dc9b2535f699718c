//! Resume Store: insert-only persistence for resume records.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>` built once in `main` and closed
//! on shutdown. Lookups are exact matches on record id or external id.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewResume, ResumeRecord};

pub mod memory;
pub mod postgres;

pub use memory::MemoryResumeStore;
pub use postgres::PgResumeStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Which key a lookup matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeLookup {
    RecordId(Uuid),
    /// Several records may share an external id; the newest wins.
    ExternalId(String),
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Persists the record in full or not at all. Returns the assigned record id.
    async fn insert_one(&self, resume: NewResume) -> Result<Uuid, StoreError>;

    async fn find_one(&self, lookup: ResumeLookup) -> Result<Option<ResumeRecord>, StoreError>;

    /// All records in insertion order.
    async fn find_all(&self) -> Result<Vec<ResumeRecord>, StoreError>;

    async fn close(&self);
}
