use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{NewResume, ResumeRecord};
use crate::store::{ResumeLookup, ResumeStore, StoreError};

/// Process-local store used when no `DATABASE_URL` is configured.
/// Records do not survive a restart.
#[derive(Default)]
pub struct MemoryResumeStore {
    records: RwLock<Vec<ResumeRecord>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn insert_one(&self, resume: NewResume) -> Result<Uuid, StoreError> {
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            external_id: resume.external_id,
            filename: resume.filename,
            resume_text: resume.resume_text,
            structured_info: resume.structured_info,
            created_at: Utc::now(),
        };
        let id = record.id;
        self.records.write().await.push(record);
        Ok(id)
    }

    async fn find_one(&self, lookup: ResumeLookup) -> Result<Option<ResumeRecord>, StoreError> {
        let records = self.records.read().await;
        let found = match &lookup {
            ResumeLookup::RecordId(id) => records.iter().find(|r| r.id == *id),
            ResumeLookup::ExternalId(external_id) => {
                records.iter().rev().find(|r| r.external_id == *external_id)
            }
        };
        Ok(found.cloned())
    }

    async fn find_all(&self) -> Result<Vec<ResumeRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn close(&self) {}
}
