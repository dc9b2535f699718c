use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{NewResume, ResumeRecord};
use crate::store::{ResumeLookup, ResumeStore, StoreError};

const CREATE_RESUMES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS resumes (
    id              UUID PRIMARY KEY,
    external_id     TEXT NOT NULL,
    filename        TEXT NOT NULL,
    resume_text     TEXT NOT NULL,
    structured_info JSONB NOT NULL,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT now(),
    seq             BIGSERIAL NOT NULL
)
"#;

// Tables created before `seq` existed get it backfilled here.
const ADD_SEQ_COLUMN: &str = "ALTER TABLE resumes ADD COLUMN IF NOT EXISTS seq BIGSERIAL NOT NULL";

const CREATE_EXTERNAL_ID_INDEX: &str = "CREATE INDEX IF NOT EXISTS resumes_external_id_seq_idx \
     ON resumes (external_id, seq DESC)";

// `seq` is the insertion order. `created_at` comes from `now()`, which is the
// transaction start time and can tie or run backwards across connections.
const SELECT_BY_RECORD_ID: &str = "SELECT id, external_id, filename, resume_text, structured_info, created_at \
     FROM resumes WHERE id = $1";

const SELECT_NEWEST_BY_EXTERNAL_ID: &str = "SELECT id, external_id, filename, resume_text, structured_info, created_at \
     FROM resumes WHERE external_id = $1 ORDER BY seq DESC LIMIT 1";

const SELECT_ALL_IN_INSERT_ORDER: &str = "SELECT id, external_id, filename, resume_text, structured_info, created_at \
     FROM resumes ORDER BY seq";

/// Postgres-backed resume store.
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    /// Wraps the pool and makes sure the `resumes` table exists.
    pub async fn connect(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_RESUMES_TABLE).execute(&pool).await?;
        sqlx::query(ADD_SEQ_COLUMN).execute(&pool).await?;
        sqlx::query(CREATE_EXTERNAL_ID_INDEX).execute(&pool).await?;
        info!("Resume table ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn insert_one(&self, resume: NewResume) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        // Single statement, so the insert is all-or-nothing.
        sqlx::query(
            r#"
            INSERT INTO resumes (id, external_id, filename, resume_text, structured_info)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(&resume.external_id)
        .bind(&resume.filename)
        .bind(&resume.resume_text)
        .bind(&resume.structured_info)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_one(&self, lookup: ResumeLookup) -> Result<Option<ResumeRecord>, StoreError> {
        let record = match lookup {
            ResumeLookup::RecordId(id) => {
                sqlx::query_as::<_, ResumeRecord>(SELECT_BY_RECORD_ID)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            ResumeLookup::ExternalId(external_id) => {
                sqlx::query_as::<_, ResumeRecord>(SELECT_NEWEST_BY_EXTERNAL_ID)
                        .bind(external_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<ResumeRecord>, StoreError> {
        let records = sqlx::query_as::<_, ResumeRecord>(SELECT_ALL_IN_INSERT_ORDER)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_carries_insertion_sequence() {
        assert!(CREATE_RESUMES_TABLE.contains("seq             BIGSERIAL"));
        assert!(ADD_SEQ_COLUMN.contains("IF NOT EXISTS seq BIGSERIAL"));
        assert!(CREATE_EXTERNAL_ID_INDEX.contains("(external_id, seq DESC)"));
    }

    #[test]
    fn test_lookups_order_by_sequence_not_timestamp() {
        assert!(SELECT_NEWEST_BY_EXTERNAL_ID.ends_with("ORDER BY seq DESC LIMIT 1"));
        assert!(SELECT_ALL_IN_INSERT_ORDER.ends_with("ORDER BY seq"));
        for query in [
            SELECT_BY_RECORD_ID,
            SELECT_NEWEST_BY_EXTERNAL_ID,
            SELECT_ALL_IN_INSERT_ORDER,
        ] {
            assert!(!query.contains("ORDER BY created_at"));
            // `seq` is not a field of `ResumeRecord`, so it is never selected.
            assert!(query.starts_with(
                "SELECT id, external_id, filename, resume_text, structured_info, created_at "
            ));
        }
    }
}
