use std::sync::Arc;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::config::Config;
use crate::store::{MemoryResumeStore, PgResumeStore, ResumeStore};

const MAX_CONNECTIONS: u32 = 10;

/// Builds the resume store selected by configuration.
/// Postgres when `DATABASE_URL` is set, otherwise in-memory.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn ResumeStore>> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set; using in-memory resume store (records are lost on restart)");
        return Ok(Arc::new(MemoryResumeStore::new()));
    };

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;
    info!("PostgreSQL connection pool established");

    Ok(Arc::new(PgResumeStore::connect(pool).await?))
}
