use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use crate::persistence::{PersistenceError, PersistenceSink, SessionSnapshot};

/// Stores snapshots as JSONB rows in `candidate_snapshots`, one per session.
#[derive(Debug, Clone)]
pub struct PgSnapshotSink {
    pool: PgPool,
}

impl PgSnapshotSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersistenceSink for PgSnapshotSink {
    async fn persist(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        let session_id = snapshot.candidate_info.session_id;

        sqlx::query(
            r#"
            INSERT INTO candidate_snapshots (session_id, snapshot, saved_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (session_id)
            DO UPDATE SET snapshot = EXCLUDED.snapshot, saved_at = EXCLUDED.saved_at
            "#,
        )
        .bind(session_id)
        .bind(Json(snapshot))
        .bind(snapshot.saved_at)
        .execute(&self.pool)
        .await?;

        info!("Candidate snapshot stored for session {session_id}");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
