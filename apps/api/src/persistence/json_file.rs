use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::persistence::{PersistenceError, PersistenceSink, SessionSnapshot};

/// Writes each snapshot to `<dir>/candidate_<session_id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, snapshot: &SessionSnapshot) -> PathBuf {
        self.dir.join(format!(
            "candidate_{}.json",
            snapshot.candidate_info.session_id
        ))
    }
}

#[async_trait]
impl PersistenceSink for JsonFileSink {
    async fn persist(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(snapshot);
        let body = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&path, body).await?;

        info!("Candidate snapshot written to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json_file"
    }
}
