//! Persistence Sink — where finished interviews go.
//!
//! The controller never calls a sink itself; the interview service persists a
//! `SessionSnapshot` when a turn reports completion. Sinks are best-effort: a
//! failure is reported to the caller and logged, never rolled back into the
//! conversation.
//!
//! `AppState` holds an `Arc<dyn PersistenceSink>`, chosen at startup from config.

pub mod json_file;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interview::models::{
    AnswerLog, CandidateRecord, ConversationState, Session, TechnicalQuestion, TranscriptEntry,
};

pub use json_file::JsonFileSink;
pub use postgres::PgSnapshotSink;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Read-only view of a finished session, as handed to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub candidate_info: CandidateRecord,
    pub state: ConversationState,
    pub technical_questions: Vec<TechnicalQuestion>,
    pub answers: AnswerLog,
    /// Most recent transcript entries, oldest first.
    pub chat_history: Vec<TranscriptEntry>,
    pub saved_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn from_session(session: &Session, transcript_limit: usize) -> Self {
        Self {
            candidate_info: session.record.clone(),
            state: session.state,
            technical_questions: session.questions.clone(),
            answers: session.answers.clone(),
            chat_history: session.recent_transcript(transcript_limit).to_vec(),
            saved_at: Utc::now(),
        }
    }
}

/// Implement this to store snapshots somewhere new without touching the
/// interview service or handlers.
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    async fn persist(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError>;

    /// Short backend name, for logs.
    fn name(&self) -> &'static str;
}
