//! Interview Service — hosts the controller.
//!
//! Routes each turn to its session, applies it, and persists the snapshot on
//! the turn that completes the interview. Handlers only talk to this type.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::controller::process_turn;
use crate::interview::models::{CandidateRecord, ConversationState, Session};
use crate::interview::prompts;
use crate::interview::store::SessionStore;
use crate::persistence::{PersistenceSink, SessionSnapshot};

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TurnResult {
    pub session_id: Uuid,
    pub state: ConversationState,
    pub message: String,
    /// Present when the interview completed but the snapshot could not be saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistence_warning: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionStatus {
    pub id: u32,
    pub text: String,
    pub answered: bool,
}

/// Read-only view of a session for progress displays.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub state: ConversationState,
    /// True once the session accepts no further answers.
    pub finished: bool,
    pub candidate_summary: String,
    pub record: CandidateRecord,
    pub questions: Vec<QuestionStatus>,
    pub answered: usize,
    /// Id of the question awaiting an answer.
    pub current_question: Option<u32>,
}

impl SessionView {
    fn of(session: &Session) -> Self {
        Self {
            session_id: session.session_id,
            state: session.state,
            finished: session.state.is_terminal(),
            candidate_summary: session.record.summary(),
            record: session.record.clone(),
            questions: session
                .questions
                .iter()
                .map(|q| QuestionStatus {
                    id: q.id,
                    text: q.text.clone(),
                    answered: session.answers.contains(q.id),
                })
                .collect(),
            answered: session.answers.len(),
            current_question: session
                .current_question()
                .filter(|_| session.state == ConversationState::TechQuestions)
                .map(|q| q.id),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InterviewService {
    store: SessionStore,
    sink: Arc<dyn PersistenceSink>,
    transcript_limit: usize,
}

impl InterviewService {
    pub fn new(sink: Arc<dyn PersistenceSink>, transcript_limit: usize) -> Self {
        Self {
            store: SessionStore::new(),
            sink,
            transcript_limit,
        }
    }

    /// Opens a new session and returns its id with the greeting.
    pub async fn start_session(&self) -> TurnResult {
        let session = Session::new();
        let state = session.state;
        let id = self.store.insert(session).await;
        info!(
            "Interview session {id} started ({} active)",
            self.store.len().await
        );

        TurnResult {
            session_id: id,
            state,
            message: prompts::GREETING.to_string(),
            persistence_warning: None,
        }
    }

    /// Runs one turn on session `id`.
    ///
    /// A failed save is reported in `persistence_warning`; the session stays
    /// `Completed` regardless.
    pub async fn take_turn(&self, id: Uuid, message: &str) -> Result<TurnResult, AppError> {
        let handle = self
            .store
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        let mut session = handle.lock().await;

        let turn = process_turn(std::mem::take(&mut *session), message);
        *session = turn.session;

        let mut persistence_warning = None;
        if turn.completed {
            info!(
                "Interview session {id} completed with {} answers",
                session.answers.len()
            );
            let snapshot = SessionSnapshot::from_session(&session, self.transcript_limit);
            if let Err(e) = self.sink.persist(&snapshot).await {
                warn!(
                    "Failed to persist session {id} via {} sink: {e}",
                    self.sink.name()
                );
                persistence_warning = Some(format!("Interview data could not be saved: {e}"));
            }
        }

        Ok(TurnResult {
            session_id: id,
            state: session.state,
            message: turn.response,
            persistence_warning,
        })
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, AppError> {
        let handle = self
            .store
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        let session = handle.lock().await;
        Ok(SessionView::of(&session))
    }

    /// Drops the session. A new one must be started to continue.
    pub async fn discard(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.remove(id).await {
            return Err(AppError::NotFound(format!("Session {id} not found")));
        }
        info!("Interview session {id} discarded");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use crate::interview::models::TRANSCRIPT_CAPACITY;
    use crate::persistence::PersistenceError;

    /// Keeps snapshots in memory; optionally fails every write.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub saved: Mutex<Vec<SessionSnapshot>>,
        pub fail: bool,
    }

    #[async_trait]
    impl PersistenceSink for RecordingSink {
        async fn persist(&self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
            if self.fail {
                return Err(PersistenceError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only volume",
                )));
            }
            self.saved.lock().await.push(snapshot.clone());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    pub(crate) const FULL_INTERVIEW: [&str; 11] = [
        "Ada Lovelace",
        "ada@example.com",
        "+1 555 123 4567",
        "5",
        "Software Engineer",
        "London, UK",
        "Python, Docker",
        "Lists are mutable, tuples are not",
        "It serialises bytecode execution across threads",
        "An image is a template, a container is a running instance",
        "Multi-stage builds and slim base images",
    ];

    #[tokio::test]
    async fn test_start_session_returns_greeting() {
        let service = InterviewService::new(Arc::new(RecordingSink::default()), 10);
        let started = service.start_session().await;
        assert_eq!(started.state, ConversationState::Greeting);
        assert_eq!(started.message, prompts::GREETING);

        let view = service.view(started.session_id).await.unwrap();
        assert_eq!(view.candidate_summary, "No candidate information collected yet.");
    }

    #[tokio::test]
    async fn test_full_interview_persists_once() {
        let sink = Arc::new(RecordingSink::default());
        let service = InterviewService::new(sink.clone(), 4);
        let id = service.start_session().await.session_id;

        let mut last = None;
        for input in FULL_INTERVIEW {
            last = Some(service.take_turn(id, input).await.unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.state, ConversationState::Completed);
        assert_eq!(last.message, prompts::COMPLETION);
        assert!(last.persistence_warning.is_none());

        service.take_turn(id, "one more thing").await.unwrap();

        let saved = sink.saved.lock().await;
        assert_eq!(saved.len(), 1);
        let snapshot = &saved[0];
        assert_eq!(snapshot.candidate_info.session_id, id);
        assert_eq!(snapshot.candidate_info.tech_stack.as_deref(), Some("Python, Docker"));
        assert_eq!(snapshot.technical_questions.len(), 4);
        assert_eq!(snapshot.answers.len(), 4);
        assert_eq!(snapshot.chat_history.len(), 4);
        assert_eq!(snapshot.state, ConversationState::Completed);
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_completed_state() {
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let service = InterviewService::new(sink, 10);
        let id = service.start_session().await.session_id;

        let mut last = None;
        for input in FULL_INTERVIEW {
            last = Some(service.take_turn(id, input).await.unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.state, ConversationState::Completed);
        assert_eq!(last.message, prompts::COMPLETION);
        assert!(last
            .persistence_warning
            .unwrap()
            .contains("read-only volume"));

        let view = service.view(id).await.unwrap();
        assert_eq!(view.state, ConversationState::Completed);
        assert!(view.finished);
        assert!(view.current_question.is_none());
        assert!(view.questions.iter().all(|q| q.answered));
    }

    #[tokio::test]
    async fn test_early_exit_does_not_persist() {
        let sink = Arc::new(RecordingSink::default());
        let service = InterviewService::new(sink.clone(), 10);
        let id = service.start_session().await.session_id;

        service.take_turn(id, "Ada Lovelace").await.unwrap();
        let result = service.take_turn(id, "stop").await.unwrap();
        assert_eq!(result.state, ConversationState::Ended);
        assert!(sink.saved.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_completed_session_transcript_stays_bounded() {
        let sink = Arc::new(RecordingSink::default());
        let service = InterviewService::new(sink.clone(), 10);
        let id = service.start_session().await.session_id;
        for input in FULL_INTERVIEW {
            service.take_turn(id, input).await.unwrap();
        }

        let long = "a".repeat(4000);
        for _ in 0..1000 {
            let result = service.take_turn(id, &long).await.unwrap();
            assert_eq!(result.state, ConversationState::Completed);
            assert_eq!(result.message, prompts::ALREADY_COMPLETED);
        }

        let handle = service.store.get(id).await.unwrap();
        let session = handle.lock().await;
        assert_eq!(session.session_id, id);
        assert_eq!(session.transcript.len(), TRANSCRIPT_CAPACITY);
        assert_eq!(session.answers.len(), 4);
        assert_eq!(sink.saved.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_view_tracks_progress() {
        let service = InterviewService::new(Arc::new(RecordingSink::default()), 10);
        let id = service.start_session().await.session_id;
        for input in &FULL_INTERVIEW[..8] {
            service.take_turn(id, input).await.unwrap();
        }

        let view = service.view(id).await.unwrap();
        assert_eq!(view.state, ConversationState::TechQuestions);
        assert_eq!(view.answered, 1);
        assert!(view.questions[0].answered);
        assert!(!view.questions[1].answered);
        assert_eq!(view.current_question, Some(2));
        assert!(!view.finished);
        assert!(view.candidate_summary.contains("- Name: Ada Lovelace"));
        assert!(view.candidate_summary.contains("- Experience: 5 years"));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let service = InterviewService::new(Arc::new(RecordingSink::default()), 10);
        let id = Uuid::new_v4();
        assert!(matches!(
            service.take_turn(id, "hi").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(service.view(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.discard(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_discard_removes_session() {
        let service = InterviewService::new(Arc::new(RecordingSink::default()), 10);
        let id = service.start_session().await.session_id;
        service.discard(id).await.unwrap();
        assert!(service.view(id).await.is_err());
    }
}
