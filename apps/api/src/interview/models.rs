#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::interview::prompts;

// ────────────────────────────────────────────────────────────────────────────
// Conversation state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Greeting,
    CollectingInfo,
    TechQuestions,
    Completed,
    Ended,
}

impl ConversationState {
    /// `Completed` and `Ended` accept no further record or answer mutation.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Ended)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::CollectingInfo => "collecting_info",
            Self::TechQuestions => "tech_questions",
            Self::Completed => "completed",
            Self::Ended => "ended",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate record
// ────────────────────────────────────────────────────────────────────────────

/// The seven candidate attributes, in the order they are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Email,
    Phone,
    ExperienceYears,
    DesiredPositions,
    CurrentLocation,
    TechStack,
}

pub const FIELD_ORDER: [Field; 7] = [
    Field::FullName,
    Field::Email,
    Field::Phone,
    Field::ExperienceYears,
    Field::DesiredPositions,
    Field::CurrentLocation,
    Field::TechStack,
];

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::ExperienceYears => "Experience",
            Field::DesiredPositions => "Desired Position(s)",
            Field::CurrentLocation => "Location",
            Field::TechStack => "Tech Stack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub session_id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience_years: Option<String>,
    pub desired_positions: Option<String>,
    pub current_location: Option<String>,
    pub tech_stack: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CandidateRecord {
    pub fn new(session_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            full_name: None,
            email: None,
            phone: None,
            experience_years: None,
            desired_positions: None,
            current_location: None,
            tech_stack: None,
            created_at,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::FullName => self.full_name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::ExperienceYears => self.experience_years.as_deref(),
            Field::DesiredPositions => self.desired_positions.as_deref(),
            Field::CurrentLocation => self.current_location.as_deref(),
            Field::TechStack => self.tech_stack.as_deref(),
        }
    }

    /// Stores a validated, trimmed value. Only the controller calls this, and
    /// only in field order.
    pub(crate) fn set(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::ExperienceYears => &mut self.experience_years,
            Field::DesiredPositions => &mut self.desired_positions,
            Field::CurrentLocation => &mut self.current_location,
            Field::TechStack => &mut self.tech_stack,
        };
        *slot = Some(value.trim().to_string());
    }

    /// Number of leading fields (in `FIELD_ORDER`) that are populated.
    pub fn populated_count(&self) -> usize {
        FIELD_ORDER
            .iter()
            .take_while(|f| self.get(**f).is_some())
            .count()
    }

    /// True when no field is populated ahead of an empty earlier one.
    pub fn is_filled_in_order(&self) -> bool {
        let prefix = self.populated_count();
        FIELD_ORDER[prefix..].iter().all(|f| self.get(*f).is_none())
    }

    /// Human-readable summary of what has been collected so far.
    pub fn summary(&self) -> String {
        let Some(name) = self.full_name.as_deref() else {
            return "No candidate information collected yet.".to_string();
        };

        let mut lines = vec![
            "Candidate Information:".to_string(),
            format!("- {}: {}", Field::FullName.label(), name),
        ];
        for field in &FIELD_ORDER[1..] {
            let value = self.get(*field).unwrap_or("Not provided");
            if *field == Field::ExperienceYears && self.get(*field).is_some() {
                lines.push(format!("- {}: {} years", field.label(), value));
            } else {
                lines.push(format!("- {}: {}", field.label(), value));
            }
        }
        lines.join("\n")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Technical questions and answers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalQuestion {
    /// Sequential, starting at 1. Presentation and answer order.
    pub id: u32,
    pub text: String,
}

/// Answers keyed by question id. Entries are only ever added, never replaced.
///
/// Serialised as a map of `question_<id>` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerLog(BTreeMap<u32, String>);

impl AnswerLog {
    /// Records an answer unless one already exists for `question_id`.
    /// Returns whether the log grew.
    pub fn record(&mut self, question_id: u32, answer: &str) -> bool {
        if self.0.contains_key(&question_id) {
            return false;
        }
        self.0.insert(question_id, answer.trim().to_string());
        true
    }

    pub fn get(&self, question_id: u32) -> Option<&str> {
        self.0.get(&question_id).map(String::as_str)
    }

    pub fn contains(&self, question_id: u32) -> bool {
        self.0.contains_key(&question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const ANSWER_KEY_PREFIX: &str = "question_";

impl Serialize for AnswerLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, answer) in &self.0 {
            map.serialize_entry(&format!("{ANSWER_KEY_PREFIX}{id}"), answer)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut log = BTreeMap::new();
        for (key, answer) in raw {
            let id = key
                .strip_prefix(ANSWER_KEY_PREFIX)
                .and_then(|n| n.parse::<u32>().ok())
                .ok_or_else(|| D::Error::custom(format!("invalid answer key '{key}'")))?;
            log.insert(id, answer);
        }
        Ok(Self(log))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transcript
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Most entries a session keeps; older ones are dropped first.
pub const TRANSCRIPT_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Session aggregate
// ────────────────────────────────────────────────────────────────────────────

/// One interview. Passed by value into every turn and handed back updated;
/// the host decides where it lives between turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub state: ConversationState,
    pub record: CandidateRecord,
    pub questions: Vec<TechnicalQuestion>,
    pub answers: AnswerLog,
    /// Index into the post-name info fields. Only increases.
    pub field_cursor: usize,
    /// Newest last, never longer than [`TRANSCRIPT_CAPACITY`].
    pub transcript: Vec<TranscriptEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4(), Utc::now())
    }

    pub fn with_id(session_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            state: ConversationState::Greeting,
            record: CandidateRecord::new(session_id, created_at),
            questions: Vec::new(),
            answers: AnswerLog::default(),
            field_cursor: 0,
            transcript: vec![TranscriptEntry {
                role: Role::Assistant,
                text: prompts::GREETING.to_string(),
            }],
        }
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&TechnicalQuestion> {
        self.questions.get(self.answers.len())
    }

    /// Last `limit` transcript entries, oldest first.
    pub fn recent_transcript(&self, limit: usize) -> &[TranscriptEntry] {
        let start = self.transcript.len().saturating_sub(limit);
        &self.transcript[start..]
    }

    pub(crate) fn push_exchange(&mut self, user_text: &str, response: &str) {
        self.transcript.push(TranscriptEntry {
            role: Role::User,
            text: user_text.to_string(),
        });
        self.transcript.push(TranscriptEntry {
            role: Role::Assistant,
            text: response.to_string(),
        });
        if self.transcript.len() > TRANSCRIPT_CAPACITY {
            let excess = self.transcript.len() - TRANSCRIPT_CAPACITY;
            self.transcript.drain(..excess);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
