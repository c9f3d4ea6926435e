//! Conversation Controller — the interview state machine.
//!
//! `process_turn` is pure and synchronous: it takes a `Session` by value and
//! hands it back with the turn applied. A turn either commits its mutation and
//! transition together or, on a validation failure, changes nothing but the
//! transcript. Persistence is left to the caller, signalled by `Turn::completed`.
//!
//! States: Greeting → CollectingInfo → TechQuestions → Completed, with Ended
//! reachable from every state but Ended itself.

use tracing::debug;

use crate::interview::exit::is_exit_phrase;
use crate::interview::models::{ConversationState, Field, Session};
use crate::interview::prompts;
use crate::interview::question_bank::{matched_technologies, select_questions};
use crate::interview::validation::{
    check, validate_email, validate_experience_years, validate_free_text, validate_full_name,
    validate_phone, Validator,
};

/// Fields collected after the name, in order. `Session::field_cursor` indexes this list.
pub const INFO_FIELDS: [(Field, Validator); 6] = [
    (Field::Email, validate_email),
    (Field::Phone, validate_phone),
    (Field::ExperienceYears, validate_experience_years),
    (Field::DesiredPositions, validate_free_text),
    (Field::CurrentLocation, validate_free_text),
    (Field::TechStack, validate_free_text),
];

/// Outcome of one turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub session: Session,
    pub response: String,
    /// True only on the turn that entered `Completed`. The caller should
    /// persist a snapshot of `session`.
    pub completed: bool,
}

/// Applies one user input to `session`.
pub fn process_turn(mut session: Session, raw_input: &str) -> Turn {
    let input = raw_input.trim();

    if input.is_empty() {
        return Turn {
            session,
            response: prompts::NO_INPUT.to_string(),
            completed: false,
        };
    }

    if session.state == ConversationState::Ended {
        return Turn {
            session,
            response: prompts::CONVERSATION_ENDED.to_string(),
            completed: false,
        };
    }

    let from = session.state;

    let (response, completed) = if is_exit_phrase(input) {
        session.state = ConversationState::Ended;
        (prompts::GOODBYE.to_string(), false)
    } else {
        match session.state {
            ConversationState::Greeting => (handle_greeting(&mut session, input), false),
            ConversationState::CollectingInfo => (handle_info(&mut session, input), false),
            ConversationState::TechQuestions => handle_answer(&mut session, input),
            ConversationState::Completed => (prompts::ALREADY_COMPLETED.to_string(), false),
            ConversationState::Ended => (prompts::CONVERSATION_ENDED.to_string(), false),
        }
    };

    debug_assert!(session.record.is_filled_in_order());

    if session.state != from {
        debug!(
            session_id = %session.session_id,
            from = from.as_str(),
            to = session.state.as_str(),
            "Conversation state changed"
        );
    }

    session.push_exchange(raw_input, &response);

    Turn {
        session,
        response,
        completed,
    }
}

fn handle_greeting(session: &mut Session, input: &str) -> String {
    if let Err(e) = check(validate_full_name, input) {
        return e.to_string();
    }

    session.record.set(Field::FullName, input);
    session.state = ConversationState::CollectingInfo;
    session.field_cursor = 0;

    prompts::name_accepted(input, INFO_FIELDS[0].0)
}

fn handle_info(session: &mut Session, input: &str) -> String {
    let Some(&(field, validator)) = INFO_FIELDS.get(session.field_cursor) else {
        return enter_tech_questions(session);
    };

    if let Err(e) = check(validator, input) {
        return prompts::field_rejected(&e.to_string(), field);
    }

    session.record.set(field, input);
    session.field_cursor += 1;

    match INFO_FIELDS.get(session.field_cursor) {
        Some(&(next, _)) => prompts::field_accepted(next),
        None => enter_tech_questions(session),
    }
}

fn enter_tech_questions(session: &mut Session) -> String {
    let tech_stack = session.record.tech_stack.clone().unwrap_or_default();

    // Generated once per session.
    if session.questions.is_empty() {
        session.questions = select_questions(&tech_stack);
        debug!(
            session_id = %session.session_id,
            technologies = ?matched_technologies(&tech_stack),
            questions = session.questions.len(),
            "Technical questions selected"
        );
    }
    session.state = ConversationState::TechQuestions;

    prompts::questions_intro(&tech_stack, &session.questions)
}

fn handle_answer(session: &mut Session, input: &str) -> (String, bool) {
    if session.questions.is_empty() {
        return (prompts::NO_QUESTIONS.to_string(), false);
    }

    let answered = session.answers.len();
    if answered >= session.questions.len() {
        return complete(session);
    }

    let question_id = session.questions[answered].id;
    session.answers.record(question_id, input);

    match session.questions.get(answered + 1) {
        Some(next) => (prompts::next_question(next), false),
        None => complete(session),
    }
}

fn complete(session: &mut Session) -> (String, bool) {
    session.state = ConversationState::Completed;
    (prompts::COMPLETION.to_string(), true)
}
