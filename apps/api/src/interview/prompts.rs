// Fixed conversation texts. Responses are markdown; rendering is up to the client.

use crate::interview::models::{Field, TechnicalQuestion};

pub const GREETING: &str = "\
**Welcome to TalentScout AI Hiring Assistant!**

Hello! I'm here to help you with your job application process. I'll gather some \
essential information about you and ask a few technical questions based on your expertise.

This process typically takes 5-10 minutes and includes:
- Basic information collection
- Technical stack discussion
- Relevant technical questions

Let's get started! May I have your **full name** please?

*(You can type 'exit' or 'bye' anytime to end our conversation)*";

pub const NO_INPUT: &str = "I didn't receive any input. Could you please type your response?";

pub const GOODBYE: &str = "\
**Thank you for using TalentScout AI Hiring Assistant!**

If you didn't complete the full process, don't worry - you can always start again later.

For any questions or concerns, please contact us at:
- hr@talentscout.com
- +1-555-TALENT

Have a great day!";

pub const COMPLETION: &str = "\
**Congratulations! You've completed the initial screening process.**

**What happens next:**
- Your responses have been recorded and will be reviewed by our recruitment team
- You should hear back from us within 2-3 business days
- If your profile matches our requirements, we'll schedule a detailed technical interview

**Contact Information:**
- Email: hr@talentscout.com
- Phone: +1-555-TALENT

Thank you for your time and interest in our opportunities!

*(You can type 'bye' to end this conversation)*";

pub const ALREADY_COMPLETED: &str = "\
Your screening is already complete and your answers have been recorded. \
Type 'bye' to end this conversation.";

pub const CONVERSATION_ENDED: &str =
    "This conversation has ended. Please start a new session to begin again.";

pub const NO_QUESTIONS: &str =
    "No technical questions available. Please restart the conversation.";

const ACCEPTED_PREFIX: &str = "Got it!";
const REJECTED_PREFIX: &str = "Sorry, that didn't work:";

/// Prompt asking for `field`.
pub fn field_prompt(field: Field) -> &'static str {
    match field {
        Field::FullName => "May I have your **full name** please?",
        Field::Email => "Could you please provide your **email address**?",
        Field::Phone => "What's your **phone number**?",
        Field::ExperienceYears => "How many **years of experience** do you have in technology?",
        Field::DesiredPositions => "What **position(s)** are you interested in applying for?",
        Field::CurrentLocation => "What's your **current location** (city, country)?",
        Field::TechStack => {
            "Please tell me about your **technical stack**.

Include:
- Programming languages (e.g., Python, JavaScript, Java)
- Frameworks (e.g., React, Django, Spring)
- Databases (e.g., MySQL, MongoDB, PostgreSQL)
- Tools & Technologies (e.g., Docker, AWS, Git)

Example: \"Python, Django, PostgreSQL, Docker, AWS, Git\""
        }
    }
}

pub fn name_accepted(name: &str, next: Field) -> String {
    format!("Nice to meet you, {name}! {}", field_prompt(next))
}

pub fn field_accepted(next: Field) -> String {
    format!("{ACCEPTED_PREFIX} {}", field_prompt(next))
}

/// Re-prompt: the rejection reason followed by the same field's prompt.
pub fn field_rejected(reason: &str, field: Field) -> String {
    format!("{REJECTED_PREFIX} {reason}\n\n{}", field_prompt(field))
}

/// Preview of every question, then the first one.
pub fn questions_intro(tech_stack: &str, questions: &[TechnicalQuestion]) -> String {
    let listing = questions
        .iter()
        .map(|q| format!("**Q{}.** {}", q.id, q.text))
        .collect::<Vec<_>>()
        .join("\n");

    let first = questions
        .first()
        .map(|q| format!("Let's start with **Question {}**: {}", q.id, q.text))
        .unwrap_or_default();

    format!(
        "**Great! I've collected all your information.**\n\n\
         Based on your tech stack ({tech_stack}), I've prepared some technical questions for you:\n\n\
         {listing}\n\n\
         **Please answer these questions one by one. You can take your time!**\n\n\
         {first}"
    )
}

pub fn next_question(question: &TechnicalQuestion) -> String {
    format!(
        "**Thank you for your answer!**\n\n**Question {}**: {}",
        question.id, question.text
    )
}
