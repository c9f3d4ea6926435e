//! Question Bank — static technology → questions catalog and the selector that
//! turns a free-text tech stack into an ordered, capped question set.
//!
//! Keyword matching only: a technology is "mentioned" when its name appears as
//! a substring of the lower-cased stack. No randomness, so the same text always
//! yields the same questions.

use crate::interview::models::TechnicalQuestion;

/// Questions taken from each matched technology.
const QUESTIONS_PER_TECH: usize = 2;

/// Upper bound on the selection.
pub const MAX_QUESTIONS: usize = 5;

/// Catalog scan order is selection order.
const CATALOG: &[(&str, &[&str])] = &[
    (
        "python",
        &[
            "What is the difference between a list and a tuple in Python?",
            "Explain Python's GIL (Global Interpreter Lock) and its implications.",
            "How do you handle exceptions in Python? Provide an example.",
            "What are Python decorators and how do you use them?",
        ],
    ),
    (
        "javascript",
        &[
            "Explain the concept of closures in JavaScript with an example.",
            "What is the difference between '==' and '===' in JavaScript?",
            "How does event delegation work in JavaScript?",
            "Explain the difference between 'var', 'let', and 'const'.",
        ],
    ),
    (
        "java",
        &[
            "What is the difference between abstract classes and interfaces in Java?",
            "Explain Java's garbage collection mechanism.",
            "What are the principles of OOP and how does Java implement them?",
            "How do you handle multithreading in Java?",
        ],
    ),
    (
        "react",
        &[
            "What is the difference between state and props in React?",
            "Explain the React component lifecycle methods.",
            "How do React hooks work? Give examples of useState and useEffect.",
            "What is the virtual DOM and how does it improve performance?",
        ],
    ),
    (
        "django",
        &[
            "Explain Django's MTV (Model-Template-View) architecture.",
            "How do Django migrations work?",
            "What is Django ORM and how do you perform database queries?",
            "How do you handle authentication and authorization in Django?",
        ],
    ),
    (
        "sql",
        &[
            "What is the difference between INNER JOIN and LEFT JOIN?",
            "Explain database normalization and its benefits.",
            "How do you optimize slow SQL queries?",
            "What are database indexes and when should you use them?",
        ],
    ),
    (
        "aws",
        &[
            "What are the main differences between EC2, ECS, and Lambda?",
            "How do you secure AWS resources?",
            "Explain the concept of AWS VPC and its components.",
            "What is the difference between S3 storage classes?",
        ],
    ),
    (
        "docker",
        &[
            "What is the difference between a Docker image and a container?",
            "How do you optimize Docker images for production?",
            "Explain Docker networking and volume management.",
            "What is Docker Compose and when do you use it?",
        ],
    ),
    (
        "typescript",
        &[
            "What is the difference between an interface and a type alias in TypeScript?",
            "How do generics work in TypeScript? Give an example.",
            "Explain TypeScript's structural typing.",
            "What does the 'strict' compiler option enable?",
        ],
    ),
    (
        "kubernetes",
        &[
            "What is the difference between a Pod, a Deployment, and a Service in Kubernetes?",
            "How do liveness and readiness probes differ?",
            "How do you roll back a failed Kubernetes deployment?",
            "Explain how ConfigMaps and Secrets are consumed by Pods.",
        ],
    ),
    (
        "rust",
        &[
            "Explain Rust's ownership and borrowing rules.",
            "When would you use Box, Rc, and Arc in Rust?",
            "How does error handling with Result and the ? operator work?",
            "What are lifetimes and when do you need to annotate them?",
        ],
    ),
    (
        "mongodb",
        &[
            "When would you choose MongoDB over a relational database?",
            "How do indexes work in MongoDB?",
            "Explain the MongoDB aggregation pipeline.",
            "How do you model one-to-many relationships in MongoDB?",
        ],
    ),
];

/// Used when the stack mentions nothing from the catalog.
const GENERIC_QUESTIONS: &[&str] = &[
    "Describe your experience with software development lifecycle.",
    "How do you approach debugging a complex issue?",
    "What's your experience with version control systems like Git?",
    "How do you stay updated with new technologies?",
];

/// Catalog entries mentioned in `tech_stack`, in catalog order.
fn matched_entries(
    tech_stack: &str,
) -> impl Iterator<Item = &'static (&'static str, &'static [&'static str])> {
    let lower = tech_stack.to_lowercase();
    CATALOG.iter().filter(move |(tech, _)| lower.contains(tech))
}

/// Technologies from the catalog mentioned in `tech_stack`, in catalog order.
pub fn matched_technologies(tech_stack: &str) -> Vec<&'static str> {
    matched_entries(tech_stack).map(|(tech, _)| *tech).collect()
}

/// Selects up to [`MAX_QUESTIONS`] questions for `tech_stack`.
///
/// Algorithm:
/// 1. Lower-case the input
/// 2. Scan the catalog in order; each mentioned technology contributes its first two questions
/// 3. Nothing matched → the four generic questions
/// 4. Truncate to five
/// 5. Number 1..=k in selection order
pub fn select_questions(tech_stack: &str) -> Vec<TechnicalQuestion> {
    let mut selected: Vec<&str> = matched_entries(tech_stack)
        .flat_map(|(_, questions)| questions.iter().take(QUESTIONS_PER_TECH).copied())
        .collect();

    if selected.is_empty() {
        selected = GENERIC_QUESTIONS.to_vec();
    }

    selected
        .into_iter()
        .take(MAX_QUESTIONS)
        .zip(1u32..)
        .map(|(text, id)| TechnicalQuestion {
            id,
            text: text.to_string(),
        })
        .collect()
}
