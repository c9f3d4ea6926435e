/// Phrases that end the interview wherever they appear in the input.
///
/// Matching is plain substring matching, so "backend" contains "end".
const EXIT_PHRASES: &[&str] = &[
    "bye",
    "goodbye",
    "exit",
    "quit",
    "end",
    "stop",
    "thanks",
    "thank you",
    "done",
    "finish",
];

/// Case-insensitive substring match against the exit vocabulary.
pub fn is_exit_phrase(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
