//! Prompt templates for question and answer lines.

/// Openings the model is shown as examples of a question.
pub const EXAMPLE_QUESTIONS: [&str; 5] = [
    "Oh, where have you been",
    "Oh, what did you see,",
    "And what did you hear",
    "Who did you meet",
    "What did you find",
];

/// Answer lines the model is shown as examples of style.
pub const EXAMPLE_LYRICS: [&str; 5] = [
    "I've stumbled on the side of twelve misty mountains",
    "I saw a newborn baby with wild wolves all around it",
    "Heard ten thousand whisperin' and nobody listenin'",
    "I met a young child beside a dead pony",
    "Where the home in the valley meets the damp dirty prison",
];

/// Framing shared by every prompt.
pub const SYSTEM_CONTEXT: &str =
    "You are Bob Dylan writing verses for 'A Hard Rain's A-Gonna Fall'.";

/// Prompt for the base of a question line, without its ending.
#[must_use]
pub fn question_prompt() -> String {
    format!(
        "{SYSTEM_CONTEXT}\n\n\
         Generate a question in Dylan's style. The question should:\n\
         1. Start with \"Oh, what\" or \"Oh, where\" or similar\n\
         2. Be open-ended and profound\n\
         3. Ask about experiences, visions, or journeys\n\
         4. NOT include any ending (I will add \"my blue-eyed son\" or \
         \"my darling young one\" later)\n\n\
         Example questions (without endings):\n{}\n\n\
         Respond with a JSON object of the form {{\"question\": \"...\"}} \
         containing just the question part.",
        EXAMPLE_QUESTIONS.join("\n")
    )
}

/// Prompt for a body line answering `question`, steering away from
/// `existing_lines`.
#[must_use]
pub fn lyric_prompt(question: &str, existing_lines: &[String]) -> String {
    format!(
        "{SYSTEM_CONTEXT}\n\n\
         You are answering the question: \"{question}\"\n\n\
         Write a single line response that:\n\
         1. Starts with \"I've\" or \"I\"\n\
         2. Uses vivid, surreal imagery\n\
         3. Suggests deeper meaning\n\
         4. Is different from these existing lyrics for this stanza:\n{}\n\n\
         Example responses:\n{}\n\n\
         Respond with a JSON object of the form {{\"lyric\": \"...\"}} \
         containing exactly one line.",
        existing_lines.join("\n"),
        EXAMPLE_LYRICS.join("\n")
    )
}
