//! Line generator abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Which addressee closes a question line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// First question of a stanza.
    BlueEyedSon,
    /// Second question of a stanza.
    DarlingYoungOne,
}

impl Perspective {
    /// The literal text that closes a question in this perspective.
    #[must_use]
    pub fn ending(self) -> &'static str {
        match self {
            Self::BlueEyedSon => ", my blue-eyed son?",
            Self::DarlingYoungOne => ", my darling young one?",
        }
    }

    /// Appends this perspective's ending to a base question.
    ///
    /// Idempotent: text that already carries the ending is returned as-is.
    /// Either perspective's ending, with or without the question mark, is
    /// replaced, and trailing punctuation is dropped before joining.
    #[must_use]
    pub fn complete(self, question: &str) -> String {
        let trimmed = question.trim();
        if trimmed.ends_with(self.ending()) {
            return trimmed.to_owned();
        }
        let base = [Self::BlueEyedSon, Self::DarlingYoungOne]
            .into_iter()
            .flat_map(|p| [p.ending(), p.ending().trim_end_matches('?')])
            .find_map(|ending| trimmed.strip_suffix(ending))
            .unwrap_or(trimmed);
        let base = base.trim_end_matches(|c: char| matches!(c, ',' | '?' | '.' | '!' | ' '));
        format!("{base}{}", self.ending())
    }
}

/// What the engine asks an external generator for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineRequest {
    /// An opening question for the given perspective.
    Question {
        /// Which ending the question takes.
        perspective: Perspective,
    },
    /// A body line answering the stanza's governing question.
    Answer {
        /// The stanza's first line.
        question: String,
        /// Body lines already produced in this stanza.
        existing_lines: Vec<String>,
    },
}

impl LineRequest {
    /// Short name used for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Question { .. } => "question",
            Self::Answer { .. } => "answer",
        }
    }
}

/// External text generator producing one line per call.
#[async_trait]
pub trait LineGenerator: Send + Sync {
    /// Generates the text for a single line.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` on transport failure, a non-success status,
    /// or a response missing the expected text field.
    async fn generate(&self, request: &LineRequest) -> Result<String, GenerationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_appends_ending_to_bare_question() {
        assert_eq!(
            Perspective::BlueEyedSon.complete("Oh, what did you see"),
            "Oh, what did you see, my blue-eyed son?"
        );
    }

    #[test]
    fn test_complete_strips_trailing_punctuation_before_joining() {
        assert_eq!(
            Perspective::DarlingYoungOne.complete("Oh, what did you see, "),
            "Oh, what did you see, my darling young one?"
        );
    }

    #[test]
    fn test_complete_replaces_the_other_perspectives_ending() {
        assert_eq!(
            Perspective::DarlingYoungOne.complete("Oh, what did you see, my blue-eyed son?"),
            "Oh, what did you see, my darling young one?"
        );
        assert_eq!(
            Perspective::BlueEyedSon.complete("Who did you meet, my darling young one"),
            "Who did you meet, my blue-eyed son?"
        );
    }

    #[test]
    fn test_complete_is_idempotent() {
        let once = Perspective::DarlingYoungOne.complete("Who did you meet");
        let twice = Perspective::DarlingYoungOne.complete(&once);
        assert_eq!(once, twice);
    }
}
