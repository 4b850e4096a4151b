//! The transcript line record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a line does within its stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// One of the two opening questions.
    Question,
    /// An answer line between the questions and the refrain.
    Body,
    /// The penultimate refrain line.
    RefrainA,
    /// The closing refrain line.
    RefrainB,
}

impl Role {
    /// Stable name used for storage and logging.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Body => "body",
            Self::RefrainA => "refrain_a",
            Self::RefrainB => "refrain_b",
        }
    }

    /// Returns `true` for either refrain role.
    #[must_use]
    pub fn is_refrain(self) -> bool {
        matches!(self, Self::RefrainA | Self::RefrainB)
    }
}

/// A single line of the poem. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Unique line identifier.
    pub id: Uuid,
    /// The line's text.
    pub text: String,
    /// One-based index of the stanza this line belongs to.
    pub stanza_index: u32,
    /// The line's role within its stanza.
    pub role: Role,
    /// When the line was created.
    pub created_at: DateTime<Utc>,
}

impl Line {
    /// Creates a line with a fresh identifier.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        stanza_index: u32,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: text.into(),
            stanza_index,
            role,
            created_at,
        }
    }
}
