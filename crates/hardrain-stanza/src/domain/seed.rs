//! The fixed opening stanza.

use chrono::{DateTime, TimeZone, Utc};
use hardrain_core::line::{Line, Role};

use super::plan::StanzaPlan;
use super::request::{REFRAIN_FINAL, REFRAIN_PENULTIMATE};

/// Text and role of every seed line, in order.
pub const SEED_LINES: [(&str, Role); 9] = [
    ("Oh, where have you been, my blue-eyed son?", Role::Question),
    ("Oh, where have you been, my darling young one?", Role::Question),
    ("I've stumbled on the side of twelve misty mountains", Role::Body),
    ("I've walked and I've crawled on six crooked highways", Role::Body),
    ("I've stepped in the middle of seven sad forests", Role::Body),
    ("I've been out in front of a dozen dead oceans", Role::Body),
    ("I've been ten thousand miles in the mouth of a graveyard", Role::Body),
    (REFRAIN_PENULTIMATE, Role::RefrainA),
    (REFRAIN_FINAL, Role::RefrainB),
];

/// The seed stanza's plan. Never re-sampled.
pub const SEED_PLAN: StanzaPlan = StanzaPlan {
    stanza_index: 1,
    length: SEED_LINES.len(),
};

/// Timestamp stamped on every seed line: 1963-01-06T00:00:00Z.
#[must_use]
pub fn seed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1963, 1, 6, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Builds the seed stanza with fresh line identifiers.
#[must_use]
pub fn seed_stanza() -> Vec<Line> {
    let created_at = seed_timestamp();
    SEED_LINES
        .iter()
        .map(|(text, role)| Line::new(*text, SEED_PLAN.stanza_index, *role, created_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::plan::classify;

    #[test]
    fn test_seed_stanza_follows_role_bands() {
        let lines = seed_stanza();

        assert_eq!(lines.len(), 9);
        for (position, line) in lines.iter().enumerate() {
            assert_eq!(Some(line.role), classify(position, SEED_PLAN.length));
            assert_eq!(line.stanza_index, 1);
        }
    }

    #[test]
    fn test_seed_questions_carry_their_endings() {
        let lines = seed_stanza();

        assert!(lines[0].text.ends_with(", my blue-eyed son?"));
        assert!(lines[1].text.ends_with(", my darling young one?"));
        assert_eq!(lines[7].text, REFRAIN_PENULTIMATE);
        assert_eq!(lines[8].text, REFRAIN_FINAL);
    }

    #[test]
    fn test_seed_lines_share_the_historical_timestamp() {
        let lines = seed_stanza();

        assert!(lines.iter().all(|l| l.created_at == seed_timestamp()));
        assert_eq!(seed_timestamp().to_rfc3339(), "1963-01-06T00:00:00+00:00");
    }
}
