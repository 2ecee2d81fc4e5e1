//! Rank and role model.
//!
//! A teacher's rank is drawn from a small closed set and decides which
//! invigilation roles the teacher may fill. The eligibility tables live in
//! [`RankPolicy`](crate::policy::RankPolicy); this module only names things.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seniority classification of a teacher.
///
/// Serialized with the display names used by the school's staff directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "Associate Professor")]
    AssociateProfessor,
    #[serde(rename = "Lecturer")]
    Lecturer,
    #[serde(rename = "Assistant Lecturer", alias = "Associate Lecturer")]
    AssistantLecturer,
    #[serde(rename = "Tutor")]
    Tutor,
}

impl Rank {
    /// All ranks, most senior first.
    pub const ALL: [Rank; 4] = [
        Rank::AssociateProfessor,
        Rank::Lecturer,
        Rank::AssistantLecturer,
        Rank::Tutor,
    ];

    /// Display name as stored in the staff directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::AssociateProfessor => "Associate Professor",
            Rank::Lecturer => "Lecturer",
            Rank::AssistantLecturer => "Assistant Lecturer",
            Rank::Tutor => "Tutor",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a rank name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rank: {0}")]
pub struct UnknownRank(pub String);

impl FromStr for Rank {
    type Err = UnknownRank;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Associate Professor" => Ok(Rank::AssociateProfessor),
            "Lecturer" => Ok(Rank::Lecturer),
            "Assistant Lecturer" | "Associate Lecturer" => Ok(Rank::AssistantLecturer),
            "Tutor" => Ok(Rank::Tutor),
            other => Err(UnknownRank(other.to_string())),
        }
    }
}

/// One of the two invigilation duties in a room-slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Supervisor,
    Assistant,
}

impl Role {
    pub const BOTH: [Role; 2] = [Role::Supervisor, Role::Assistant];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Supervisor => f.write_str("Supervisor"),
            Role::Assistant => f.write_str("Assistant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_round_trip_names() {
        for rank in Rank::ALL {
            assert_eq!(rank.as_str().parse::<Rank>(), Ok(rank));
        }
    }

    #[test]
    fn test_associate_lecturer_alias() {
        assert_eq!(
            "Associate Lecturer".parse::<Rank>(),
            Ok(Rank::AssistantLecturer)
        );
        let rank: Rank = serde_json::from_str("\"Associate Lecturer\"").unwrap();
        assert_eq!(rank, Rank::AssistantLecturer);
    }

    #[test]
    fn test_unknown_rank() {
        let err = "Dean".parse::<Rank>().unwrap_err();
        assert_eq!(err.to_string(), "unknown rank: Dean");
    }

    #[test]
    fn test_rank_serializes_display_name() {
        let json = serde_json::to_string(&Rank::AssociateProfessor).unwrap();
        assert_eq!(json, "\"Associate Professor\"");
    }
}
