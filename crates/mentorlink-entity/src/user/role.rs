//! Marketplace role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a MentorLink account can hold.
///
/// The backend also uses the historical names `problem-solver`, `advisor`,
/// and `client` on the wire; they normalize to [`Solver`](Self::Solver),
/// [`Mentor`](Self::Mentor), and [`Mentee`](Self::Mentee) respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Posts freelance challenges.
    Innovator,
    /// Works on posted challenges.
    #[serde(alias = "problem-solver")]
    Solver,
    /// Offers mentorship sessions.
    #[serde(alias = "advisor")]
    Mentor,
    /// Books mentorship sessions.
    #[serde(alias = "client")]
    Mentee,
}

impl UserRole {
    /// Return the normalized role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Innovator => "innovator",
            Self::Solver => "solver",
            Self::Mentor => "mentor",
            Self::Mentee => "mentee",
        }
    }

    /// Whether this role has a dedicated realtime dashboard room.
    ///
    /// Only the mentorship side of the marketplace has room-scoped push
    /// channels; innovators and solvers receive direct user events only.
    pub fn has_dashboard_room(&self) -> bool {
        matches!(self, Self::Mentor | Self::Mentee)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = mentorlink_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "innovator" => Ok(Self::Innovator),
            "solver" | "problem-solver" => Ok(Self::Solver),
            "mentor" | "advisor" => Ok(Self::Mentor),
            "mentee" | "client" => Ok(Self::Mentee),
            _ => Err(mentorlink_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: innovator, solver, mentor, mentee"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_legacy_names() {
        assert_eq!("advisor".parse::<UserRole>().unwrap(), UserRole::Mentor);
        assert_eq!("client".parse::<UserRole>().unwrap(), UserRole::Mentee);
        assert_eq!("problem-solver".parse::<UserRole>().unwrap(), UserRole::Solver);
        assert_eq!("MENTOR".parse::<UserRole>().unwrap(), UserRole::Mentor);
        assert!("wizard".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_aliases() {
        let role: UserRole = serde_json::from_str(r#""advisor""#).unwrap();
        assert_eq!(role, UserRole::Mentor);
        assert_eq!(serde_json::to_string(&role).unwrap(), r#""mentor""#);
    }

    #[test]
    fn test_dashboard_rooms() {
        assert!(UserRole::Mentor.has_dashboard_room());
        assert!(UserRole::Mentee.has_dashboard_room());
        assert!(!UserRole::Innovator.has_dashboard_room());
        assert!(!UserRole::Solver.has_dashboard_room());
    }
}
