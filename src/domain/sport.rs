//! Sports known to the catalogue.
//!
//! [`Sport`] is the discriminator for every per-sport JSON shape (player
//! statistics, scorecard match details) and for display fallbacks. Events
//! and scorecards store the sport as free text, so parsing is lenient:
//! unrecognised names are not an error, they simply have no schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A sport with a dedicated statistics schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    /// Test, ODI and T20 cricket.
    Cricket,
    /// Formula 1 motor racing.
    F1,
    /// Basketball.
    Basketball,
    /// Association football.
    Soccer,
    /// Baseball.
    Baseball,
    /// American football.
    Football,
    /// Ice hockey.
    Hockey,
    /// Tennis.
    Tennis,
}

impl Sport {
    /// All sports with a dedicated schema.
    pub const ALL: [Self; 8] = [
        Self::Cricket,
        Self::F1,
        Self::Basketball,
        Self::Soccer,
        Self::Baseball,
        Self::Football,
        Self::Hockey,
        Self::Tennis,
    ];

    /// Canonical display name, as stored in the `sport` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cricket => "Cricket",
            Self::F1 => "F1",
            Self::Basketball => "Basketball",
            Self::Soccer => "Soccer",
            Self::Baseball => "Baseball",
            Self::Football => "Football",
            Self::Hockey => "Hockey",
            Self::Tennis => "Tennis",
        }
    }

    /// Returns `true` for sports where players compete individually
    /// rather than as members of a team.
    #[must_use]
    pub const fn is_individual(self) -> bool {
        matches!(self, Self::F1 | Self::Tennis)
    }

    /// Parses a stored sport name, returning `None` for sports without a
    /// dedicated schema.
    #[must_use]
    pub fn recognize(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a sport name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sport: {0}")]
pub struct UnknownSport(pub String);

impl FromStr for Sport {
    type Err = UnknownSport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("formula 1") || trimmed.eq_ignore_ascii_case("formula one")
        {
            return Ok(Self::F1);
        }
        Self::ALL
            .into_iter()
            .find(|sport| sport.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSport(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("cricket".parse::<Sport>(), Ok(Sport::Cricket));
        assert_eq!(" HOCKEY ".parse::<Sport>(), Ok(Sport::Hockey));
        assert_eq!("f1".parse::<Sport>(), Ok(Sport::F1));
        assert_eq!("Formula 1".parse::<Sport>(), Ok(Sport::F1));
    }

    #[test]
    fn unknown_sport_is_reported() {
        let err = "Curling".parse::<Sport>();
        assert_eq!(err, Err(UnknownSport("Curling".to_string())));
        assert_eq!(Sport::recognize("Curling"), None);
    }

    #[test]
    fn display_matches_canonical_name() {
        for sport in Sport::ALL {
            assert_eq!(sport.to_string(), sport.as_str());
            assert_eq!(sport.as_str().parse::<Sport>(), Ok(sport));
        }
    }

    #[test]
    fn individual_sports() {
        assert!(Sport::F1.is_individual());
        assert!(Sport::Tennis.is_individual());
        assert!(!Sport::Soccer.is_individual());
    }
}
