//! Per-sport JSON shapes for player statistics and scorecard details.
//!
//! Both `player_stats.stats` and `scorecards.additional_data` hold JSON
//! objects whose shape depends on the sport of the owning scorecard.
//! [`PlayerStatLine`] and [`MatchDetails`] are the tagged unions that give
//! each sport a concrete schema. Known keys are type-checked; unknown keys
//! are kept in `extra` and written back untouched. A known key sent as
//! `null` is also written back as `null`. Sports without a schema accept
//! any JSON object.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Sport;

/// Why a per-sport JSON payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// The payload is an array, scalar or null.
    #[error("must be a JSON object")]
    NotAnObject,

    /// The payload is an object but a known key has the wrong type.
    #[error("does not match the {sport} schema: {reason}")]
    Schema {
        /// Sport whose schema was applied.
        sport: Sport,
        /// Deserializer message naming the offending key.
        reason: String,
    },
}

/// Schema structs that carry their unknown keys in a flattened map.
trait Extra {
    fn extra_mut(&mut self) -> &mut Map<String, Value>;
}

macro_rules! impl_extra {
    ($($ty:ty),+ $(,)?) => {
        $(impl Extra for $ty {
            fn extra_mut(&mut self) -> &mut Map<String, Value> {
                &mut self.extra
            }
        })+
    };
}

impl_extra!(
    CricketStats,
    DriverStats,
    BasketballStats,
    SoccerStats,
    BaseballStats,
    FootballStats,
    HockeyStats,
    TennisStats,
    MatchSummary,
    CricketSummary,
    RaceSummary,
);

/// Decodes `value` into a schema struct. Explicit `null`s on known keys
/// become `None` on the typed field, so they are parked in `extra` to be
/// written back.
fn decode<T: DeserializeOwned + Extra>(sport: Sport, value: &Value) -> Result<T, StatsError> {
    let mut decoded: T = serde_json::from_value(value.clone()).map_err(|e| StatsError::Schema {
        sport,
        reason: e.to_string(),
    })?;
    if let Some(object) = value.as_object() {
        let extra = decoded.extra_mut();
        for (key, _) in object.iter().filter(|(_, v)| v.is_null()) {
            extra.entry(key.clone()).or_insert(Value::Null);
        }
    }
    Ok(decoded)
}

fn require_object(value: &Value) -> Result<&Map<String, Value>, StatsError> {
    value.as_object().ok_or(StatsError::NotAnObject)
}

// ── Player statistics ───────────────────────────────────────────────────

/// Batting and bowling figures for one cricketer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CricketStats {
    /// Batting/bowling role, e.g. `"Batsman"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub runs_scored: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub balls_faced: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub fours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub sixes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub wickets_taken: Option<u32>,
    /// Runs conceded per over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economy: Option<f64>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Race result for one driver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverStats {
    /// Constructor name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Race time or gap to the leader, e.g. `"+3.164s"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Championship points scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub laps_completed: Option<u32>,
    /// Classification status, e.g. `"Finished"` or `"DNF"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Box-score line for one basketball player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BasketballStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebounds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Match figures for one soccer player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SoccerStats {
    /// Playing position, e.g. `"FW"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tackles: Option<u32>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Batting line for one baseball player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BaseballStats {
    /// Fielding position, e.g. `"SS"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_bats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rbis: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_runs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batting_avg: Option<f64>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Game figures for one American football player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FootballStats {
    /// Roster position, e.g. `"QB"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing_yards: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rushing_yards: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiving_yards: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touchdowns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tackles: Option<u32>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Game figures for one hockey player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct HockeyStats {
    /// Roster position, e.g. `"C"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus_minus: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_minutes: Option<u32>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Match figures for one tennis player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TennisStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_faults: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_serve_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winners: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unforced_errors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_points: Option<u32>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Statistics for one player, shaped by the sport of its scorecard.
///
/// Serializes as the bare inner object so the stored JSON carries no tag;
/// the sport is always recoverable from the owning scorecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlayerStatLine {
    /// Cricket batting/bowling line.
    Cricket(CricketStats),
    /// F1 race result.
    F1(DriverStats),
    /// Basketball box score.
    Basketball(BasketballStats),
    /// Soccer match figures.
    Soccer(SoccerStats),
    /// Baseball batting line.
    Baseball(BaseballStats),
    /// American football figures.
    Football(FootballStats),
    /// Hockey figures.
    Hockey(HockeyStats),
    /// Tennis match figures.
    Tennis(TennisStats),
    /// Sport without a schema; any object is accepted.
    Other(Map<String, Value>),
}

impl PlayerStatLine {
    /// Validates `value` against the schema of `sport`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NotAnObject`] for non-object payloads and
    /// [`StatsError::Schema`] when a known key has the wrong type.
    pub fn parse(sport: Option<Sport>, value: &Value) -> Result<Self, StatsError> {
        let object = require_object(value)?;
        let Some(sport) = sport else {
            return Ok(Self::Other(object.clone()));
        };
        Ok(match sport {
            Sport::Cricket => Self::Cricket(decode(sport, value)?),
            Sport::F1 => Self::F1(decode(sport, value)?),
            Sport::Basketball => Self::Basketball(decode(sport, value)?),
            Sport::Soccer => Self::Soccer(decode(sport, value)?),
            Sport::Baseball => Self::Baseball(decode(sport, value)?),
            Sport::Football => Self::Football(decode(sport, value)?),
            Sport::Hockey => Self::Hockey(decode(sport, value)?),
            Sport::Tennis => Self::Tennis(decode(sport, value)?),
        })
    }

    /// Sport whose schema this line follows, if any.
    #[must_use]
    pub const fn sport(&self) -> Option<Sport> {
        match self {
            Self::Cricket(_) => Some(Sport::Cricket),
            Self::F1(_) => Some(Sport::F1),
            Self::Basketball(_) => Some(Sport::Basketball),
            Self::Soccer(_) => Some(Sport::Soccer),
            Self::Baseball(_) => Some(Sport::Baseball),
            Self::Football(_) => Some(Sport::Football),
            Self::Hockey(_) => Some(Sport::Hockey),
            Self::Tennis(_) => Some(Sport::Tennis),
            Self::Other(_) => None,
        }
    }

    /// Converts the line back into the JSON object that is stored.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

// ── Scorecard match details ─────────────────────────────────────────────

/// Match context shared by most sports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    /// Stadium or arena.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Spectators in attendance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<u64>,
    /// Free-text weather description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    /// Free-text duration, e.g. `"2h 15m"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Keys outside the schema (quarter scores, top scorers, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cricket match context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CricketSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// `"Test Match"`, `"ODI"` or `"T20"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_of_match: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub umpires: Option<Vec<String>>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Grand Prix context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct RaceSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendance: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fastest_lap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pole_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retirements: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_car_periods: Option<u32>,
    /// Keys outside the schema.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Scorecard `additionalData`, shaped by the scorecard's sport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchDetails {
    /// Cricket context.
    Cricket(CricketSummary),
    /// F1 race context.
    Race(RaceSummary),
    /// Any other sport with a schema.
    Match(MatchSummary),
    /// Sport without a schema; any object is accepted.
    Other(Map<String, Value>),
}

impl MatchDetails {
    /// Validates `value` against the match-details schema of `sport`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NotAnObject`] for non-object payloads and
    /// [`StatsError::Schema`] when a known key has the wrong type.
    pub fn parse(sport: Option<Sport>, value: &Value) -> Result<Self, StatsError> {
        let object = require_object(value)?;
        Ok(match sport {
            Some(Sport::Cricket) => Self::Cricket(decode(Sport::Cricket, value)?),
            Some(Sport::F1) => Self::Race(decode(Sport::F1, value)?),
            Some(sport) => Self::Match(decode(sport, value)?),
            None => Self::Other(object.clone()),
        })
    }

    /// Converts the details back into the JSON object that is stored.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}
