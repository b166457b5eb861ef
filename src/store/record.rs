use chrono::{DateTime, Utc};
use rocket::serde::{Deserialize, Serialize};

use super::ValidationError;

pub const MAX_NAME_LENGTH: usize = 20;

/// A persisted leaderboard entry, as served to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(crate = "rocket::serde")]
pub struct ScoreRecord {
    pub name: String,
    pub score: f64,
    pub date: DateTime<Utc>,
}

/// One entry of a per-player listing; the name is implied by the query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(crate = "rocket::serde")]
pub struct PlayerScore {
    pub score: f64,
    pub date: DateTime<Utc>,
}

/// A score submission that passed validation. The only way to construct one
/// is [`NewScore::new`], so the store never sees a blank or overlong name or
/// a negative score.
#[derive(Clone, Debug, PartialEq)]
pub struct NewScore {
    name: String,
    score: f64,
}

impl NewScore {
    /// Validates a candidate submission. Surrounding whitespace is trimmed
    /// off the name here, at the store boundary, so every caller of the
    /// store gets the same treatment. Pure; needs no live store.
    pub fn new(name: &str, score: f64) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankName);
        }
        let length = name.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(ValidationError::NameTooLong { length });
        }
        if score.is_nan() || score < 0.0 {
            return Err(ValidationError::NegativeScore { score });
        }
        Ok(Self {
            name: name.to_owned(),
            score,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub(super) fn into_record(self, date: DateTime<Utc>) -> ScoreRecord {
        ScoreRecord {
            name: self.name,
            score: self.score,
            date,
        }
    }
}
