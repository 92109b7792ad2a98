use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{Fields, Id};

/// Keys of a trainer record owned by the store.
pub const TRAINER_RESERVED: [&str; 2] = ["id", "joinDate"];

/// A trainer with whatever fields the caller chose to record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: Id,
    pub join_date: DateTime<FixedOffset>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Trainer {
    /// String value of a caller field, if present.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

#[derive(Debug, Default, Clone)]
pub struct TrainerFilter {
    /// Case insensitive substring over all string fields.
    pub search: Option<String>,
}

impl TrainerFilter {
    pub fn accepts(&self, trainer: &Trainer) -> bool {
        match &self.search {
            Some(term) => crate::fields_contain(&trainer.fields, term),
            None => true,
        }
    }
}
