pub mod joke;
pub mod joke_type;

pub use joke::{ApprovalOutcome, DeliveryJokeRequest, Joke, JokePatch, JokeStatus, PendingJokes, UpdateOutcome};
pub use joke_type::{CreateJokeType, JokeType};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by an upstream service; some send strings, some numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Text(s) => f.write_str(s),
            RecordId::Number(n) => write!(f, "{}", n),
        }
    }
}
