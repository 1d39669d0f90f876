use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JokeStatus {
    Pending,
    Approved,
    Rejected,
}

impl JokeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JokeStatus::Pending => "pending",
            JokeStatus::Approved => "approved",
            JokeStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for JokeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of a joke as persisted by the submit service.
///
/// Only `content`, `type` and `status` are required; the workflow reads nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Joke {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<RecordId>,
    pub content: String,
    #[serde(rename = "type")]
    pub joke_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub status: JokeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Joke {
    pub fn identifier(&self) -> Option<&RecordId> {
        self.id.as_ref().or(self.object_id.as_ref())
    }

    pub fn is_approved(&self) -> bool {
        self.status == JokeStatus::Approved
    }
}

/// Partial update sent to the submit service. Absent fields are left untouched upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JokePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub joke_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JokeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl JokePatch {
    pub fn with_status(status: JokeStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn requests_approval(&self) -> bool {
        self.status == Some(JokeStatus::Approved)
    }

    /// The same patch with `status` forced back to `pending`.
    pub fn as_pending(&self) -> Self {
        Self {
            status: Some(JokeStatus::Pending),
            ..self.clone()
        }
    }

    /// Like [`JokePatch::as_pending`], but `content` and `type` the patch left out are
    /// filled from the persisted joke so the compensating update restates what submit holds.
    pub fn reverted(&self, persisted: &Joke) -> Self {
        Self {
            content: self.content.clone().or_else(|| Some(persisted.content.clone())),
            joke_type: self.joke_type.clone().or_else(|| Some(persisted.joke_type.clone())),
            status: Some(JokeStatus::Pending),
            author: self.author.clone(),
        }
    }
}

/// Body of the delivery service's create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryJokeRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub joke_type: String,
    pub status: JokeStatus,
}

impl From<&Joke> for DeliveryJokeRequest {
    fn from(joke: &Joke) -> Self {
        Self {
            content: joke.content.clone(),
            joke_type: joke.joke_type.clone(),
            status: joke.status,
        }
    }
}

/// Pending list as the submit service pages it: a bare array or an object holding one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PendingJokes {
    List(Vec<Joke>),
    Page {
        #[serde(alias = "jokes", alias = "items", alias = "results")]
        data: Vec<Joke>,
    },
}

impl PendingJokes {
    pub fn len(&self) -> usize {
        match self {
            PendingJokes::List(jokes) | PendingJokes::Page { data: jokes } => jokes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub const APPROVED_MESSAGE: &str = "Joke approved and created in delivery service";

/// Result of an approval whose delivery record was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalOutcome {
    pub updated_joke: Value,
    pub delivery_joke: Value,
    pub message: String,
}

impl ApprovalOutcome {
    pub fn new(updated_joke: Value, delivery_joke: Value) -> Self {
        Self {
            updated_joke,
            delivery_joke,
            message: APPROVED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UpdateOutcome {
    /// Submit service's response, unchanged.
    Updated(Value),
    Approved(ApprovalOutcome),
}
