use serde::{Deserialize, Serialize};

use super::RecordId;

/// Joke category as stored by the delivery service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JokeType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<RecordId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateJokeType {
    pub name: String,
}
