use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored document: the opaque generated id, the store-assigned timestamps
/// and the document body flattened next to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    pub id: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}
