//! Wire types for the inventory search API

use crate::query::TimeWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a search call: a time range plus field filters.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub time_filter: TimeFilter,
    pub filters: Vec<FieldFilter>,
}

impl SearchRequest {
    /// Single-field equality search over the given window.
    pub fn equals(field: &str, value: &str, window: &TimeWindow) -> Self {
        Self {
            time_filter: TimeFilter {
                start_time: window.start,
                end_time: window.end,
            },
            filters: vec![FieldFilter {
                field: field.to_string(),
                expression: "eq".to_string(),
                value: value.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeFilter {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub expression: String,
    pub value: String,
}

/// Envelope every search endpoint replies with.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct SearchResponse<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

/// A user entity as returned by `entities/users/search`.
///
/// Only the machine-id association is consumed; remaining attributes are
/// ignored on deserialization.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserEntity {
    pub mid: i64,
    pub username: String,
}
