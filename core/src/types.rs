//! DTOs for the poll service.
//!
//! # Design
//! These mirror the service's JSON schema (snake_case field names) but are
//! defined independently of the mock-server crate. Integration tests catch
//! schema drift between the two.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One answer choice of a poll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollOption {
    pub id: i64,
    pub text: String,
    pub poll_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Poll {
    pub id: i64,
    pub question: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    pub owner_id: i64,
    #[serde(default)]
    pub options: Vec<PollOption>,
}

/// One page of a poll listing, with the window that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollsPage {
    pub items: Vec<Poll>,
    /// Server-reported total when available, else `items.len()`.
    pub total: u64,
    pub skip: u32,
    pub limit: u32,
}

/// Request payload for registering a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
}

/// Request payload for casting a vote. The poll id travels in the path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRequest {
    pub option_id: i64,
}

/// Acknowledgement body returned by the vote endpoint, passed through as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct VoteAck(pub serde_json::Value);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionResult {
    pub option_text: String,
    pub vote_count: u64,
}

/// Aggregated vote counts for a poll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollResults {
    pub poll_id: i64,
    pub question: String,
    pub results: Vec<OptionResult>,
}

/// Timestamps arrive either naive (`2024-05-01T10:20:30.123456`) or with an
/// offset; offset timestamps are normalized to UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format("%Y-%m-%dT%H:%M:%S%.f"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(with_offset.naive_utc());
        }
        raw.parse::<NaiveDateTime>().map_err(de::Error::custom)
    }
}
