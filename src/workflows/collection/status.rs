//! Strict request lifecycle states and the legacy four-value status adapter.
//!
//! The backing store and every external consumer only ever see the four
//! legacy strings `PENDING`, `IN_PROGRESS`, `COLLECTED`, and `REJECTED`.
//! Business logic works exclusively with [`RequestStatus`] and crosses the
//! vocabulary boundary through [`RequestStatus::to_legacy`] and
//! [`RequestStatus::parse`]. The mapping is lossy by contract: `Assigned`
//! serializes to `PENDING` and re-parses as `Created`, so collector presence
//! on the request is the only external signal that assignment happened.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Internal lifecycle of a waste-pickup request.
///
/// `Collected` and `Closed` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Created,
    Assigned,
    InProgress,
    Collected,
    Closed,
}

/// The persisted/external status vocabulary, frozen for backward
/// compatibility with the original API and stored rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyStatus {
    Pending,
    InProgress,
    Collected,
    Rejected,
}

impl LegacyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            LegacyStatus::Pending => "PENDING",
            LegacyStatus::InProgress => "IN_PROGRESS",
            LegacyStatus::Collected => "COLLECTED",
            LegacyStatus::Rejected => "REJECTED",
        }
    }

    /// Resolve the legacy value back to a strict state.
    ///
    /// `PENDING` always resolves to `Created`, never `Assigned`.
    pub const fn to_strict(self) -> RequestStatus {
        match self {
            LegacyStatus::Pending => RequestStatus::Created,
            LegacyStatus::InProgress => RequestStatus::InProgress,
            LegacyStatus::Collected => RequestStatus::Collected,
            LegacyStatus::Rejected => RequestStatus::Closed,
        }
    }
}

impl fmt::Display for LegacyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RequestStatus {
    /// Project the strict state onto the frozen external vocabulary.
    pub const fn to_legacy(self) -> LegacyStatus {
        match self {
            RequestStatus::Created | RequestStatus::Assigned => LegacyStatus::Pending,
            RequestStatus::InProgress => LegacyStatus::InProgress,
            RequestStatus::Collected => LegacyStatus::Collected,
            RequestStatus::Closed => LegacyStatus::Rejected,
        }
    }

    /// Parse an incoming status value, accepting both strict names and the
    /// legacy aliases (`PENDING`, `REJECTED`). Trimmed and case-insensitive.
    pub fn parse(raw: &str) -> Result<Self, StatusParseError> {
        let value = raw.trim().to_ascii_uppercase();
        match value.as_str() {
            "PENDING" | "CREATED" => Ok(RequestStatus::Created),
            "ASSIGNED" => Ok(RequestStatus::Assigned),
            "IN_PROGRESS" => Ok(RequestStatus::InProgress),
            "COLLECTED" => Ok(RequestStatus::Collected),
            "REJECTED" | "CLOSED" => Ok(RequestStatus::Closed),
            _ => Err(StatusParseError {
                value: raw.trim().to_string(),
            }),
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Collected | RequestStatus::Closed)
    }

    /// The transition table for collectors working their assigned request:
    /// start from `Created`/`Assigned`, then complete or close from
    /// `InProgress`. Admins and residents have no entries here; the admin's
    /// `Created -> Assigned` move only happens as a side effect of collector
    /// assignment.
    pub const fn collector_may_move(self, target: RequestStatus) -> bool {
        matches!(
            (self, target),
            (
                RequestStatus::Created | RequestStatus::Assigned,
                RequestStatus::InProgress
            ) | (
                RequestStatus::InProgress,
                RequestStatus::Collected | RequestStatus::Closed
            )
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            RequestStatus::Created => "CREATED",
            RequestStatus::Assigned => "ASSIGNED",
            RequestStatus::InProgress => "IN_PROGRESS",
            RequestStatus::Collected => "COLLECTED",
            RequestStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized status value at the adapter boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported status value: {value}")]
pub struct StatusParseError {
    pub value: String,
}

// The wire/storage representation is the legacy vocabulary, so serialization
// round-trips only the four external strings.
impl Serialize for RequestStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_legacy().as_str())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RequestStatus::parse(&raw).map_err(D::Error::custom)
    }
}
