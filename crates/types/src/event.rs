//! Event domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an event
pub type EventId = Uuid;

/// Lifecycle label of an event
///
/// Stored verbatim; no transition rules are enforced when writing it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Event is being drafted and is not yet announced
    Draft,
    /// Event is announced with a confirmed time window
    Scheduled,
    /// Event is currently running
    Live,
    /// Event has finished
    Completed,
    /// Event was cancelled
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "live" => Ok(Self::Live),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown event status: {other}")),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Participation mode of an event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
    Hybrid,
}

impl EventMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Hybrid => "hybrid",
        }
    }
}

impl FromStr for EventMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(format!("unknown event mode: {other}")),
        }
    }
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted event record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier, assigned by the storage layer
    pub id: EventId,
    /// Event name
    pub name: String,
    /// Venue name or address
    pub venue: String,
    /// Whether entry is paid
    pub entry: bool,
    /// Scheduled start time
    pub start_time: DateTime<Utc>,
    /// Scheduled end time
    pub end_time: DateTime<Utc>,
    /// Invited guests
    pub guests: Vec<String>,
    /// Poster resource locator
    #[serde(rename = "posterURL")]
    pub poster_url: Option<String>,
    /// Recording resource locator
    #[serde(rename = "recordingURL")]
    pub recording_url: Option<String>,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Lifecycle label
    pub status: EventStatus,
    /// Participation mode
    pub mode: EventMode,
    /// Fee amount in minor currency units
    pub event_fee: i64,
    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fixed projection of an event for the list view
///
/// The list endpoint never exposes fields outside this set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub name: String,
    pub venue: String,
    pub entry: bool,
    pub start_time: DateTime<Utc>,
    pub status: EventStatus,
}

/// Validated payload for creating or fully replacing an event
///
/// The identifier and timestamps are always server-assigned and never appear
/// here. Unknown body fields are ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub name: String,
    pub venue: String,
    pub entry: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub guests: Vec<String>,
    #[serde(rename = "posterURL", default)]
    pub poster_url: Option<String>,
    #[serde(rename = "recordingURL", default)]
    pub recording_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: EventStatus,
    pub mode: EventMode,
    pub event_fee: i64,
}
