//! Core data structures for participants and interruption events

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// Stable, dataset-wide participant identifier.
///
/// Input documents may carry ids as JSON strings or integers; both normalize
/// to the same textual form so `7` and `"7"` name the same participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        ParticipantId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        ParticipantId(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl RawId {
    fn into_text(self) -> String {
        match self {
            RawId::Text(s) => s.trim().to_string(),
            RawId::Signed(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ParticipantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| ParticipantId(raw.into_text()))
    }
}

/// Deserialize an optional id where `null`, `""` and a missing field all mean
/// "unresolved".
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<ParticipantId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw
        .map(RawId::into_text)
        .filter(|s| !s.is_empty())
        .map(ParticipantId))
}

/// Numeric session identifier (one plenary sitting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u32);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = Error;

    /// Coerce a selector value into a session number. Surrounding whitespace
    /// is ignored; anything else that is not a `u32` is a usage error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(SessionId)
            .map_err(|_| Error::InvalidSession(s.to_string()))
    }
}

/// A member of parliament (or other speaker) from the dataset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Party affiliation; empty means unaffiliated or unknown.
    #[serde(default)]
    pub party: String,
}

/// A single recorded interruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterruptionEvent {
    pub session: SessionId,
    pub date: NaiveDate,
    pub caller: ParticipantId,
    /// `None` when the interrupted speaker is unknown.
    pub speaker: Option<ParticipantId>,
}

/// Interruption as it appears in the input document, before date parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInterruption {
    pub session: SessionId,
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub caller: Option<ParticipantId>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub speaker: Option<ParticipantId>,
}

/// The input document: participant catalog plus interruption list.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub nodes: Vec<Participant>,
    pub interruptions: Vec<RawInterruption>,
}

/// Parse an ISO-8601 date or timestamp down to its calendar date.
pub fn parse_event_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|ts| ts.date())
}

/// A directed, weighted caller → speaker flow inside one session.
///
/// `source` and `target` index into the session's ordered node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedLink {
    pub source: usize,
    pub target: usize,
    /// How many interruptions this link represents.
    pub value: u32,
}
